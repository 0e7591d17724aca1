#![deny(missing_docs)]
//! Image types and traits for intensity and distance fields

/// image representation for grid-based processing.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
