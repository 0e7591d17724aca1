#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// grey-weighted distance transform module.
pub mod gwdt;

/// module containing parallization utilities.
pub mod parallel;
