use gwdt_image::ImageError;

use crate::parallel::ParallelError;

/// An error type for the grey-weighted distance transform.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GwdtError {
    /// The grid has no interior cell.
    #[error("Grid must be at least 3x3, got {rows}x{cols}")]
    InvalidDimensions {
        /// Number of rows of the input grid.
        rows: usize,
        /// Number of columns of the input grid.
        cols: usize,
    },

    /// An intensity is negative or not finite, so edge costs would not be non-negative.
    #[error("Invalid intensity {value} at ({row}, {col})")]
    InvalidIntensity {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The offending value.
        value: f32,
    },

    /// A prefilter changed the size of the grid.
    #[error("Prefilter changed the grid size from {expected} to {actual}")]
    SizeMismatch {
        /// Size before the prefilter.
        expected: gwdt_image::ImageSize,
        /// Size returned by the prefilter.
        actual: gwdt_image::ImageSize,
    },

    /// Error from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error from a data-parallel phase.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
