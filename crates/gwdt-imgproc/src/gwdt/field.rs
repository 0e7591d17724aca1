use gwdt_image::{Image, ImageDtype, ImageSize};

use super::error::GwdtError;
use super::state::is_border;
use crate::parallel::{self, ExecutionStrategy};

/// Immutable intensity grid the transform runs over.
///
/// Holds the input converted to `f32`. Construction validates that the grid has an
/// interior (at least 3x3) and that every intensity is finite and non-negative.
#[derive(Debug, Clone)]
pub struct GridField {
    intensity: Image<f32, 1>,
}

impl GridField {
    /// Build a field from a single channel image.
    ///
    /// # Errors
    ///
    /// * [`GwdtError::InvalidDimensions`] if either side is smaller than 3.
    /// * [`GwdtError::InvalidIntensity`] if a value is negative, NaN or infinite.
    pub fn new<T: ImageDtype>(src: &Image<T, 1>) -> Result<Self, GwdtError> {
        let (rows, cols) = (src.rows(), src.cols());
        if rows < 3 || cols < 3 {
            return Err(GwdtError::InvalidDimensions { rows, cols });
        }

        let mut intensity = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
        parallel::par_iter_rows_val(src, &mut intensity, |s, d| *d = (*s).into());

        if let Some(idx) = intensity
            .as_slice()
            .iter()
            .position(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(GwdtError::InvalidIntensity {
                row: idx / cols,
                col: idx % cols,
                value: intensity.as_slice()[idx],
            });
        }

        Ok(Self { intensity })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.intensity.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.intensity.cols()
    }

    /// Size of the grid.
    pub fn size(&self) -> ImageSize {
        self.intensity.size()
    }

    /// Intensity at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.intensity.get([row, col, 0]).copied()
    }

    /// Intensity at `(row, col)`.
    ///
    /// The caller guarantees the index is in bounds.
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> f32 {
        self.intensity.as_slice()[row * self.cols() + col]
    }

    /// Whether `(row, col)` is on the outer ring of the grid.
    pub fn is_border(&self, row: usize, col: usize) -> bool {
        is_border(row, col, self.rows(), self.cols())
    }

    /// Arithmetic mean intensity over all cells, accumulated in `f64`.
    pub fn mean(&self, strategy: ExecutionStrategy) -> Result<f64, GwdtError> {
        let values = self.intensity.as_slice();
        let sum = parallel::reduce_with(values, strategy, 0.0f64, |&v| v as f64, |a, b| a + b)?;
        Ok(sum / values.len() as f64)
    }

    /// The intensities as an image.
    pub fn as_image(&self) -> &Image<f32, 1> {
        &self.intensity
    }
}
