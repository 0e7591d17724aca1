use gwdt_image::{Image, ImageError};

/// A denoising pass run over the intensities before the transform.
///
/// Implementations (e.g. an anisotropic diffusion filter) live outside this crate.
/// They must return an image of the same size with finite, non-negative values.
pub trait Prefilter {
    /// Filter `src` into a new image.
    fn apply(&self, src: &Image<f32, 1>) -> Result<Image<f32, 1>, ImageError>;
}

/// Prefilter that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Prefilter for Identity {
    fn apply(&self, src: &Image<f32, 1>) -> Result<Image<f32, 1>, ImageError> {
        Ok(src.clone())
    }
}

impl<F> Prefilter for F
where
    F: Fn(&Image<f32, 1>) -> Result<Image<f32, 1>, ImageError>,
{
    fn apply(&self, src: &Image<f32, 1>) -> Result<Image<f32, 1>, ImageError> {
        self(src)
    }
}
