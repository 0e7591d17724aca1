use gwdt_image::{Image, ImageDtype};

use super::error::GwdtError;
use super::state::DistanceMap;
use crate::parallel::{self, ExecuteExt, ExecutionStrategy};

/// Rescale a distance map into an 8-bit image.
///
/// Cells still at the sentinel count as 0. With `M` the largest remaining distance,
/// each cell maps to `round(d / (M + 1) * 255)` clamped to `[0, 255]`. If `M` is 0 the
/// output is all zeros.
///
/// # Arguments
///
/// * `distance` - The raw distance map.
/// * `strategy` - How to split the work across threads.
///
/// # Example
///
/// ```
/// use gwdt_image::Image;
/// use gwdt_imgproc::gwdt::normalize_distance;
/// use gwdt_imgproc::parallel::ExecutionStrategy;
///
/// let distance = Image::<f32, 1>::new([3, 1].into(), vec![f32::INFINITY, 1.0, 3.0]).unwrap();
/// let out = normalize_distance(&distance, ExecutionStrategy::Serial).unwrap();
/// assert_eq!(out.as_slice(), &[0, 64, 191]);
/// ```
pub fn normalize_distance(
    distance: &DistanceMap,
    strategy: ExecutionStrategy,
) -> Result<Image<u8, 1>, GwdtError> {
    let src = distance.as_slice();
    let max = parallel::reduce_with(src, strategy, 0.0f32, |&d| finite_or_zero(d), f32::max)?;

    let mut dst = Image::<u8, 1>::from_size_val(distance.size(), 0)?;
    if max > 0.0 {
        let denom = max + 1.0;
        src.execute_with(strategy, dst.as_slice_mut(), |(&d, out)| {
            *out = u8::from_f32(finite_or_zero(d) / denom * 255.0);
        })?;
    }

    Ok(dst)
}

#[inline]
fn finite_or_zero(d: f32) -> f32 {
    if d.is_finite() {
        d
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gwdt::state::SENTINEL;
    use gwdt_image::ImageSize;

    #[test]
    fn normalize_replaces_sentinel() -> Result<(), GwdtError> {
        let mut data = vec![SENTINEL; 9];
        data[4] = 1.0;
        let distance = Image::<f32, 1>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            data,
        )?;
        let out = normalize_distance(&distance, ExecutionStrategy::Serial)?;
        let mut expected = vec![0u8; 9];
        expected[4] = 128;
        assert_eq!(out.as_slice(), expected.as_slice());
        Ok(())
    }

    #[test]
    fn normalize_all_zero_and_unreached() -> Result<(), GwdtError> {
        let zeros = Image::<f32, 1>::from_size_val([4, 4].into(), 0.0)?;
        let out = normalize_distance(&zeros, ExecutionStrategy::ParallelElements)?;
        assert!(out.as_slice().iter().all(|v| *v == 0));

        let unreached = Image::<f32, 1>::from_size_val([4, 4].into(), SENTINEL)?;
        let out = normalize_distance(&unreached, ExecutionStrategy::AutoRows(4))?;
        assert!(out.as_slice().iter().all(|v| *v == 0));
        Ok(())
    }

    #[test]
    fn normalize_scales_by_max_plus_one() -> Result<(), GwdtError> {
        let distance = Image::<f32, 1>::new([4, 1].into(), vec![0.0, 0.5, 1000.0, 999.0])?;
        let out = normalize_distance(&distance, ExecutionStrategy::Serial)?;
        assert_eq!(out.as_slice(), &[0, 0, 255, 254]);
        Ok(())
    }

    #[test]
    fn normalize_strategy_errors_propagate() -> Result<(), GwdtError> {
        let distance = Image::<f32, 1>::from_size_val([2, 2].into(), 1.0)?;
        let res = normalize_distance(&distance, ExecutionStrategy::Fixed(0));
        assert!(matches!(res, Err(GwdtError::Parallel(_))));
        Ok(())
    }
}
