use gwdt_image::Image;

use super::config::SeedThreshold;
use super::error::GwdtError;
use super::field::GridField;
use super::state::{DistanceMap, PixelState, StateMap, SENTINEL};
use crate::parallel::{ExecuteExt, ExecutionStrategy};

/// Initial state and distance buffers produced by [`SeedClassifier`].
#[derive(Debug, Clone)]
pub struct Seeds {
    /// `Alive` for seeds, `Far` elsewhere.
    pub state: StateMap,
    /// Raw intensity for seeds, [`SENTINEL`] elsewhere.
    pub distance: DistanceMap,
    /// The resolved threshold.
    pub threshold: f64,
    /// Number of seed cells.
    pub num_seeds: usize,
}

/// Partitions cells into seeds and non-seeds by an intensity threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedClassifier {
    threshold: SeedThreshold,
    strategy: ExecutionStrategy,
}

impl SeedClassifier {
    /// Create a classifier.
    pub fn new(threshold: SeedThreshold, strategy: ExecutionStrategy) -> Self {
        Self {
            threshold,
            strategy,
        }
    }

    /// Resolve the threshold for the given field.
    pub fn threshold(&self, field: &GridField) -> Result<f64, GwdtError> {
        match self.threshold {
            SeedThreshold::Mean => field.mean(self.strategy),
            SeedThreshold::Value(v) => Ok(v as f64),
        }
    }

    /// Classify every cell of `field`.
    ///
    /// A cell strictly below the threshold becomes `Alive` with its own intensity as
    /// distance. Every other cell is `Far` at [`SENTINEL`]. All-seed and no-seed grids
    /// are valid results.
    pub fn classify(&self, field: &GridField) -> Result<Seeds, GwdtError> {
        let threshold = self.threshold(field)?;
        let src = field.as_image().as_slice();

        let mut state = StateMap::from_size_val(field.size(), PixelState::Far)?;
        src.execute_with(self.strategy, state.as_slice_mut(), |(&v, s)| {
            if (v as f64) < threshold {
                *s = PixelState::Alive;
            }
        })?;

        let mut distance = Image::<f32, 1>::from_size_val(field.size(), SENTINEL)?;
        src.execute_with(self.strategy, distance.as_slice_mut(), |(&v, d)| {
            if (v as f64) < threshold {
                *d = v;
            }
        })?;

        let num_seeds = state
            .as_slice()
            .iter()
            .filter(|s| **s == PixelState::Alive)
            .count();

        log::debug!(
            "classified {} of {} cells as seeds (threshold: {:.4})",
            num_seeds,
            src.len(),
            threshold
        );

        Ok(Seeds {
            state,
            distance,
            threshold,
            num_seeds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gwdt_image::ImageSize;

    fn field(data: Vec<f32>, width: usize, height: usize) -> Result<GridField, GwdtError> {
        let image = Image::<f32, 1>::new(ImageSize { width, height }, data)?;
        GridField::new(&image)
    }

    #[test]
    fn seeds_below_mean() -> Result<(), GwdtError> {
        let field = field(
            vec![10.0, 10.0, 10.0, 10.0, 1.0, 10.0, 10.0, 10.0, 10.0],
            3,
            3,
        )?;
        let seeds = SeedClassifier::default().classify(&field)?;
        assert_eq!(seeds.num_seeds, 1);
        assert_eq!(seeds.state.get([1, 1, 0]), Some(&PixelState::Alive));
        assert_eq!(seeds.distance.get([1, 1, 0]), Some(&1.0));
        assert_eq!(seeds.state.get([0, 0, 0]), Some(&PixelState::Far));
        assert_eq!(seeds.distance.get([0, 0, 0]), Some(&SENTINEL));
        Ok(())
    }

    #[test]
    fn seed_distance_is_raw_intensity() -> Result<(), GwdtError> {
        #[rustfmt::skip]
        let field = field(vec![
            0.0, 9.0, 9.0,
            3.0, 9.0, 9.0,
            9.0, 9.0, 9.0,
        ], 3, 3)?;
        let seeds = SeedClassifier::default().classify(&field)?;
        assert_eq!(seeds.num_seeds, 2);
        assert_eq!(seeds.distance.get([0, 0, 0]), Some(&0.0));
        assert_eq!(seeds.distance.get([1, 0, 0]), Some(&3.0));
        Ok(())
    }

    #[test]
    fn uniform_field_has_no_seeds() -> Result<(), GwdtError> {
        let field = field(vec![7.0; 16], 4, 4)?;
        for strategy in [
            ExecutionStrategy::Serial,
            ExecutionStrategy::ParallelElements,
            ExecutionStrategy::AutoRows(4),
        ] {
            let seeds = SeedClassifier::new(SeedThreshold::Mean, strategy).classify(&field)?;
            assert_eq!(seeds.num_seeds, 0);
            assert!(seeds.state.as_slice().iter().all(|s| *s == PixelState::Far));
        }
        Ok(())
    }

    #[test]
    fn fixed_threshold() -> Result<(), GwdtError> {
        let field = field((0..9).map(|v| v as f32).collect(), 3, 3)?;
        let classifier = SeedClassifier::new(SeedThreshold::Value(100.0), ExecutionStrategy::Serial);
        let seeds = classifier.classify(&field)?;
        assert_eq!(seeds.num_seeds, 9);
        assert_eq!(seeds.threshold, 100.0);

        let classifier = SeedClassifier::new(SeedThreshold::Value(0.0), ExecutionStrategy::Serial);
        assert_eq!(classifier.classify(&field)?.num_seeds, 0);
        Ok(())
    }
}
