//! Grey-weighted distance transform (GWDT).
//!
//! For every cell of a scalar intensity grid the transform computes the cheapest
//! 8-connected path cost to a seed set, where stepping onto a cell costs its intensity
//! times the step length (1 orthogonally, √2 diagonally).
//!
//! # Pipeline
//!
//! 1. [`GridField`] validates and holds the intensities.
//! 2. [`SeedClassifier`] marks cells strictly below the mean intensity as seeds, each
//!    starting at its own intensity rather than zero.
//! 3. [`DistanceSolver`] queues the interior cells touching a seed on a [`Frontier`] and
//!    relaxes until it is empty.
//! 4. [`normalize_distance`] rescales the result into `[0, 255]`.
//!
//! # Border cells
//!
//! The outer ring of the grid is never seeded onto the frontier. Under the default
//! [`BorderPolicy::SeedInterior`] it is still reached by relaxation from the interior;
//! [`BorderPolicy::Exclude`] keeps it out entirely. Either way a 3x3 grid with a single
//! seed in the centre leaves the whole ring at 0.
//!
//! # Example
//!
//! ```
//! use gwdt_image::{Image, ImageSize};
//! use gwdt_imgproc::gwdt::compute_gwdt;
//!
//! let image = Image::<u8, 1>::new(
//!     ImageSize { width: 3, height: 3 },
//!     vec![10, 10, 10, 10, 1, 10, 10, 10, 10],
//! ).unwrap();
//!
//! let out = compute_gwdt(&image).unwrap();
//! assert_eq!(out.as_slice(), &[0, 0, 0, 0, 128, 0, 0, 0, 0]);
//! ```

mod config;
mod error;
mod field;
mod frontier;
mod normalize;
mod prefilter;
mod seed;
mod solver;
mod state;

pub use config::{BorderPolicy, GwdtConfig, SeedThreshold};
pub use error::GwdtError;
pub use field::GridField;
pub use frontier::{Frontier, FrontierEntry};
pub use normalize::normalize_distance;
pub use prefilter::{Identity, Prefilter};
pub use seed::{SeedClassifier, Seeds};
pub use solver::{DistanceSolver, SolverStats};
pub use state::{
    is_border, neighbors, DistanceMap, Offset, PixelState, StateMap, NEIGHBORHOOD, SENTINEL,
};

use gwdt_image::{Image, ImageDtype};

/// Raw output of the transform before normalization.
#[derive(Debug, Clone)]
pub struct DistanceField {
    /// Converged distances, [`SENTINEL`] where no seed was reached.
    ///
    /// Each value is the `f64` path cost rounded to `f32`.
    pub distance: DistanceMap,
    /// Final per-cell states.
    pub state: StateMap,
    /// Number of seed cells.
    pub num_seeds: usize,
    /// Solver counters.
    pub stats: SolverStats,
}

/// Compute the normalized grey-weighted distance transform with the default configuration.
///
/// # Arguments
///
/// * `src` - Single channel intensities, at least 3x3, finite and non-negative.
///
/// # Returns
///
/// An 8-bit image of the same size holding the normalized distances.
///
/// # Errors
///
/// Returns [`GwdtError::InvalidDimensions`] if the grid is smaller than 3x3 and
/// [`GwdtError::InvalidIntensity`] if an intensity is negative or not finite.
pub fn compute_gwdt<T: ImageDtype>(src: &Image<T, 1>) -> Result<Image<u8, 1>, GwdtError> {
    compute_gwdt_with_config(src, &GwdtConfig::default())
}

/// Compute the normalized grey-weighted distance transform.
///
/// See [`compute_gwdt`].
pub fn compute_gwdt_with_config<T: ImageDtype>(
    src: &Image<T, 1>,
    config: &GwdtConfig,
) -> Result<Image<u8, 1>, GwdtError> {
    let field = compute_distance_map(src, config)?;
    normalize_distance(&field.distance, config.strategy)
}

/// Run `prefilter` over the intensities, then compute the normalized transform.
///
/// # Errors
///
/// Returns [`GwdtError::SizeMismatch`] if the prefilter changes the grid size, plus the
/// errors of [`compute_gwdt`].
pub fn compute_gwdt_prefiltered<T: ImageDtype, P: Prefilter>(
    src: &Image<T, 1>,
    prefilter: &P,
    config: &GwdtConfig,
) -> Result<Image<u8, 1>, GwdtError> {
    let mut intensity = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    crate::parallel::par_iter_rows_val(src, &mut intensity, |s, d| *d = (*s).into());

    let filtered = prefilter.apply(&intensity)?;
    if filtered.size() != src.size() {
        return Err(GwdtError::SizeMismatch {
            expected: src.size(),
            actual: filtered.size(),
        });
    }

    compute_gwdt_with_config(&filtered, config)
}

/// Compute the raw grey-weighted distance field.
///
/// # Errors
///
/// See [`compute_gwdt`].
pub fn compute_distance_map<T: ImageDtype>(
    src: &Image<T, 1>,
    config: &GwdtConfig,
) -> Result<DistanceField, GwdtError> {
    let field = GridField::new(src)?;

    let Seeds {
        mut state,
        mut distance,
        num_seeds,
        ..
    } = SeedClassifier::new(config.seed_threshold, config.strategy).classify(&field)?;

    let stats = DistanceSolver::new(
        &field,
        &mut state,
        &mut distance,
        config.border,
        config.skip_settled,
    )?
    .solve();

    log::debug!(
        "gwdt {}: {} seeds, {} pushes, {} pops ({} stale), {} updates",
        field.size(),
        num_seeds,
        stats.pushes,
        stats.pops,
        stats.stale,
        stats.updates
    );

    if distance.as_slice().iter().all(|d| !d.is_finite()) {
        log::warn!("gwdt {}: no seed reached, distance field is empty", field.size());
    }

    Ok(DistanceField {
        distance,
        state,
        num_seeds,
        stats,
    })
}
