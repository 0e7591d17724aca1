use gwdt_image::ImageError;

use super::config::BorderPolicy;
use super::error::GwdtError;
use super::field::GridField;
use super::frontier::Frontier;
use super::state::{neighbors, DistanceMap, PixelState, StateMap};

/// Counters collected while relaxing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Cells marked Trial while seeding the frontier.
    pub seeded: usize,
    /// Total frontier insertions, seeding included.
    pub pushes: usize,
    /// Total frontier removals.
    pub pops: usize,
    /// Popped entries whose distance was above the cell's current distance.
    pub stale: usize,
    /// Successful relaxations.
    pub updates: usize,
}

/// Label-correcting shortest path solver over the 8-connected pixel grid.
///
/// Borrows the state and distance buffers exclusively for the duration of a transform
/// and owns its frontier. The intensity field is only read.
///
/// Moving onto a cell costs that cell's intensity times the step length, so with
/// non-negative intensities the relaxation loop terminates with minimum path costs.
/// Path costs are accumulated and compared in `f64`; the distance buffer receives
/// each accepted cost rounded to `f32`.
pub struct DistanceSolver<'a> {
    field: &'a GridField,
    state: &'a mut StateMap,
    distance: &'a mut DistanceMap,
    path: Vec<f64>,
    frontier: Frontier,
    border: BorderPolicy,
    skip_settled: bool,
    stats: SolverStats,
}

impl<'a> DistanceSolver<'a> {
    /// Create a solver over initialized buffers, as produced by
    /// [`super::SeedClassifier::classify`].
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidImageSize`] if `state` or `distance` does not have
    /// the size of `field`.
    pub fn new(
        field: &'a GridField,
        state: &'a mut StateMap,
        distance: &'a mut DistanceMap,
        border: BorderPolicy,
        skip_settled: bool,
    ) -> Result<Self, GwdtError> {
        if field.size() != state.size() {
            return Err(ImageError::InvalidImageSize(
                field.cols(),
                field.rows(),
                state.width(),
                state.height(),
            )
            .into());
        }

        if field.size() != distance.size() {
            return Err(ImageError::InvalidImageSize(
                field.cols(),
                field.rows(),
                distance.width(),
                distance.height(),
            )
            .into());
        }

        let path = distance.as_slice().iter().map(|&d| f64::from(d)).collect();

        Ok(Self {
            field,
            state,
            distance,
            path,
            frontier: Frontier::new(),
            border,
            skip_settled,
            stats: SolverStats::default(),
        })
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.field.cols() + col
    }

    /// Queue every interior `Far` cell touching an `Alive` cell.
    ///
    /// Such a cell becomes `Trial` with its own intensity as distance. The outer ring
    /// is never seeded. Returns the number of seeded cells.
    pub fn seed_frontier(&mut self) -> usize {
        let (rows, cols) = (self.field.rows(), self.field.cols());
        let mut seeded = 0;

        for i in 1..rows - 1 {
            for j in 1..cols - 1 {
                let idx = self.idx(i, j);
                if self.state.as_slice()[idx] != PixelState::Far {
                    continue;
                }

                let touches_seed = neighbors(i, j, rows, cols).any(|(ni, nj, _)| {
                    self.state.as_slice()[self.idx(ni, nj)] == PixelState::Alive
                });
                if !touches_seed {
                    continue;
                }

                let d = self.field.at(i, j);
                self.state.as_slice_mut()[idx] = PixelState::Trial;
                self.distance.as_slice_mut()[idx] = d;
                self.path[idx] = f64::from(d);
                self.frontier.push(f64::from(d), i, j);
                seeded += 1;
            }
        }

        self.stats.seeded += seeded;
        self.stats.pushes = self.frontier.pushes();
        log::debug!("seeded frontier with {} cells", seeded);
        seeded
    }

    /// Pop entries until the frontier is empty, relaxing the neighbors of each.
    ///
    /// A neighbor is updated when `popped distance + intensity * step` is strictly below
    /// its current distance; it is then marked `Trial` and queued again even if it
    /// already has entries pending. Returns the number of updates made by this call.
    pub fn relax(&mut self) -> usize {
        let (rows, cols) = (self.field.rows(), self.field.cols());
        let mut updates = 0;

        while let Some(entry) = self.frontier.pop() {
            self.stats.pops += 1;

            if entry.distance > self.path[self.idx(entry.row, entry.col)] {
                self.stats.stale += 1;
                if self.skip_settled {
                    continue;
                }
            }

            for (ni, nj, step) in neighbors(entry.row, entry.col, rows, cols) {
                if self.border == BorderPolicy::Exclude && self.field.is_border(ni, nj) {
                    continue;
                }

                let nidx = self.idx(ni, nj);
                let candidate = entry.distance + f64::from(self.field.at(ni, nj)) * step;
                if candidate < self.path[nidx] {
                    self.path[nidx] = candidate;
                    self.distance.as_slice_mut()[nidx] = candidate as f32;
                    self.state.as_slice_mut()[nidx] = PixelState::Trial;
                    self.frontier.push(candidate, ni, nj);
                    updates += 1;
                }
            }
        }

        self.stats.updates += updates;
        self.stats.pushes = self.frontier.pushes();
        updates
    }

    /// Queue every `Trial` cell again at its current distance and relax.
    ///
    /// Every `Trial` cell has already been expanded at its final distance, so after
    /// [`DistanceSolver::relax`] has converged this performs no update and returns 0.
    pub fn relax_from_settled(&mut self) -> usize {
        let cols = self.field.cols();
        for (idx, state) in self.state.as_slice().iter().enumerate() {
            if *state == PixelState::Trial {
                self.frontier.push(self.path[idx], idx / cols, idx % cols);
            }
        }
        self.relax()
    }

    /// Seed the frontier and relax until it is empty.
    pub fn solve(mut self) -> SolverStats {
        self.seed_frontier();
        self.relax();
        self.stats
    }

    /// Counters collected so far.
    pub fn stats(&self) -> SolverStats {
        self.stats
    }
}
