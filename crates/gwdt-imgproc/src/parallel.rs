use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gwdt_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride for AutoRows must be valid.
    #[error("row stride must be > 0 for AutoRows strategy")]
    InvalidRowStride(usize),

    /// Input and output sizes do not match.
    #[error("source and destination slices must have the same length")]
    SizeMismatch,
}

/// Controls how the data-parallel phases of an operation are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process every element in parallel.
    ///
    /// This maximizes parallelism but may have overhead for small operations.
    #[default]
    ParallelElements,

    /// Use the global Rayon thread pool to process rows (chunks) in parallel.
    ///
    /// You must provide the row stride (width * channels).
    /// This is often more cache-friendly than [`ExecutionStrategy::ParallelElements`].
    AutoRows(usize),

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Apply a function to each pixel of `src`, writing into the matching pixel of `dst`.
///
/// Rows are processed in parallel on the global Rayon pool.
pub fn par_iter_rows_val<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&T1, &mut T2) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    let cols = src.cols();
    src.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .iter()
                .zip(dst_chunk.iter_mut())
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Trait to execute operations on a slice with a given strategy.
pub trait ExecuteExt<T> {
    /// Execute an operation on the slice with the given strategy.
    ///
    /// # Arguments
    ///
    /// * `strategy` - The execution strategy.
    /// * `dst` - The destination slice.
    /// * `op` - The operation to perform on each (source, destination) element pair.
    ///
    /// # Returns
    ///
    /// A result indicating success or failure.
    fn execute_with<U, F>(
        &self,
        strategy: ExecutionStrategy,
        dst: &mut [U],
        op: F,
    ) -> Result<(), ParallelError>
    where
        U: Send,
        F: Fn((&T, &mut U)) + Sync + Send;
}

impl<T: Sync> ExecuteExt<T> for &[T] {
    fn execute_with<U, F>(
        &self,
        strategy: ExecutionStrategy,
        dst: &mut [U],
        op: F,
    ) -> Result<(), ParallelError>
    where
        U: Send,
        F: Fn((&T, &mut U)) + Sync + Send,
    {
        if self.len() != dst.len() {
            return Err(ParallelError::SizeMismatch);
        }

        match strategy {
            ExecutionStrategy::Serial => {
                self.iter().zip(dst.iter_mut()).for_each(op);
            }
            ExecutionStrategy::ParallelElements => {
                self.par_iter().zip(dst.par_iter_mut()).for_each(op);
            }
            ExecutionStrategy::AutoRows(stride) => {
                if stride == 0 {
                    return Err(ParallelError::InvalidRowStride(stride));
                }
                self.par_chunks(stride)
                    .zip(dst.par_chunks_mut(stride))
                    .for_each(|(src_row, dst_row)| {
                        src_row.iter().zip(dst_row.iter_mut()).for_each(&op);
                    });
            }
            ExecutionStrategy::Fixed(n) => {
                let pool = build_pool(n)?;
                pool.install(|| {
                    self.par_iter().zip(dst.par_iter_mut()).for_each(op);
                });
            }
        }
        Ok(())
    }
}

/// Reduce a slice to a single value with the given strategy.
///
/// `map` converts each element, `reduce` combines two partial results and must be
/// associative with `identity` as its neutral element.
pub fn reduce_with<T, U, M, R>(
    src: &[T],
    strategy: ExecutionStrategy,
    identity: U,
    map: M,
    reduce: R,
) -> Result<U, ParallelError>
where
    T: Sync,
    U: Copy + Send + Sync,
    M: Fn(&T) -> U + Sync + Send,
    R: Fn(U, U) -> U + Sync + Send,
{
    let result = match strategy {
        ExecutionStrategy::Serial => src.iter().map(map).fold(identity, reduce),
        ExecutionStrategy::ParallelElements => {
            src.par_iter().map(map).reduce(|| identity, reduce)
        }
        ExecutionStrategy::AutoRows(stride) => {
            if stride == 0 {
                return Err(ParallelError::InvalidRowStride(stride));
            }
            src.par_chunks(stride)
                .map(|row| row.iter().map(&map).fold(identity, &reduce))
                .reduce(|| identity, &reduce)
        }
        ExecutionStrategy::Fixed(n) => {
            let pool = build_pool(n)?;
            pool.install(|| src.par_iter().map(map).reduce(|| identity, reduce))
        }
    };
    Ok(result)
}

fn build_pool(n: usize) -> Result<rayon::ThreadPool, ParallelError> {
    if n == 0 {
        return Err(ParallelError::InvalidThreadCount(n));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build()
        .map_err(|e| ParallelError::BuildError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gwdt_image::{ImageError, ImageSize};

    #[test]
    fn test_execute_serial() -> Result<(), ParallelError> {
        let src = vec![1, 2, 3, 4];
        let mut dst = vec![0; 4];
        src.as_slice()
            .execute_with(ExecutionStrategy::Serial, &mut dst, |(s, d)| *d = *s * 2)?;
        assert_eq!(dst, vec![2, 4, 6, 8]);
        Ok(())
    }

    #[test]
    fn test_execute_parallel_elements_changes_type() -> Result<(), ParallelError> {
        let src = vec![1.0f32, 2.5, 3.0, 4.0];
        let mut dst = vec![false; 4];
        src.as_slice()
            .execute_with(ExecutionStrategy::ParallelElements, &mut dst, |(s, d)| {
                *d = *s < 2.6
            })?;
        assert_eq!(dst, vec![true, true, false, false]);
        Ok(())
    }

    #[test]
    fn test_execute_auto_rows() -> Result<(), ParallelError> {
        let src = vec![1, 2, 3, 4];
        let mut dst = vec![0; 4];
        src.as_slice()
            .execute_with(ExecutionStrategy::AutoRows(2), &mut dst, |(s, d)| {
                *d = *s * 2
            })?;
        assert_eq!(dst, vec![2, 4, 6, 8]);
        Ok(())
    }

    #[test]
    fn test_execute_auto_rows_invalid() {
        let src = vec![1];
        let mut dst = vec![0];
        let res =
            src.as_slice()
                .execute_with(ExecutionStrategy::AutoRows(0), &mut dst, |(_, _)| {});
        assert!(matches!(res, Err(ParallelError::InvalidRowStride(0))));
    }

    #[test]
    fn test_execute_size_mismatch() {
        let src = vec![1, 2];
        let mut dst = vec![0];
        let res = src
            .as_slice()
            .execute_with(ExecutionStrategy::Serial, &mut dst, |(_, _)| {});
        assert_eq!(res, Err(ParallelError::SizeMismatch));
    }

    #[test]
    fn test_execute_fixed() -> Result<(), ParallelError> {
        let src = vec![1, 2, 3, 4];
        let mut dst = vec![0; 4];
        src.as_slice()
            .execute_with(ExecutionStrategy::Fixed(2), &mut dst, |(s, d)| *d = *s * 2)?;
        assert_eq!(dst, vec![2, 4, 6, 8]);

        let res = src
            .as_slice()
            .execute_with(ExecutionStrategy::Fixed(0), &mut dst, |(_, _)| {});
        assert!(matches!(res, Err(ParallelError::InvalidThreadCount(0))));
        Ok(())
    }

    #[test]
    fn test_reduce_strategies_agree() -> Result<(), ParallelError> {
        let src = (0..100).map(|x| x as f32).collect::<Vec<_>>();
        for strategy in [
            ExecutionStrategy::Serial,
            ExecutionStrategy::ParallelElements,
            ExecutionStrategy::AutoRows(7),
            ExecutionStrategy::Fixed(3),
        ] {
            let max = reduce_with(&src, strategy, 0.0f32, |&x| x, f32::max)?;
            assert_eq!(max, 99.0);
            let sum = reduce_with(&src, strategy, 0.0f64, |&x| x as f64, |a, b| a + b)?;
            assert_eq!(sum, 4950.0);
        }
        Ok(())
    }

    #[test]
    fn test_par_iter_rows_val() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![1, 2, 3, 4],
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
        par_iter_rows_val(&src, &mut dst, |s, d| *d = *s as f32 * 0.5);
        assert_eq!(dst.as_slice(), &[0.5, 1.0, 1.5, 2.0]);
        Ok(())
    }
}
