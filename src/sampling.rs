use std::collections::BTreeSet;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SamplingError {
    #[error("requested {requested} distinct elements from a pool of {pool}")]
    RequestExceedsPool { requested: usize, pool: usize },
    #[error("index scale {scale} cannot reach the top of a pool of {pool}")]
    ScaleBelowPool { scale: usize, pool: usize },
}

/// Draws a subset of pool indices without replacement by pushing a uniform
/// variate through the quadratic transform `floor(scale * u^2)` and rejecting
/// draws past the end of the pool. Both unsatisfiable shapes (more elements
/// than the pool holds, or a scale too small to ever emit the top index) are
/// rejected up front so the acceptance loop always terminates.
#[derive(Debug)]
pub struct SkewedSampler {
    scale: usize,
    rng: StdRng,
}

impl SkewedSampler {
    pub fn new(scale: usize, seed: u64) -> Self {
        Self {
            scale,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns exactly `k` distinct indices in `[0, pool_len)`, ascending.
    pub fn sample_indices(
        &mut self,
        pool_len: usize,
        k: usize,
    ) -> Result<Vec<usize>, SamplingError> {
        if k > pool_len {
            return Err(SamplingError::RequestExceedsPool {
                requested: k,
                pool: pool_len,
            });
        }
        if self.scale < pool_len {
            return Err(SamplingError::ScaleBelowPool {
                scale: self.scale,
                pool: pool_len,
            });
        }

        let mut picked: BTreeSet<usize> = BTreeSet::new();
        while picked.len() < k {
            let idx = self.draw_index();
            if idx < pool_len {
                picked.insert(idx);
            }
        }
        Ok(picked.into_iter().collect())
    }

    /// Materializes the sampled elements in ascending original order.
    pub fn sample<T: Clone>(&mut self, pool: &[T], k: usize) -> Result<Vec<T>, SamplingError> {
        let indices = self.sample_indices(pool.len(), k)?;
        Ok(indices.into_iter().map(|i| pool[i].clone()).collect())
    }

    fn draw_index(&mut self) -> usize {
        let u: f64 = self.rng.gen_range(0.0..1.0);
        (self.scale as f64 * u * u) as usize
    }
}
