//! Configuration for the structure-tensor and orientation filters.

use serde::Serialize;

use crate::error::{EngineError, FilterError};

/// Knobs for one pipeline run.
///
/// Parameters are free to change between runs; a run reads them through a
/// shared borrow, so they are frozen while it executes.
#[derive(Clone, Debug, Serialize)]
pub struct TensorParams {
    /// Pre-smoothing sigma, in world units. Must be positive.
    pub sigma: f32,
    /// Per-component tensor smoothing sigma, in world units. Must be positive.
    pub sigma_outer: f32,
    /// Fork-join worker count for the per-voxel stages. Must be at least 1.
    pub threads: usize,
}

impl Default for TensorParams {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            sigma_outer: 1.0,
            threads: default_threads(),
        }
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl TensorParams {
    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_sigma_outer(mut self, sigma_outer: f32) -> Self {
        self.sigma_outer = sigma_outer;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Reject configurations the pipeline must not run with.
    ///
    /// A NaN sigma fails the positivity check as well.
    pub fn validate(&self) -> Result<(), FilterError> {
        if !(self.sigma > 0.0) {
            return Err(FilterError::NonPositiveSigma {
                name: "sigma",
                value: self.sigma,
            });
        }
        if !(self.sigma_outer > 0.0) {
            return Err(FilterError::NonPositiveSigma {
                name: "sigma_outer",
                value: self.sigma_outer,
            });
        }
        if self.threads == 0 {
            return Err(EngineError::ZeroThreadCount.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(TensorParams::default().validate().is_ok());
    }

    #[test]
    fn non_positive_sigmas_are_rejected() {
        let params = TensorParams::default().with_sigma(0.0);
        assert!(matches!(
            params.validate(),
            Err(FilterError::NonPositiveSigma { name: "sigma", .. })
        ));
        let params = TensorParams::default().with_sigma_outer(-1.0);
        assert!(matches!(
            params.validate(),
            Err(FilterError::NonPositiveSigma {
                name: "sigma_outer",
                ..
            })
        ));
        let params = TensorParams::default().with_sigma(f32::NAN);
        assert!(params.validate().is_err());
    }

    #[test]
    fn zero_threads_are_rejected() {
        let params = TensorParams::default().with_threads(0);
        assert!(matches!(
            params.validate(),
            Err(FilterError::Engine(EngineError::ZeroThreadCount))
        ));
    }
}
