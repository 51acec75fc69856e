//! Output-oriented façade over the structure-tensor pipeline.

use crate::diagnostics::PipelineTrace;
use crate::error::FilterError;
use crate::field::{OrientationField, ScalarField};
use crate::tensor::{StructureTensorFilter, TensorParams};

/// Maps a scalar field to the per-voxel dominant-orientation unit vectors.
///
/// Runs exactly the pipeline of [`StructureTensorFilter`]; this type only
/// names the principal-orientation output directly instead of the
/// intermediate tensor.
#[derive(Clone, Debug, Default)]
pub struct OrientationVectorFilter {
    inner: StructureTensorFilter,
}

impl OrientationVectorFilter {
    pub fn new(params: TensorParams) -> Self {
        Self {
            inner: StructureTensorFilter::new(params),
        }
    }

    pub fn params(&self) -> &TensorParams {
        self.inner.params()
    }

    pub fn params_mut(&mut self) -> &mut TensorParams {
        self.inner.params_mut()
    }

    /// Compute the orientation field; every sample is unit-norm except the
    /// zero-vector fallback at degenerate voxels.
    pub fn run(&self, input: &ScalarField) -> Result<OrientationField, FilterError> {
        self.inner.run(input)
    }

    /// Like [`Self::run`], additionally returning the per-stage trace.
    pub fn run_traced(
        &self,
        input: &ScalarField,
    ) -> Result<(OrientationField, PipelineTrace), FilterError> {
        self.inner.run_traced(input)
    }
}
