//! The five-stage structure-tensor pipeline.
//!
//! PreSmooth and PostSmooth run over the whole field because the Gaussian
//! support crosses region seams; tensor assembly and eigen-decomposition are
//! per-voxel pure and run through the map engine.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::debug;

use crate::diagnostics::{elapsed_ms, PipelineTrace};
use crate::engine::{map_field, RegionBlock, RegionMapper};
use crate::error::{EngineError, FilterError};
use crate::field::{Field, OrientationField, ScalarField, TensorField};
use crate::gradient::gradient;
use crate::smoothing::gaussian_smooth;
use crate::tensor::eigen::principal_axis;
use crate::tensor::TensorParams;

/// Per-voxel gradient outer product: `T[i][j] = g[i]·g[j]`.
struct OuterProductMapper {
    ndim: usize,
}

impl RegionMapper<f32, f32> for OuterProductMapper {
    fn map_region(
        &self,
        grad: &Field<f32>,
        block: &mut RegionBlock<f32>,
    ) -> Result<(), EngineError> {
        let d = self.ndim;
        let mut tensor = vec![0.0f32; d * d];
        let region = block.region().clone();
        region.for_each_index(|index| {
            let g = grad.sample(grad.linear(index));
            for i in 0..d {
                for j in 0..d {
                    tensor[i * d + j] = g[i] * g[j];
                }
            }
            block.write_voxel(index, &tensor);
        });
        Ok(())
    }
}

/// Per-voxel eigen-decomposition picking the dominant orientation axis.
struct PrincipalAxisMapper {
    ndim: usize,
    degenerate: AtomicUsize,
}

impl RegionMapper<f32, f32> for PrincipalAxisMapper {
    fn map_region(
        &self,
        tensor: &Field<f32>,
        block: &mut RegionBlock<f32>,
    ) -> Result<(), EngineError> {
        let mut axis = vec![0.0f32; self.ndim];
        let mut degenerate = 0usize;
        let region = block.region().clone();
        region.for_each_index(|index| {
            let t = tensor.sample(tensor.linear(index));
            if !principal_axis(t, self.ndim, &mut axis) {
                degenerate += 1;
            }
            block.write_voxel(index, &axis);
        });
        if degenerate > 0 {
            self.degenerate.fetch_add(degenerate, Ordering::Relaxed);
        }
        Ok(())
    }
}

/// Per-voxel structure-tensor estimator over an N-dimensional scalar field.
///
/// `tensor` stops after the smoothed tensor (stages 1–4); `run` adds the
/// eigen stage and yields the unit-vector orientation field.
#[derive(Clone, Debug, Default)]
pub struct StructureTensorFilter {
    params: TensorParams,
}

impl StructureTensorFilter {
    pub fn new(params: TensorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TensorParams {
        &self.params
    }

    /// Parameters are mutable between runs only; a run borrows the filter
    /// shared, freezing them for its duration.
    pub fn params_mut(&mut self) -> &mut TensorParams {
        &mut self.params
    }

    /// Stages 1–4: pre-smooth, gradient, tensor assembly, per-component
    /// post-smooth. The output holds a flattened row-major D×D symmetric
    /// matrix per voxel, with the input's extent, spacing, and origin.
    pub fn tensor(&self, input: &ScalarField) -> Result<TensorField, FilterError> {
        self.params.validate()?;
        let mut trace = PipelineTrace::for_input(input.geometry(), self.params.threads);
        let start = Instant::now();
        let tensor = self.smoothed_tensor(input, &mut trace)?;
        trace.total_ms = elapsed_ms(start);
        debug!("structure tensor stages 1-4: {trace:?}");
        Ok(tensor)
    }

    /// The full pipeline, yielding one unit orientation vector per voxel.
    ///
    /// Zero-tensor voxels receive the zero vector; their count lands in the
    /// trace of [`Self::run_traced`].
    pub fn run(&self, input: &ScalarField) -> Result<OrientationField, FilterError> {
        self.run_traced(input).map(|(field, _)| field)
    }

    /// Like [`Self::run`], additionally returning the per-stage trace.
    pub fn run_traced(
        &self,
        input: &ScalarField,
    ) -> Result<(OrientationField, PipelineTrace), FilterError> {
        self.params.validate()?;
        let total = Instant::now();
        let mut trace = PipelineTrace::for_input(input.geometry(), self.params.threads);

        let tensor = self.smoothed_tensor(input, &mut trace)?;

        let start = Instant::now();
        let ndim = input.geometry().ndim();
        let mapper = PrincipalAxisMapper {
            ndim,
            degenerate: AtomicUsize::new(0),
        };
        let orientation = map_field(&tensor, ndim, &mapper, self.params.threads)?;
        trace.eigen_ms = elapsed_ms(start);
        trace.degenerate_voxels = mapper.degenerate.into_inner();
        trace.total_ms = elapsed_ms(total);
        debug!("structure tensor pipeline: {trace:?}");
        Ok((orientation, trace))
    }

    fn smoothed_tensor(
        &self,
        input: &ScalarField,
        trace: &mut PipelineTrace,
    ) -> Result<TensorField, FilterError> {
        let ndim = input.geometry().ndim();

        let start = Instant::now();
        let smoothed = gaussian_smooth(input, self.params.sigma);
        trace.presmooth_ms = elapsed_ms(start);

        let start = Instant::now();
        let grad = gradient(&smoothed);
        trace.gradient_ms = elapsed_ms(start);
        drop(smoothed);

        let start = Instant::now();
        let mapper = OuterProductMapper { ndim };
        let mut tensor = map_field(&grad, ndim * ndim, &mapper, self.params.threads)?;
        trace.tensor_ms = elapsed_ms(start);
        drop(grad);

        // Each tensor component smooths independently as its own scalar
        // field; the order across components does not matter.
        let start = Instant::now();
        for c in 0..ndim * ndim {
            let component = tensor.extract_channel(c);
            let smoothed = gaussian_smooth(&component, self.params.sigma_outer);
            tensor.replace_channel(c, &smoothed)?;
        }
        trace.postsmooth_ms = elapsed_ms(start);

        Ok(tensor)
    }
}
