//! Per-run pipeline trace: stage latencies and degenerate-voxel accounting.

use std::time::Instant;

use serde::Serialize;

use crate::field::FieldGeometry;

/// Stage-level timings for one filter run.
#[derive(Clone, Debug, Serialize)]
pub struct PipelineTrace {
    /// Extent of the input field.
    pub extent: Vec<usize>,
    /// Worker threads requested for the per-voxel stages.
    pub threads: usize,
    pub presmooth_ms: f64,
    pub gradient_ms: f64,
    pub tensor_ms: f64,
    pub postsmooth_ms: f64,
    pub eigen_ms: f64,
    pub total_ms: f64,
    /// Voxels whose tensor was zero and received the zero-vector fallback.
    pub degenerate_voxels: usize,
}

impl PipelineTrace {
    pub(crate) fn for_input(geometry: &FieldGeometry, threads: usize) -> Self {
        Self {
            extent: geometry.extent.clone(),
            threads,
            presmooth_ms: 0.0,
            gradient_ms: 0.0,
            tensor_ms: 0.0,
            postsmooth_ms: 0.0,
            eigen_ms: 0.0,
            total_ms: 0.0,
            degenerate_voxels: 0,
        }
    }
}

pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
