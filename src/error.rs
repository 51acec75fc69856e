//! Error types for the region engine and the tensor pipeline.

use thiserror::Error;

/// Failures raised by the partitioner and the map/reduce engines.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller asked for zero worker threads.
    #[error("thread count must be at least 1")]
    ZeroThreadCount,

    /// A region extends outside the field domain it is applied to.
    #[error("region (offset {offset:?}, size {size:?}) lies outside domain extent {extent:?}")]
    RegionOutOfDomain {
        offset: Vec<usize>,
        size: Vec<usize>,
        extent: Vec<usize>,
    },

    /// Two fields that must share a geometry disagree in extent.
    #[error("field extents disagree: expected {expected:?}, got {actual:?}")]
    ExtentMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A worker thread panicked; surfaced after all siblings joined.
    #[error("worker thread panicked")]
    WorkerPanic,
}

/// Failures raised by the structure-tensor and orientation filters.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A smoothing sigma was zero or negative.
    #[error("{name} must be positive, got {value}")]
    NonPositiveSigma { name: &'static str, value: f32 },

    /// An engine failure observed while running a pipeline stage.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
