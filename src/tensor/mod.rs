//! Structure-tensor pipeline: smoothing, gradient, tensor assembly,
//! per-component smoothing, and principal-axis extraction.

pub mod eigen;
pub mod params;
pub mod pipeline;

pub use self::params::TensorParams;
pub use self::pipeline::StructureTensorFilter;
