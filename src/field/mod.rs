//! Runtime-dimensioned sample containers for the pipeline stages.

pub mod geometry;
pub mod samples;

pub use self::geometry::FieldGeometry;
pub use self::samples::Field;

/// Single-component samples; the pipeline input.
pub type ScalarField = Field<f32>;

/// D-component samples; the gradient stage output.
pub type VectorField = Field<f32>;

/// D²-component samples holding a flattened row-major D×D matrix per voxel.
pub type TensorField = Field<f32>;

/// Unit-norm D-component samples; the pipeline output.
pub type OrientationField = Field<f32>;
