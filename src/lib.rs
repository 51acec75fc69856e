#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod field;
pub mod orientation;
pub mod region;
pub mod tensor;

// Building blocks: public so callers can run their own mappers/reducers, but
// more likely to shift than the filter surface above.
pub mod engine;
pub mod gradient;
pub mod smoothing;

// --- High-level re-exports -------------------------------------------------

// Main entry points: the two filters plus their shared parameters.
pub use crate::orientation::OrientationVectorFilter;
pub use crate::tensor::{StructureTensorFilter, TensorParams};

// Field containers and the region/engine vocabulary.
pub use crate::error::{EngineError, FilterError};
pub use crate::field::{
    Field, FieldGeometry, OrientationField, ScalarField, TensorField, VectorField,
};
pub use crate::region::Region;

// Trace returned by the traced entry points.
pub use crate::diagnostics::PipelineTrace;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use orient_field::prelude::*;
///
/// let geometry = FieldGeometry::new(vec![16, 16]);
/// let samples = (0..256).map(|i| (i % 16) as f32).collect();
/// let input = ScalarField::from_samples(geometry, samples);
///
/// let filter = OrientationVectorFilter::new(TensorParams::default().with_threads(2));
/// let orientation = filter.run(&input).unwrap();
/// assert_eq!(orientation.channels(), 2);
/// ```
pub mod prelude {
    pub use crate::field::{FieldGeometry, OrientationField, ScalarField};
    pub use crate::{OrientationVectorFilter, StructureTensorFilter, TensorParams};
}
