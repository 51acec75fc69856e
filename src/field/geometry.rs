//! Spatial metadata shared by every field derived from one input.

use crate::region::Region;
use serde::Serialize;

/// Per-axis extent plus the physical placement of the sample lattice.
///
/// Every stage output inherits the geometry of its input unchanged, so
/// extent, spacing, and origin survive the whole pipeline.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldGeometry {
    /// Number of samples along each axis.
    pub extent: Vec<usize>,
    /// World coordinate of the first sample along each axis.
    pub origin: Vec<f64>,
    /// World distance between neighbouring samples along each axis.
    pub spacing: Vec<f64>,
}

impl FieldGeometry {
    /// Geometry with unit spacing and a zero origin.
    pub fn new(extent: Vec<usize>) -> Self {
        let ndim = extent.len();
        Self {
            extent,
            origin: vec![0.0; ndim],
            spacing: vec![1.0; ndim],
        }
    }

    /// Replace the per-axis spacing.
    ///
    /// Panics if the length disagrees with the extent.
    pub fn with_spacing(mut self, spacing: Vec<f64>) -> Self {
        assert_eq!(spacing.len(), self.extent.len(), "spacing dimension mismatch");
        self.spacing = spacing;
        self
    }

    /// Replace the per-axis origin.
    ///
    /// Panics if the length disagrees with the extent.
    pub fn with_origin(mut self, origin: Vec<f64>) -> Self {
        assert_eq!(origin.len(), self.extent.len(), "origin dimension mismatch");
        self.origin = origin;
        self
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.extent.len()
    }

    /// Total number of voxels.
    pub fn num_samples(&self) -> usize {
        if self.extent.is_empty() {
            return 0;
        }
        self.extent.iter().product()
    }

    /// The full index domain as a region anchored at the origin.
    pub fn domain(&self) -> Region {
        Region::full(&self.extent)
    }

    /// Per-axis linear strides, axis 0 fastest.
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![0; self.ndim()];
        let mut step = 1;
        for (stride, &len) in strides.iter_mut().zip(self.extent.iter()) {
            *stride = step;
            step *= len;
        }
        strides
    }

    /// Linear voxel offset of an N-D index.
    pub fn linear_index(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.ndim());
        let mut offset = 0;
        let mut step = 1;
        for (&i, &len) in index.iter().zip(self.extent.iter()) {
            debug_assert!(i < len, "index {i} out of extent {len}");
            offset += i * step;
            step *= len;
        }
        offset
    }
}
