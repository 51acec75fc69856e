//! Owned sample storage with interleaved channels, row-major with axis 0
//! contiguous.
//!
//! A field is exclusively owned by the stage that created it; workers share it
//! read-only by reference. Voxel `i` occupies
//! `data[i * channels .. (i + 1) * channels]`.

use crate::error::EngineError;
use crate::field::FieldGeometry;

/// N-dimensional sample array with a fixed channel count per voxel.
#[derive(Clone, Debug, PartialEq)]
pub struct Field<T> {
    geometry: FieldGeometry,
    channels: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Field<T> {
    /// Allocate a zero-initialized field.
    pub fn new(geometry: FieldGeometry, channels: usize) -> Self {
        assert!(channels > 0, "field needs at least one channel");
        let len = geometry.num_samples() * channels;
        Self {
            geometry,
            channels,
            data: vec![T::default(); len],
        }
    }

    /// Allocate a field sharing this field's geometry, with `channels`
    /// components per voxel.
    pub fn like(&self, channels: usize) -> Self {
        Self::new(self.geometry.clone(), channels)
    }
}

impl<T: Copy> Field<T> {
    /// Build a scalar (single-channel) field from an existing buffer.
    ///
    /// Panics if the buffer length disagrees with the geometry.
    pub fn from_samples(geometry: FieldGeometry, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            geometry.num_samples(),
            "sample buffer length disagrees with geometry"
        );
        Self {
            geometry,
            channels: 1,
            data,
        }
    }

    #[inline]
    pub fn geometry(&self) -> &FieldGeometry {
        &self.geometry
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of voxels (not scalar elements).
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.geometry.num_samples()
    }

    /// Linear voxel offset of an N-D index.
    #[inline]
    pub fn linear(&self, index: &[usize]) -> usize {
        self.geometry.linear_index(index)
    }

    /// Channel `c` at N-D index `index`.
    #[inline]
    pub fn get(&self, index: &[usize], c: usize) -> T {
        self.data[self.linear(index) * self.channels + c]
    }

    /// Set channel `c` at N-D index `index`.
    #[inline]
    pub fn set(&mut self, index: &[usize], c: usize, value: T) {
        let i = self.linear(index) * self.channels + c;
        self.data[i] = value;
    }

    /// All channels of the voxel at linear offset `voxel`.
    #[inline]
    pub fn sample(&self, voxel: usize) -> &[T] {
        &self.data[voxel * self.channels..(voxel + 1) * self.channels]
    }

    /// Mutable access to all channels of the voxel at linear offset `voxel`.
    #[inline]
    pub fn sample_mut(&mut self, voxel: usize) -> &mut [T] {
        &mut self.data[voxel * self.channels..(voxel + 1) * self.channels]
    }

    /// Flat element storage, voxels in linear order, channels interleaved.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Copy channel `c` out into a standalone single-channel field.
    pub fn extract_channel(&self, c: usize) -> Field<T> {
        assert!(c < self.channels, "channel {c} out of {}", self.channels);
        let data = self
            .data
            .iter()
            .skip(c)
            .step_by(self.channels)
            .copied()
            .collect();
        Field {
            geometry: self.geometry.clone(),
            channels: 1,
            data,
        }
    }

    /// Overwrite channel `c` from a single-channel field of equal extent.
    pub fn replace_channel(&mut self, c: usize, src: &Field<T>) -> Result<(), EngineError> {
        assert!(c < self.channels, "channel {c} out of {}", self.channels);
        if src.geometry.extent != self.geometry.extent || src.channels != 1 {
            return Err(EngineError::ExtentMismatch {
                expected: self.geometry.extent.clone(),
                actual: src.geometry.extent.clone(),
            });
        }
        for (dst, &v) in self
            .data
            .iter_mut()
            .skip(c)
            .step_by(self.channels)
            .zip(src.data.iter())
        {
            *dst = v;
        }
        Ok(())
    }
}
