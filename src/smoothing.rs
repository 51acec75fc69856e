//! Separable Gaussian smoothing over N-dimensional scalar fields.
//!
//! The kernel is a sampled, normalized Gaussian with a 3-sigma support
//! radius. Sigma is given in world units and divided by the per-axis spacing,
//! so anisotropic lattices smooth isotropically in world space. Border
//! samples clamp to the field extents.

use crate::field::ScalarField;

/// Normalized 1-D Gaussian taps for a sigma given in sample units.
///
/// A non-positive or vanishing sigma degenerates to the single-tap identity
/// kernel; filter-level validation rejects non-positive sigmas before this is
/// reached.
pub fn gaussian_taps(sigma: f64) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (3.0 * sigma).ceil() as usize;
    if radius == 0 {
        return vec![1.0];
    }
    let inv_two_sigma_sq = 1.0 / (2.0 * sigma * sigma);
    let mut taps = Vec::with_capacity(2 * radius + 1);
    let mut sum = 0.0f64;
    for k in -(radius as i64)..=radius as i64 {
        let w = (-(k * k) as f64 * inv_two_sigma_sq).exp();
        sum += w;
        taps.push(w);
    }
    taps.into_iter().map(|w| (w / sum) as f32).collect()
}

/// Smooth a scalar field with the same world-space sigma along every axis.
///
/// Runs one separable convolution pass per axis, ping-ponging two buffers.
/// The output preserves extent, spacing, and origin.
pub fn gaussian_smooth(input: &ScalarField, sigma: f32) -> ScalarField {
    debug_assert_eq!(input.channels(), 1, "smoothing expects a scalar field");
    let geometry = input.geometry().clone();
    let extent = geometry.extent.clone();
    let strides = geometry.strides();

    let mut src = input.as_slice().to_vec();
    let mut dst = vec![0.0f32; src.len()];
    let mut touched = false;

    for axis in 0..extent.len() {
        // A singleton axis has nothing to convolve; clamped taps would only
        // multiply the sample by the rounded f32 tap sum.
        if extent[axis] < 2 {
            continue;
        }
        let taps = gaussian_taps(sigma as f64 / geometry.spacing[axis]);
        if taps.len() == 1 {
            continue;
        }
        convolve_axis(&src, &extent, &strides, axis, &taps, &mut dst);
        std::mem::swap(&mut src, &mut dst);
        touched = true;
    }

    if !touched {
        return input.clone();
    }
    ScalarField::from_samples(geometry, src)
}

/// Convolve along one axis with clamped borders.
fn convolve_axis(
    src: &[f32],
    extent: &[usize],
    strides: &[usize],
    axis: usize,
    taps: &[f32],
    dst: &mut [f32],
) {
    let len = extent[axis] as i64;
    let stride = strides[axis];
    let radius = (taps.len() / 2) as i64;

    crate::region::Region::full(extent).for_each_index(|index| {
        let base: usize = index
            .iter()
            .zip(strides.iter())
            .map(|(&i, &s)| i * s)
            .sum();
        let line_start = base - index[axis] * stride;
        let mut acc = 0.0f32;
        for (k, &w) in taps.iter().enumerate() {
            let pos = (index[axis] as i64 + k as i64 - radius).clamp(0, len - 1) as usize;
            acc += w * src[line_start + pos * stride];
        }
        dst[base] = acc;
    });
}
