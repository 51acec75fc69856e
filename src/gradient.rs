//! Spacing-aware per-axis partial derivatives of a scalar field.

use crate::field::{ScalarField, VectorField};

/// Compute the D-component gradient vector field of a scalar field.
///
/// Interior samples use central differences; boundary samples fall back to
/// the one-sided difference so a linear ramp keeps its exact slope all the
/// way to the edge. Differences are divided by the world spacing of the axis.
/// An axis of extent 1 contributes a zero component.
pub fn gradient(input: &ScalarField) -> VectorField {
    debug_assert_eq!(input.channels(), 1, "gradient expects a scalar field");
    let geometry = input.geometry();
    let ndim = geometry.ndim();
    let strides = geometry.strides();
    let src = input.as_slice();

    let mut output = input.like(ndim);
    {
        let out = output.as_mut_slice();
        geometry.domain().for_each_index(|index| {
            let base: usize = index
                .iter()
                .zip(strides.iter())
                .map(|(&i, &s)| i * s)
                .sum();
            for axis in 0..ndim {
                let len = geometry.extent[axis];
                let stride = strides[axis];
                let h = geometry.spacing[axis] as f32;
                let i = index[axis];
                let d = if len < 2 {
                    0.0
                } else if i == 0 {
                    (src[base + stride] - src[base]) / h
                } else if i == len - 1 {
                    (src[base] - src[base - stride]) / h
                } else {
                    (src[base + stride] - src[base - stride]) / (2.0 * h)
                };
                out[base * ndim + axis] = d;
            }
        });
    }
    output
}
