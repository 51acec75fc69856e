//! Principal-axis extraction from per-voxel symmetric tensors.

use nalgebra::{DMatrix, SymmetricEigen};

/// Tensors whose largest absolute entry falls below this are treated as the
/// degenerate zero tensor.
const DEGENERATE_EPS: f32 = 1e-12;

/// Extract the unit eigenvector of the largest-magnitude eigenvalue of a
/// flattened row-major `ndim × ndim` symmetric matrix into `out`.
///
/// Returns `false` for a degenerate (zero) tensor, in which case `out` is the
/// zero vector. The output never contains NaN.
pub fn principal_axis(tensor: &[f32], ndim: usize, out: &mut [f32]) -> bool {
    debug_assert_eq!(tensor.len(), ndim * ndim);
    debug_assert_eq!(out.len(), ndim);

    if tensor.iter().all(|t| t.abs() <= DEGENERATE_EPS) {
        out.fill(0.0);
        return false;
    }
    if ndim == 1 {
        out[0] = 1.0;
        return true;
    }

    let eig = SymmetricEigen::new(DMatrix::from_row_slice(ndim, ndim, tensor));
    let mut principal = 0;
    for k in 1..ndim {
        if eig.eigenvalues[k].abs() > eig.eigenvalues[principal].abs() {
            principal = k;
        }
    }
    let axis = eig.eigenvectors.column(principal);
    let norm = axis.norm();
    if !norm.is_finite() || norm <= DEGENERATE_EPS {
        out.fill(0.0);
        return false;
    }
    for (o, v) in out.iter_mut().zip(axis.iter()) {
        *o = *v / norm;
    }
    true
}
