//! Eigenvalue decomposition
//!
//! Ordering convention, kept stable across releases:
//! - symmetric input: the order of nalgebra's `symmetric_eigen`, with real
//!   eigenvalues and orthonormal eigenvectors;
//! - any other input: the order of the diagonal blocks of nalgebra's real
//!   Schur form (`complex_eigenvalues`). A complex-conjugate pair appears as
//!   two adjacent entries.
//!
//! No sorting by magnitude is applied.

use crate::helpers::{check_square, is_symmetric};
use crate::result::EigenDecomposition;
use matrix_core::{Matrix, MatrixError};
use nalgebra::{Complex, DMatrix, DVector};
use tracing::{trace, warn};

/// Relative distance under which two eigenvalues count as repeats
const CLUSTER_EPS: f64 = 1e-8;

/// Relative singular value under which a direction lies in the null space
const NULL_EPS: f64 = 1e-8;

/// Eigen-decomposition of a square matrix
pub fn eigen(m: &Matrix, name: &str, symmetry_eps: f64) -> Result<EigenDecomposition, MatrixError> {
    check_square(m, name, "eigen")?;
    let a = m.as_dmatrix();

    if is_symmetric(a, symmetry_eps) {
        trace!(name, "symmetric eigendecomposition");
        let eig = a.clone().symmetric_eigen();
        let values = eig.eigenvalues.iter().map(|&x| Complex::new(x, 0.0)).collect();
        let vectors = eig.eigenvectors.map(|x| Complex::new(x, 0.0));
        return Ok(EigenDecomposition { values, vectors });
    }

    trace!(name, "general eigendecomposition via Schur form");
    let values: Vec<Complex<f64>> = a.complex_eigenvalues().iter().copied().collect();
    let n = a.nrows();
    let complex_a = a.map(|x| Complex::new(x, 0.0));

    let mut vectors = DMatrix::zeros(n, n);
    for (k, &lambda) in values.iter().enumerate() {
        // The k-th repeat takes the k-th smallest singular direction while it
        // stays in the null space of `A - λI`
        let repeat = values[..k]
            .iter()
            .filter(|&&mu| (mu - lambda).norm() <= CLUSTER_EPS * lambda.norm().max(1.0))
            .count();
        let shifted = &complex_a - DMatrix::from_diagonal_element(n, n, lambda);
        vectors.set_column(k, &null_vector(shifted, repeat));
    }

    Ok(EigenDecomposition { values, vectors })
}

/// Unit vector spanning the (near) null space of `m`
///
/// Taken from the right singular vectors of `m`, choosing the one with the
/// `rank`-th smallest singular value if that value is numerically zero and
/// the smallest one otherwise. A defective eigenvalue therefore repeats a
/// parallel eigenvector. The phase is fixed so that the largest component is
/// real and positive, which makes eigenvectors of real eigenvalues come out
/// real.
fn null_vector(m: DMatrix<Complex<f64>>, rank: usize) -> DVector<Complex<f64>> {
    let n = m.ncols();
    let svd = m.svd(false, true);
    let Some(v_t) = svd.v_t else {
        warn!("SVD did not produce right singular vectors");
        return DVector::zeros(n);
    };

    let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
    order.sort_by(|&i, &j| svd.singular_values[i].total_cmp(&svd.singular_values[j]));
    let Some(&smallest) = order.first() else {
        return DVector::zeros(n);
    };
    let largest = order.last().map_or(0.0, |&i| svd.singular_values[i]);
    let null_tol = NULL_EPS * largest.max(1.0);
    let idx = match order.get(rank) {
        Some(&i) if svd.singular_values[i] <= null_tol => i,
        _ => smallest,
    };

    // Row `idx` of V^H is the conjugate of the right singular vector
    let mut v: DVector<Complex<f64>> = v_t.row(idx).transpose().map(|c| c.conj());

    let pivot = v
        .iter()
        .copied()
        .max_by(|a, b| a.norm().total_cmp(&b.norm()))
        .unwrap_or(Complex::new(1.0, 0.0));
    if pivot.norm() > 0.0 {
        let phase = pivot.conj() / pivot.norm();
        v = v.map(|c| c * phase);
    }

    let norm = v.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt();
    if norm > 0.0 {
        v = v.map(|c| c / norm);
    }
    v
}
