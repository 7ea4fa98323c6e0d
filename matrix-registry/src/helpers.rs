//! Helper functions for matrix operations

use matrix_core::{Matrix, MatrixError};
use nalgebra::DMatrix;

/// Check that two matrices have compatible dimensions for multiplication
pub fn check_matmul_dims(a: &Matrix, b: &Matrix, op: &str) -> Result<(), MatrixError> {
    if a.cols() != b.rows() {
        return Err(MatrixError::inner_dims_required(op, a.shape(), b.shape()));
    }
    Ok(())
}

/// Check that two matrices have the same dimensions
pub fn check_same_dims(a: &Matrix, b: &Matrix, op: &str) -> Result<(), MatrixError> {
    if a.shape() != b.shape() {
        return Err(MatrixError::same_shape_required(op, a.shape(), b.shape()));
    }
    Ok(())
}

/// Check that a matrix is square
pub fn check_square(m: &Matrix, name: &str, op: &'static str) -> Result<(), MatrixError> {
    if !m.is_square() {
        return Err(MatrixError::not_square(op, name, m.shape()));
    }
    Ok(())
}

/// Whether a square matrix equals its transpose within `eps`
pub fn is_symmetric(m: &DMatrix<f64>, eps: f64) -> bool {
    if m.nrows() != m.ncols() {
        return false;
    }
    for i in 0..m.nrows() {
        for j in (i + 1)..m.ncols() {
            if (m[(i, j)] - m[(j, i)]).abs() > eps {
                return false;
            }
        }
    }
    true
}

/// Normalize an optional result name: `None` when absent or blank
pub fn save_target(save_as: Option<&str>) -> Option<&str> {
    save_as.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_core::ErrorKind;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_check_matmul_dims() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let b = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert!(check_matmul_dims(&b, &a, "Multiplication").is_ok());
        let err = check_matmul_dims(&a, &b, "Multiplication").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn test_check_square() {
        let a = m(vec![vec![1.0, 2.0, 3.0]]);
        let err = check_square(&a, "A", "determinant").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotSquare);
        assert!(err.to_string().contains("1x3"));
    }

    #[test]
    fn test_is_symmetric() {
        let sym = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        let asym = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 1.0]);
        assert!(is_symmetric(&sym, 1e-10));
        assert!(!is_symmetric(&asym, 1e-10));
    }

    #[test]
    fn test_save_target() {
        assert_eq!(save_target(Some(" C ")), Some("C"));
        assert_eq!(save_target(Some("   ")), None);
        assert_eq!(save_target(None), None);
    }
}
