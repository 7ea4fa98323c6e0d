//! Basic matrix operations: add, subtract, multiply, transpose, inverse

use crate::helpers::{check_matmul_dims, check_same_dims, check_square};
use crate::props::determinant;
use matrix_core::{Matrix, MatrixError};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Binary arithmetic supported by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
}

impl BinaryOp {
    /// Operation name as shown in history and error messages
    pub fn label(&self) -> &'static str {
        match self {
            BinaryOp::Add => "Addition",
            BinaryOp::Subtract => "Subtraction",
            BinaryOp::Multiply => "Multiplication",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "×",
        }
    }

    /// Apply the operation, validating shapes first
    pub fn apply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
        match self {
            BinaryOp::Add => add(a, b),
            BinaryOp::Subtract => subtract(a, b),
            BinaryOp::Multiply => multiply(a, b),
        }
    }
}

/// Element-wise sum
pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    check_same_dims(a, b, BinaryOp::Add.label())?;
    Matrix::from_dmatrix(a.as_dmatrix() + b.as_dmatrix())
}

/// Element-wise difference
pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    check_same_dims(a, b, BinaryOp::Subtract.label())?;
    Matrix::from_dmatrix(a.as_dmatrix() - b.as_dmatrix())
}

/// Standard matrix product, `rows(a) × cols(b)`
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    check_matmul_dims(a, b, BinaryOp::Multiply.label())?;
    Matrix::from_dmatrix(a.as_dmatrix() * b.as_dmatrix())
}

/// `result[j][i] = m[i][j]`
pub fn transpose(m: &Matrix) -> Result<Matrix, MatrixError> {
    Matrix::from_dmatrix(m.as_dmatrix().transpose())
}

/// Inverse of a square matrix
///
/// Fails with `Singular` when `|det| < tolerance`, when elimination finds no
/// pivot, or when the computed inverse has a non-finite entry.
pub fn inverse(m: &Matrix, name: &str, tolerance: f64) -> Result<Matrix, MatrixError> {
    check_square(m, name, "inverse")?;

    let det = determinant(m, name, tolerance)?;
    if det.is_singular {
        return Err(MatrixError::singular(name));
    }

    // Not `DMatrix::try_inverse`: its closed form for n <= 4 divides by the
    // determinant, which can overflow to inf
    let inv = m
        .as_dmatrix()
        .clone()
        .lu()
        .try_inverse()
        .ok_or_else(|| MatrixError::singular(name))?;

    if inv.iter().any(|x| !x.is_finite()) {
        trace!(name, "inverse produced non-finite entries");
        return Err(MatrixError::singular(name));
    }

    Matrix::from_dmatrix(inv)
}
