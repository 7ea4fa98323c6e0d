//! Structured errors for matrix operations
//!
//! Every error is recoverable at the call site. Each variant carries enough
//! context (names, shapes, offending text) for a front-end to print an
//! actionable message verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_DIMENSION: &str = "INVALID_DIMENSION";
    pub const SHAPE_MISMATCH: &str = "SHAPE_MISMATCH";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const NOT_SQUARE: &str = "NOT_SQUARE";
    pub const SINGULAR: &str = "SINGULAR";
    pub const INVALID_NAME: &str = "INVALID_NAME";
    pub const NOT_A_MATRIX: &str = "NOT_A_MATRIX";
}

/// `(rows, cols)` pair of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Shape with rows and columns swapped
    pub fn transposed(&self) -> Self {
        Self { rows: self.cols, cols: self.rows }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Error category, independent of the context carried by [`MatrixError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidDimension,
    ShapeMismatch,
    ParseError,
    NotFound,
    NotSquare,
    Singular,
    InvalidName,
    NotAMatrix,
}

impl ErrorKind {
    /// Machine-readable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidDimension => codes::INVALID_DIMENSION,
            ErrorKind::ShapeMismatch => codes::SHAPE_MISMATCH,
            ErrorKind::ParseError => codes::PARSE_ERROR,
            ErrorKind::NotFound => codes::NOT_FOUND,
            ErrorKind::NotSquare => codes::NOT_SQUARE,
            ErrorKind::Singular => codes::SINGULAR,
            ErrorKind::InvalidName => codes::INVALID_NAME,
            ErrorKind::NotAMatrix => codes::NOT_A_MATRIX,
        }
    }
}

/// Error type for registry and matrix operations
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatrixError {
    #[error("Matrix dimensions must be positive, got {rows}x{cols}")]
    InvalidDimension { rows: i64, cols: i64 },

    #[error("{operation}: incompatible shapes {left} and {right} ({requirement})")]
    ShapeMismatch {
        operation: String,
        left: Shape,
        right: Shape,
        requirement: &'static str,
    },

    #[error("Matrix '{name}' expects {expected} values, row {row} has {found} entries")]
    RowLength {
        name: String,
        expected: Shape,
        row: usize,
        found: usize,
    },

    #[error("Matrix '{name}' expects {expected} values, got {found} rows")]
    RowCount {
        name: String,
        expected: Shape,
        found: usize,
    },

    #[error("Invalid number '{text}' at row {row}, column {col}")]
    ParseError { text: String, row: usize, col: usize },

    #[error("Matrix '{name}' not found")]
    NotFound { name: String },

    #[error("{operation} requires a square matrix, '{name}' is {shape}")]
    NotSquare {
        operation: &'static str,
        name: String,
        shape: Shape,
    },

    #[error("Matrix '{name}' is singular and cannot be inverted")]
    Singular { name: String },

    #[error("Matrix name must not be empty")]
    InvalidName,

    #[error("Only matrix results can be saved, got {found}")]
    NotAMatrix { found: &'static str },
}

impl MatrixError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::InvalidDimension { .. } => ErrorKind::InvalidDimension,
            MatrixError::ShapeMismatch { .. }
            | MatrixError::RowLength { .. }
            | MatrixError::RowCount { .. } => ErrorKind::ShapeMismatch,
            MatrixError::ParseError { .. } => ErrorKind::ParseError,
            MatrixError::NotFound { .. } => ErrorKind::NotFound,
            MatrixError::NotSquare { .. } => ErrorKind::NotSquare,
            MatrixError::Singular { .. } => ErrorKind::Singular,
            MatrixError::InvalidName => ErrorKind::InvalidName,
            MatrixError::NotAMatrix { .. } => ErrorKind::NotAMatrix,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Suggestion for fixing the error, if one applies
    pub fn suggestion(&self) -> Option<String> {
        match self {
            MatrixError::InvalidDimension { .. } => {
                Some("Use at least one row and one column".to_string())
            }
            MatrixError::RowLength { expected, .. } => {
                Some(format!("Enter exactly {} numbers per row", expected.cols))
            }
            MatrixError::RowCount { expected, .. } => {
                Some(format!("Enter exactly {} rows", expected.rows))
            }
            MatrixError::ParseError { .. } => {
                Some("Enter numbers separated by spaces, e.g. '1 2.5 -3'".to_string())
            }
            MatrixError::NotFound { name } => {
                Some(format!("Create '{}' first or check spelling", name))
            }
            MatrixError::Singular { .. } => {
                Some("Check the determinant; a singular matrix has none".to_string())
            }
            _ => None,
        }
    }

    // ========== Common Error Constructors ==========

    pub fn not_found(name: impl Into<String>) -> Self {
        MatrixError::NotFound { name: name.into() }
    }

    pub fn not_square(operation: &'static str, name: impl Into<String>, shape: Shape) -> Self {
        MatrixError::NotSquare { operation, name: name.into(), shape }
    }

    pub fn singular(name: impl Into<String>) -> Self {
        MatrixError::Singular { name: name.into() }
    }

    pub fn same_shape_required(operation: impl Into<String>, left: Shape, right: Shape) -> Self {
        MatrixError::ShapeMismatch {
            operation: operation.into(),
            left,
            right,
            requirement: "matrices must have the same dimensions",
        }
    }

    pub fn inner_dims_required(operation: impl Into<String>, left: Shape, right: Shape) -> Self {
        MatrixError::ShapeMismatch {
            operation: operation.into(),
            left,
            right,
            requirement: "columns of the first matrix must equal rows of the second",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_display() {
        assert_eq!(Shape::new(2, 3).to_string(), "2x3");
        assert_eq!(Shape::new(2, 3).transposed(), Shape::new(3, 2));
    }

    #[test]
    fn test_kind_grouping() {
        let err = MatrixError::RowLength {
            name: "A".to_string(),
            expected: Shape::new(2, 2),
            row: 1,
            found: 3,
        };
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        assert_eq!(err.code(), codes::SHAPE_MISMATCH);
    }

    #[test]
    fn test_messages_carry_context() {
        let err = MatrixError::inner_dims_required("Multiplication", Shape::new(2, 3), Shape::new(2, 2));
        let msg = err.to_string();
        assert!(msg.contains("2x3"));
        assert!(msg.contains("2x2"));

        let err = MatrixError::not_found("B");
        assert_eq!(err.to_string(), "Matrix 'B' not found");
        assert!(err.suggestion().unwrap().contains("'B'"));
    }

    #[test]
    fn test_serialize_tagged() {
        let err = MatrixError::not_square("determinant", "M", Shape::new(2, 3));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "not_square");
        assert_eq!(json["shape"]["cols"], 3);
    }
}
