//! Core matrix type

use crate::error::{MatrixError, Shape};
use crate::number::parse_real;
use nalgebra::DMatrix;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// A non-empty, fixed-shape matrix of `f64` values
///
/// The shape is set at construction and never changes. Every constructor
/// rejects matrices with zero rows or zero columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: DMatrix<f64>,
}

impl Matrix {
    /// Create from nested rows, validating that all rows have the same length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());
        if n_rows == 0 || n_cols == 0 {
            return Err(MatrixError::InvalidDimension {
                rows: n_rows as i64,
                cols: n_cols as i64,
            });
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(MatrixError::RowLength {
                    name: "(unnamed)".to_string(),
                    expected: Shape::new(n_rows, n_cols),
                    row: i + 1,
                    found: row.len(),
                });
            }
        }

        let data = DMatrix::from_fn(n_rows, n_cols, |i, j| rows[i][j]);
        Ok(Self { data })
    }

    /// Parse a `rows × cols` grid of textual entries
    ///
    /// `name` is only used for error context. Rows and columns in errors are
    /// 1-based, as a user would count them.
    pub fn parse_grid<S: AsRef<str>>(
        name: &str,
        rows: i64,
        cols: i64,
        grid: &[Vec<S>],
    ) -> Result<Self, MatrixError> {
        if rows <= 0 || cols <= 0 {
            return Err(MatrixError::InvalidDimension { rows, cols });
        }
        let expected = Shape::new(rows as usize, cols as usize);

        if grid.len() != expected.rows {
            return Err(MatrixError::RowCount {
                name: name.to_string(),
                expected,
                found: grid.len(),
            });
        }

        let mut data = DMatrix::zeros(expected.rows, expected.cols);
        for (i, row) in grid.iter().enumerate() {
            if row.len() != expected.cols {
                return Err(MatrixError::RowLength {
                    name: name.to_string(),
                    expected,
                    row: i + 1,
                    found: row.len(),
                });
            }
            for (j, text) in row.iter().enumerate() {
                let text = text.as_ref();
                data[(i, j)] = parse_real(text).map_err(|_| MatrixError::ParseError {
                    text: text.trim().to_string(),
                    row: i + 1,
                    col: j + 1,
                })?;
            }
        }

        Ok(Self { data })
    }

    /// Create from a nalgebra DMatrix
    pub fn from_dmatrix(data: DMatrix<f64>) -> Result<Self, MatrixError> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(MatrixError::InvalidDimension {
                rows: data.nrows() as i64,
                cols: data.ncols() as i64,
            });
        }
        Ok(Self { data })
    }

    /// `n × n` identity matrix
    pub fn identity(n: usize) -> Result<Self, MatrixError> {
        Self::from_dmatrix(DMatrix::identity(n, n))
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows(), self.cols())
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Get element at (row, col), 0-based
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    /// Read-only access to the underlying nalgebra matrix
    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    pub fn into_dmatrix(self) -> DMatrix<f64> {
        self.data
    }

    /// Convert to nested rows (row-major)
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }

    /// Element-wise comparison within an absolute tolerance
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.data.row_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, val) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.4}", val)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

impl Serialize for Matrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Matrix", 3)?;
        state.serialize_field("rows", &self.rows())?;
        state.serialize_field("cols", &self.cols())?;
        state.serialize_field("data", &self.to_rows())?;
        state.end()
    }
}
