//! Matrix Core - Fundamental types
//!
//! This crate provides the core types used throughout the matrix workbench:
//! - `Matrix`: Non-empty, fixed-shape `f64` matrix
//! - `Shape`: `(rows, cols)` pair
//! - `MatrixError`: Structured, recoverable errors with machine-readable codes

mod error;
mod matrix;
mod number;

pub use error::{codes, ErrorKind, MatrixError, Shape};
pub use matrix::Matrix;
pub use number::{parse_real, split_row, NumberError};

