//! Matrix Registry - Named matrices and linear algebra
//!
//! Provides a registry of named matrices for interactive front-ends:
//! - Storage (create, insert, get, list, clear)
//! - Arithmetic (add, subtract, multiply)
//! - Transpose and inverse
//! - Determinant with an advisory singularity flag
//! - Eigen-decomposition with complex eigenvalues
//! - Append-only operation history
//!
//! All computation is `f64` on top of nalgebra. The registry performs no I/O;
//! it only emits `tracing` events.

mod helpers;
mod history;
mod ops;
mod options;
mod props;
mod registry;
mod result;

pub mod decompose;

pub use history::{History, HistoryIter};
pub use ops::BinaryOp;
pub use options::{RegistryOptions, DEFAULT_SINGULAR_TOLERANCE, DEFAULT_SYMMETRY_TOLERANCE};
pub use registry::MatrixRegistry;
pub use result::{Determinant, EigenDecomposition, Operation, OperationResult};

pub use matrix_core::{ErrorKind, Matrix, MatrixError, Shape};
