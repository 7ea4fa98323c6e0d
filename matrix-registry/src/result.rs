//! Operation requests and results

use crate::ops::BinaryOp;
use matrix_core::Matrix;
use nalgebra::{Complex, DMatrix};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;

/// A request the registry can execute
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Binary {
        kind: BinaryOp,
        left: String,
        right: String,
        #[serde(default)]
        save_as: Option<String>,
    },
    Transpose {
        name: String,
        #[serde(default)]
        save_as: Option<String>,
    },
    Determinant {
        name: String,
    },
    Inverse {
        name: String,
        #[serde(default)]
        save_as: Option<String>,
    },
    Eigen {
        name: String,
    },
}

/// Scalar determinant with an advisory singularity flag
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Determinant {
    pub value: f64,
    pub is_singular: bool,
}

/// Eigenvalues and eigenvectors of a square matrix
///
/// Column `k` of `vectors` is the unit eigenvector for `values[k]`.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenDecomposition {
    pub values: Vec<Complex<f64>>,
    pub vectors: DMatrix<Complex<f64>>,
}

impl EigenDecomposition {
    /// Whether every eigenvalue has a negligible imaginary part
    pub fn is_real(&self, eps: f64) -> bool {
        self.values.iter().all(|v| v.im.abs() < eps)
    }

    /// Eigenvector for `values[k]`
    pub fn vector(&self, k: usize) -> Option<Vec<Complex<f64>>> {
        (k < self.vectors.ncols()).then(|| self.vectors.column(k).iter().copied().collect())
    }

    /// Iterate over `(eigenvalue, eigenvector)` pairs
    pub fn pairs(&self) -> impl Iterator<Item = (Complex<f64>, Vec<Complex<f64>>)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(k, &value)| (value, self.vectors.column(k).iter().copied().collect()))
    }
}

#[derive(serde::Serialize)]
struct ComplexRepr {
    re: f64,
    im: f64,
}

impl From<&Complex<f64>> for ComplexRepr {
    fn from(c: &Complex<f64>) -> Self {
        Self { re: c.re, im: c.im }
    }
}

impl Serialize for EigenDecomposition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let values: Vec<ComplexRepr> = self.values.iter().map(ComplexRepr::from).collect();
        let vectors: Vec<Vec<ComplexRepr>> = self
            .vectors
            .row_iter()
            .map(|row| row.iter().map(ComplexRepr::from).collect())
            .collect();

        let mut state = serializer.serialize_struct("EigenDecomposition", 2)?;
        state.serialize_field("values", &values)?;
        state.serialize_field("vectors", &vectors)?;
        state.end()
    }
}

/// Outcome of a registry operation
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type", content = "result", rename_all = "snake_case")]
pub enum OperationResult {
    Matrix(Matrix),
    Determinant(Determinant),
    Eigen(EigenDecomposition),
}

impl OperationResult {
    /// Variant name as shown to users
    pub fn type_name(&self) -> &'static str {
        match self {
            OperationResult::Matrix(_) => "Matrix",
            OperationResult::Determinant(_) => "Determinant",
            OperationResult::Eigen(_) => "Eigen",
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            OperationResult::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_matrix(self) -> Option<Matrix> {
        match self {
            OperationResult::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_determinant(&self) -> Option<&Determinant> {
        match self {
            OperationResult::Determinant(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_eigen(&self) -> Option<&EigenDecomposition> {
        match self {
            OperationResult::Eigen(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Matrix> for OperationResult {
    fn from(m: Matrix) -> Self {
        OperationResult::Matrix(m)
    }
}

impl From<Determinant> for OperationResult {
    fn from(d: Determinant) -> Self {
        OperationResult::Determinant(d)
    }
}

impl From<EigenDecomposition> for OperationResult {
    fn from(e: EigenDecomposition) -> Self {
        OperationResult::Eigen(e)
    }
}
