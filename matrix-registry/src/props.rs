//! Matrix properties: determinant

use crate::helpers::check_square;
use crate::result::Determinant;
use matrix_core::{Matrix, MatrixError};

/// Determinant by LU elimination with partial pivoting
///
/// `is_singular` is advisory: it is set when `|det| < tolerance` and never
/// turns the call into an error.
pub fn determinant(m: &Matrix, name: &str, tolerance: f64) -> Result<Determinant, MatrixError> {
    check_square(m, name, "determinant")?;

    let value = m.as_dmatrix().clone().lu().determinant();
    // -0.0 from a zero pivot prints as "-0.000000"
    let value = if value == 0.0 { 0.0 } else { value };
    Ok(Determinant {
        value,
        is_singular: value.abs() < tolerance,
    })
}
