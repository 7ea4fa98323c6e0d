//! Text renderer for registry results
//!
//! Values with `|v| < 1e-10` are shown as zero. This only affects output;
//! stored matrices keep their exact values.

use matrix_registry::{Determinant, EigenDecomposition, Matrix, MatrixError};
use nalgebra::Complex;

/// Magnitude below which a value is displayed as zero
pub const DISPLAY_ZERO: f64 = 1e-10;

/// Renders matrices, scalars and eigen-pairs as aligned text
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    precision: usize,
}

impl Renderer {
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    /// Aligned grid, one bracketed row per line
    pub fn matrix(&self, name: &str, m: &Matrix) -> String {
        let cells: Vec<Vec<String>> = m
            .to_rows()
            .iter()
            .map(|row| row.iter().map(|&v| self.number(v)).collect())
            .collect();
        let mut output = format!("Matrix '{}' ({}):\n", name, m.shape());
        output.push_str(&grid(&cells));
        output
    }

    pub fn determinant(&self, name: &str, det: &Determinant) -> String {
        let advisory = if det.is_singular {
            "Matrix is singular (determinant ≈ 0)"
        } else {
            "Matrix is non-singular (invertible)"
        };
        format!("det({}) = {}\n{}\n", name, self.number(det.value), advisory)
    }

    pub fn eigen(&self, name: &str, eig: &EigenDecomposition) -> String {
        let mut output = format!("Eigenvalues of matrix '{}':\n", name);
        for (i, value) in eig.values.iter().enumerate() {
            output.push_str(&format!("λ{} = {}\n", i + 1, self.complex(*value)));
        }

        output.push_str(&format!("\nEigenvectors of matrix '{}' (columns):\n", name));
        let cells: Vec<Vec<String>> = eig
            .vectors
            .row_iter()
            .map(|row| row.iter().map(|&c| self.complex(c)).collect())
            .collect();
        output.push_str(&grid(&cells));
        output
    }

    pub fn error(&self, err: &MatrixError) -> String {
        match err.suggestion() {
            Some(hint) => format!("Error: {} ({})\n", err, hint),
            None => format!("Error: {}\n", err),
        }
    }

    /// Numbered history listing
    pub fn history<'a>(&self, entries: impl Iterator<Item = &'a str>) -> String {
        let mut output = String::new();
        for (i, entry) in entries.enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, entry));
        }
        if output.is_empty() {
            output.push_str("No operations performed yet\n");
        }
        output
    }

    pub fn number(&self, v: f64) -> String {
        unsigned_zero(format!("{:.*}", self.precision, display_value(v)))
    }

    /// `a`, `a + bi` or `a - bi`
    pub fn complex(&self, c: Complex<f64>) -> String {
        let re = display_value(c.re);
        let im = display_value(c.im);
        let re_text = unsigned_zero(format!("{:.*}", self.precision, re));
        let im_text = unsigned_zero(format!("{:.*}", self.precision, im.abs()));
        if im_text.chars().all(|ch| ch == '0' || ch == '.') {
            re_text
        } else if im < 0.0 {
            format!("{} - {}i", re_text, im_text)
        } else {
            format!("{} + {}i", re_text, im_text)
        }
    }
}

/// Near-zero values (and negative zero) become `0.0`
pub fn display_value(v: f64) -> f64 {
    if v.abs() < DISPLAY_ZERO {
        0.0
    } else {
        v
    }
}

/// Drop the sign of text that rounded to zero, so `-0.0004` shows as `0.000`
fn unsigned_zero(text: String) -> String {
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

/// Right-align every cell to the widest one
fn grid(cells: &[Vec<String>]) -> String {
    let width = cells
        .iter()
        .flat_map(|row| row.iter().map(|c| c.chars().count()))
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for row in cells {
        let padded: Vec<String> = row.iter().map(|c| format!("{:>width$}", c, width = width)).collect();
        output.push_str(&format!("[ {} ]\n", padded.join("  ")));
    }
    output
}
