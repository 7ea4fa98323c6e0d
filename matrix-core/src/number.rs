//! Parsing of matrix entries from text
//!
//! Accepts decimal and scientific notation ("3.14", "-2", "1.5e10") and
//! simple fractions ("1/3"). Non-finite spellings such as "nan" or "inf"
//! are not real numbers and are rejected.

use thiserror::Error;

/// Error type for number parsing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero in '{0}'")]
    DivisionByZero(String),

    #[error("Not a finite number: {0}")]
    NotFinite(String),
}

/// Parse a single real number
pub fn parse_real(s: &str) -> Result<f64, NumberError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NumberError::ParseError(s.to_string()));
    }

    // Handle rational format "a/b"
    if s.contains('/') && !s.contains('e') && !s.contains('E') {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 {
            return Err(NumberError::ParseError(s.to_string()));
        }
        let num = parse_decimal(parts[0].trim(), s)?;
        let den = parse_decimal(parts[1].trim(), s)?;
        if den == 0.0 {
            return Err(NumberError::DivisionByZero(s.to_string()));
        }
        return finite(num / den, s);
    }

    let value = parse_decimal(s, s)?;
    finite(value, s)
}

/// Split a whitespace-separated row of numbers into its entries
pub fn split_row(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

fn parse_decimal(part: &str, whole: &str) -> Result<f64, NumberError> {
    // f64::from_str accepts "inf", "nan" and "infinity"; only digits are real input here
    let looks_numeric = part
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if part.is_empty() || !looks_numeric {
        return Err(NumberError::ParseError(whole.to_string()));
    }
    part.parse::<f64>()
        .map_err(|_| NumberError::ParseError(whole.to_string()))
}

fn finite(value: f64, text: &str) -> Result<f64, NumberError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumberError::NotFinite(text.to_string()))
    }
}
