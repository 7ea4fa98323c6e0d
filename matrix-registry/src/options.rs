//! Registry configuration

/// Default threshold under which a determinant counts as zero
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1e-10;

/// Default threshold for treating `a[i][j]` and `a[j][i]` as equal
pub const DEFAULT_SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Numeric thresholds used by registry operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegistryOptions {
    pub singular_tolerance: f64,
    pub symmetry_tolerance: f64,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            singular_tolerance: DEFAULT_SINGULAR_TOLERANCE,
            symmetry_tolerance: DEFAULT_SYMMETRY_TOLERANCE,
        }
    }
}

impl RegistryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negative or NaN values fall back to the default
    pub fn with_singular_tolerance(mut self, tolerance: f64) -> Self {
        self.singular_tolerance = sanitize(tolerance, DEFAULT_SINGULAR_TOLERANCE);
        self
    }

    pub fn with_symmetry_tolerance(mut self, tolerance: f64) -> Self {
        self.symmetry_tolerance = sanitize(tolerance, DEFAULT_SYMMETRY_TOLERANCE);
        self
    }
}

fn sanitize(value: f64, default: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let opts = RegistryOptions::new()
            .with_singular_tolerance(1e-6)
            .with_symmetry_tolerance(-1.0);
        assert_eq!(opts.singular_tolerance, 1e-6);
        assert_eq!(opts.symmetry_tolerance, DEFAULT_SYMMETRY_TOLERANCE);
        assert_eq!(RegistryOptions::default().singular_tolerance, 1e-10);
    }
}
