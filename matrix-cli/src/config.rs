//! Command-line and environment configuration

use clap::Parser;
use matrix_registry::{RegistryOptions, DEFAULT_SINGULAR_TOLERANCE};
use std::env;

/// Environment fallback for `--precision`
pub const PRECISION_ENV: &str = "MATRIX_CLI_PRECISION";

const DEFAULT_PRECISION: usize = 3;

/// Interactive matrix calculator
#[derive(Debug, Clone, Parser)]
#[command(name = "matrix-cli", version, about)]
pub struct Args {
    /// Decimal places shown for matrix entries
    #[arg(long)]
    pub precision: Option<usize>,

    /// Determinants with a smaller magnitude count as singular
    #[arg(long, default_value_t = DEFAULT_SINGULAR_TOLERANCE)]
    pub tolerance: f64,

    /// Print results as JSON instead of aligned text
    #[arg(long)]
    pub json: bool,
}

/// Resolved settings for a session
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub precision: usize,
    pub json: bool,
    pub registry: RegistryOptions,
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        let precision = args
            .precision
            .or_else(|| env::var(PRECISION_ENV).ok().and_then(|v| v.trim().parse().ok()))
            .unwrap_or(DEFAULT_PRECISION);

        Self {
            precision,
            json: args.json,
            registry: RegistryOptions::new().with_singular_tolerance(args.tolerance),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            json: false,
            registry: RegistryOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from(["matrix-cli", "--precision", "5", "--tolerance", "1e-6", "--json"]);
        let config = Config::from_args(&args);
        assert_eq!(config.precision, 5);
        assert!(config.json);
        assert_eq!(config.registry.singular_tolerance, 1e-6);
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["matrix-cli"]);
        assert_eq!(args.tolerance, DEFAULT_SINGULAR_TOLERANCE);
        assert!(!args.json);
        assert_eq!(Config::default().precision, 3);
    }
}
