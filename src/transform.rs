//! Log transforms applied to loaded signal.

use std::fmt;
use std::str::FromStr;

use crate::error::CoverageError;

/// A log transform, applied element-wise as `log_b(x + 1)` so that zero coverage
/// stays zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogTransform {
    Log2,
    Log10,
    Ln,
}

impl LogTransform {
    pub fn value(&self, x: f32) -> f32 {
        match self {
            LogTransform::Log2 => (x + 1.0).log2(),
            LogTransform::Log10 => (x + 1.0).log10(),
            LogTransform::Ln => x.ln_1p(),
        }
    }

    /// Transform `values` in place.
    pub fn apply(&self, values: &mut [f32]) {
        for x in values.iter_mut() {
            *x = self.value(*x);
        }
    }
}

impl FromStr for LogTransform {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "2" | "log2" => Ok(LogTransform::Log2),
            "10" | "log10" => Ok(LogTransform::Log10),
            "e" | "ln" => Ok(LogTransform::Ln),
            _ => Err(CoverageError::InvalidLogTransform(s.to_string())),
        }
    }
}

impl fmt::Display for LogTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self {
            LogTransform::Log2 => "2",
            LogTransform::Log10 => "10",
            LogTransform::Ln => "e",
        };
        write!(f, "{}", base)
    }
}
