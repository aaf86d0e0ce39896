//! TSV Serializing helpers, functionality, etc.

use crate::traits::TsvSerialize;
use lazy_static::lazy_static;

lazy_static! {
    /// The standard coverage TSV configuration: full precision, `.` for values that
    /// are not finite.
    pub static ref COVERAGE_TSV: TsvConfig = TsvConfig {
        no_value_string: ".".to_string(),
        precision: None,
    };
}

/// This is an extensible type to handle common TSV output configurations, e.g. what to
/// print for values that are not finite.
#[derive(Clone, Debug)]
pub struct TsvConfig {
    pub no_value_string: String,
    /// Number of decimal places; `None` prints the shortest exact representation.
    pub precision: Option<usize>,
}

impl TsvSerialize for f32 {
    fn to_tsv(&self, config: &TsvConfig) -> String {
        if !self.is_finite() {
            return config.no_value_string.clone();
        }
        match config.precision {
            Some(precision) => format!("{:.*}", precision, self),
            None => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_to_tsv() {
        assert_eq!(5.0_f32.to_tsv(&COVERAGE_TSV), "5");
        assert_eq!(0.25_f32.to_tsv(&COVERAGE_TSV), "0.25");
        assert_eq!(f32::NAN.to_tsv(&COVERAGE_TSV), ".");

        let config = TsvConfig {
            no_value_string: "NA".to_string(),
            precision: Some(2),
        };
        assert_eq!(1.0_f32.to_tsv(&config), "1.00");
        assert_eq!(f32::INFINITY.to_tsv(&config), "NA");
    }
}
