//! Types for standardized reports to the user about a load.
//!
//! Loads never fail on records outside the region or on requested samples that a
//! source doesn't have; these are dropped by policy. The [`LoadReport`] records what
//! was dropped so callers can tell the user.
//!

/// What a load dropped by policy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records whose position fell outside the region.
    pub clipped_records: usize,
    /// Requested sample names the source does not have.
    pub dropped_samples: Vec<String>,
    entries: Vec<String>,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, message: String) {
        self.entries.push(message)
    }

    /// Human-readable issues, including the dropped records and samples.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.clipped_records > 0 {
            issues.push(format!(
                "{} records were outside the region and were ignored",
                self.clipped_records
            ));
        }
        if !self.dropped_samples.is_empty() {
            issues.push(format!(
                "requested samples not in the source: {}",
                self.dropped_samples.join(", ")
            ));
        }
        issues.extend(self.entries.iter().cloned());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issues() {
        let mut report = LoadReport::new();
        assert!(report.issues().is_empty());

        report.clipped_records = 3;
        report.dropped_samples = vec!["x".to_string()];
        report.add_issue("region runs past sequence end".to_string());
        assert_eq!(
            report.issues(),
            vec![
                "3 records were outside the region and were ignored".to_string(),
                "requested samples not in the source: x".to_string(),
                "region runs past sequence end".to_string(),
            ]
        );
    }
}
