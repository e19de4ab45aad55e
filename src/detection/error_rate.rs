//! Client error / server error volume per client
//!
//! A response counts as an error when its status text starts with `4` or `5`.
//! This is a prefix check on the raw text, not a numeric range.

use super::{calculate_severity, count_by, Rule};
use crate::models::{AnomalyFinding, FindingKind, LogRecord};

/// Flags clients with more than `threshold` error responses
pub struct ErrorRateRule {
    threshold: usize,
}

impl ErrorRateRule {
    pub fn new(threshold: usize) -> Self {
        ErrorRateRule { threshold }
    }

    fn is_error(status: &str) -> bool {
        status.starts_with('4') || status.starts_with('5')
    }
}

impl Rule for ErrorRateRule {
    fn name(&self) -> &'static str {
        "error_rate"
    }

    fn kind(&self) -> FindingKind {
        FindingKind::HighErrorRate
    }

    fn evaluate(&self, records: &[LogRecord]) -> Vec<AnomalyFinding> {
        let errors = records.iter().filter(|r| Self::is_error(&r.status));

        count_by(errors, |r| r.ip.as_str())
            .into_iter()
            .filter(|&(_, count)| count > self.threshold)
            .map(|(ip, count)| AnomalyFinding {
                kind: self.kind(),
                ip: ip.to_string(),
                path: None,
                count,
                severity: calculate_severity(count, self.threshold),
                message: format!("High error rate ({} errors) from IP", count),
            })
            .collect()
    }
}
