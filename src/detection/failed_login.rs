//! Brute-force login detection
//!
//! Counts `401` responses on any path containing `/login` (case-insensitive).
//! Other statuses, including `403`, are ignored.

use super::{calculate_severity, count_by, Rule};
use crate::models::{AnomalyFinding, FindingKind, LogRecord};

const UNAUTHORIZED: &str = "401";

/// Flags clients with more than `threshold` rejected login attempts
pub struct FailedLoginRule {
    threshold: usize,
}

impl FailedLoginRule {
    pub fn new(threshold: usize) -> Self {
        FailedLoginRule { threshold }
    }

    fn is_failed_login(record: &LogRecord) -> bool {
        record.status == UNAUTHORIZED && record.path.to_lowercase().contains("/login")
    }
}

impl Rule for FailedLoginRule {
    fn name(&self) -> &'static str {
        "failed_logins"
    }

    fn kind(&self) -> FindingKind {
        FindingKind::FailedLogins
    }

    fn evaluate(&self, records: &[LogRecord]) -> Vec<AnomalyFinding> {
        let failures = records.iter().filter(|r| Self::is_failed_login(r));

        count_by(failures, |r| r.ip.as_str())
            .into_iter()
            .filter(|&(_, count)| count > self.threshold)
            .map(|(ip, count)| AnomalyFinding {
                kind: self.kind(),
                ip: ip.to_string(),
                path: None,
                count,
                severity: calculate_severity(count, self.threshold),
                message: format!("{} failed login attempts", count),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::tests::repeat;

    #[test]
    fn test_six_failures_trigger() {
        let findings = FailedLoginRule::new(5).evaluate(&repeat(6, "10.0.0.2", "/login", "401"));

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].ip, "10.0.0.2");
        assert_eq!(findings[0].count, 6);
        assert_eq!(findings[0].message, "6 failed login attempts");
    }

    #[test]
    fn test_five_failures_do_not_trigger() {
        let findings = FailedLoginRule::new(5).evaluate(&repeat(5, "10.0.0.2", "/login", "401"));
        assert!(findings.is_empty());
    }

    #[test]
    fn test_forbidden_never_counts() {
        let findings = FailedLoginRule::new(5).evaluate(&repeat(500, "10.0.0.2", "/login", "403"));
        assert!(findings.is_empty());
    }

    #[test]
    fn test_login_anywhere_in_path_case_insensitive() {
        let mut records = repeat(3, "10.0.0.4", "/user/LOGIN", "401");
        records.extend(repeat(3, "10.0.0.4", "/api/login?next=/", "401"));
        records.extend(repeat(10, "10.0.0.4", "/logout", "401"));

        let findings = FailedLoginRule::new(5).evaluate(&records);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].count, 6);
    }
}
