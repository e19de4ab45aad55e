//! High request volume per client

use super::{calculate_severity, count_by, Rule};
use crate::models::{AnomalyFinding, FindingKind, LogRecord};

/// Flags clients with more than `threshold` requests in the log
pub struct HighFrequencyRule {
    threshold: usize,
}

impl HighFrequencyRule {
    pub fn new(threshold: usize) -> Self {
        HighFrequencyRule { threshold }
    }
}

impl Rule for HighFrequencyRule {
    fn name(&self) -> &'static str {
        "high_frequency"
    }

    fn kind(&self) -> FindingKind {
        FindingKind::HighFrequency
    }

    fn evaluate(&self, records: &[LogRecord]) -> Vec<AnomalyFinding> {
        let mut counts: Vec<(&str, usize)> = count_by(records, |r| r.ip.as_str())
            .into_iter()
            .filter(|&(_, count)| count > self.threshold)
            .collect();

        // Busiest clients first
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        counts
            .into_iter()
            .map(|(ip, count)| AnomalyFinding {
                kind: self.kind(),
                ip: ip.to_string(),
                path: None,
                count,
                severity: calculate_severity(count, self.threshold),
                message: format!("Excessive requests ({}) from single IP", count),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::tests::{record, repeat};

    #[test]
    fn test_threshold_is_strict() {
        let rule = HighFrequencyRule::new(1000);

        assert!(rule.evaluate(&repeat(1000, "1.1.1.1", "/", "200")).is_empty());

        let findings = rule.evaluate(&repeat(1001, "1.1.1.1", "/", "200"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].count, 1001);
        assert_eq!(findings[0].message, "Excessive requests (1001) from single IP");
        assert_eq!(findings[0].severity, 7);
    }

    #[test]
    fn test_count_matches_records_per_ip() {
        let rule = HighFrequencyRule::new(2);
        let mut records = repeat(4, "10.0.0.1", "/", "200");
        records.extend(repeat(2, "10.0.0.2", "/about", "404"));
        records.push(record("10.0.0.1", "/contact", "500"));

        let findings = rule.evaluate(&records);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].ip, "10.0.0.1");
        assert_eq!(findings[0].count, 5);
        assert!(findings[0].path.is_none());
    }

    #[test]
    fn test_sorted_by_count_descending() {
        let rule = HighFrequencyRule::new(1);
        let mut records = repeat(2, "10.0.0.9", "/", "200");
        records.extend(repeat(5, "10.0.0.5", "/", "200"));
        records.extend(repeat(2, "10.0.0.1", "/", "200"));

        let ips: Vec<String> = rule.evaluate(&records).into_iter().map(|f| f.ip).collect();
        assert_eq!(ips, vec!["10.0.0.5", "10.0.0.1", "10.0.0.9"]);
    }
}
