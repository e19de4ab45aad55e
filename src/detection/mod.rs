//! Rule-based anomaly detection over a batch of parsed records
//!
//! Each rule is an independent, stateless check over the full record set.
//! The detector evaluates its rules in order and concatenates their findings.

pub mod error_rate;
pub mod failed_login;
pub mod high_frequency;
pub mod suspicious_path;

pub use error_rate::ErrorRateRule;
pub use failed_login::FailedLoginRule;
pub use high_frequency::HighFrequencyRule;
pub use suspicious_path::SuspiciousPathRule;

use crate::config::DetectionConfig;
use crate::models::{AnomalyFinding, FindingKind, LogRecord};
use std::collections::BTreeMap;

/// A single detection rule
pub trait Rule {
    /// Short rule name used in logs
    fn name(&self) -> &'static str;

    /// Kind of finding this rule emits
    fn kind(&self) -> FindingKind;

    /// Evaluate the rule against the full record set
    fn evaluate(&self, records: &[LogRecord]) -> Vec<AnomalyFinding>;
}

/// Ordered collection of detection rules
pub struct AnomalyDetector {
    rules: Vec<Box<dyn Rule>>,
}

impl AnomalyDetector {
    /// Create a detector with every rule enabled at its default threshold
    pub fn new() -> Self {
        Self::from_config(&DetectionConfig::default())
    }

    /// Create a detector from configuration, skipping disabled rules
    pub fn from_config(config: &DetectionConfig) -> Self {
        let mut rules: Vec<Box<dyn Rule>> = Vec::new();

        if config.enable_high_frequency {
            rules.push(Box::new(HighFrequencyRule::new(config.high_frequency_threshold)));
        }
        if config.enable_error_rate {
            rules.push(Box::new(ErrorRateRule::new(config.error_rate_threshold)));
        }
        if config.enable_suspicious_path {
            rules.push(Box::new(SuspiciousPathRule::new()));
        }
        if config.enable_failed_logins {
            rules.push(Box::new(FailedLoginRule::new(config.failed_login_threshold)));
        }

        AnomalyDetector { rules }
    }

    /// Create a detector from an explicit rule list
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        AnomalyDetector { rules }
    }

    /// Names of the active rules, in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule over the records
    pub fn detect(&self, records: &[LogRecord]) -> Vec<AnomalyFinding> {
        let mut findings = Vec::new();

        for rule in &self.rules {
            let found = rule.evaluate(records);
            log::debug!("Rule {} produced {} finding(s)", rule.name(), found.len());
            findings.extend(found);
        }

        findings
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the default rule set over the records
pub fn detect(records: &[LogRecord]) -> Vec<AnomalyFinding> {
    AnomalyDetector::new().detect(records)
}

/// Count records per key, sorted by key
pub(crate) fn count_by<'a, K, F>(
    records: impl IntoIterator<Item = &'a LogRecord>,
    key: F,
) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&'a LogRecord) -> K,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

/// Severity from how far a count exceeds its threshold
pub(crate) fn calculate_severity(actual: usize, threshold: usize) -> u8 {
    let ratio = actual as f64 / threshold.max(1) as f64;
    if ratio > 5.0 {
        10
    } else if ratio > 3.0 {
        9
    } else if ratio > 2.0 {
        8
    } else {
        7
    }
}
