//! Probing of sensitive paths
//!
//! Every (client, path) pair that touches an admin panel, dotfile or
//! version-control directory is reported, even a single hit.

use super::{count_by, Rule};
use crate::models::{AnomalyFinding, FindingKind, LogRecord};
use regex::Regex;
use std::sync::LazyLock;

static SUSPICIOUS_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^/wp-admin|^/admin|\.env$|/config/|/\.git|/\.svn)")
        .expect("suspicious path regex")
});

/// Severity for path probes, which carry no threshold
const PROBE_SEVERITY: u8 = 6;

/// Reports every client/path pair that matches a sensitive path pattern
pub struct SuspiciousPathRule;

impl SuspiciousPathRule {
    pub fn new() -> Self {
        SuspiciousPathRule
    }

    pub fn is_suspicious(path: &str) -> bool {
        SUSPICIOUS_PATH.is_match(path)
    }
}

impl Default for SuspiciousPathRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for SuspiciousPathRule {
    fn name(&self) -> &'static str {
        "suspicious_path"
    }

    fn kind(&self) -> FindingKind {
        FindingKind::SuspiciousPath
    }

    fn evaluate(&self, records: &[LogRecord]) -> Vec<AnomalyFinding> {
        let probes = records.iter().filter(|r| Self::is_suspicious(&r.path));

        count_by(probes, |r| (r.ip.as_str(), r.path.as_str()))
            .into_iter()
            .map(|((ip, path), count)| AnomalyFinding {
                kind: self.kind(),
                ip: ip.to_string(),
                path: Some(path.to_string()),
                count,
                severity: PROBE_SEVERITY,
                message: format!("Accessed {} ({} times)", path, count),
            })
            .collect()
    }
}
