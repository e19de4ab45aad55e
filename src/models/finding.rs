use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a detected anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    HighFrequency,
    HighErrorRate,
    SuspiciousPath,
    FailedLogins,
}

impl FindingKind {
    pub fn label(&self) -> &'static str {
        match self {
            FindingKind::HighFrequency => "High Frequency",
            FindingKind::HighErrorRate => "High Error Rate",
            FindingKind::SuspiciousPath => "Suspicious Path",
            FindingKind::FailedLogins => "Failed Logins",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single anomaly produced by one detection pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyFinding {
    pub kind: FindingKind,
    /// Offending client address
    pub ip: String,
    /// Probed path, only set for suspicious path findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// The measured quantity that triggered the finding
    pub count: usize,
    /// 1-10, scaled by how far `count` exceeds the rule threshold
    pub severity: u8,
    pub message: String,
}
