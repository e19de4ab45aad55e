//! Parse-and-detect pipeline for a single log file

use crate::config::DetectionConfig;
use crate::detection::AnomalyDetector;
use crate::input;
use crate::models::AnomalyFinding;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Result of analyzing one log file
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: PathBuf,
    pub generated_at: DateTime<Utc>,
    /// Number of lines that parsed into records
    pub record_count: usize,
    pub findings: Vec<AnomalyFinding>,
}

impl AnalysisReport {
    /// True when the file yielded no records at all
    ///
    /// An empty report means there was nothing to analyze, which is
    /// different from a log with no anomalies.
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// Runs the parser and detector over log files
pub struct Analyzer {
    detector: AnomalyDetector,
}

impl Analyzer {
    pub fn new(config: &DetectionConfig) -> Self {
        Analyzer {
            detector: AnomalyDetector::from_config(config),
        }
    }

    /// Create an analyzer around an existing detector
    pub fn with_detector(detector: AnomalyDetector) -> Self {
        Analyzer { detector }
    }

    /// Parse `path` and run detection over its records
    pub fn analyze_file(&self, path: &Path) -> AnalysisReport {
        let records = input::parse_file(path);
        log::info!("Parsed {} record(s) from {:?}", records.len(), path);

        let findings = if records.is_empty() {
            Vec::new()
        } else {
            self.detector.detect(&records)
        };

        AnalysisReport {
            source: path.to_path_buf(),
            generated_at: Utc::now(),
            record_count: records.len(),
            findings,
        }
    }
}
