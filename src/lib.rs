pub mod analysis;
pub mod config;
pub mod detection;
pub mod generator;
pub mod input;
pub mod models;
pub mod output;

// Re-export commonly used types
pub use analysis::{AnalysisReport, Analyzer};
pub use config::Config;
pub use detection::{detect, AnomalyDetector, Rule};
pub use input::{parse, parse_file};
pub use models::{AnomalyFinding, FindingKind, LogRecord};
pub use output::{OutputFormat, OutputHandler};
