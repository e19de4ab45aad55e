use std::env;
use std::path::PathBuf;

use weblog_sentinel::config::Config;
use weblog_sentinel::output::{OutputFormat, OutputHandler};
use weblog_sentinel::Analyzer;

/// Analyze the staged access log once and report any anomalies
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Load configuration
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    let config = if config_path.exists() {
        Config::from_file(&config_path)?
    } else {
        log::warn!("Config file not found, using defaults");
        Config::default()
    };

    let log_path = config.input.staged_path();
    log::info!("Analyzing {:?}", log_path);

    let analyzer = Analyzer::new(&config.detection);
    let report = analyzer.analyze_file(&log_path);

    if report.is_empty() {
        log::warn!(
            "No log records found in {:?}; upload a log with 'access_cli upload' first",
            log_path
        );
        std::process::exit(1);
    }

    for finding in &report.findings {
        log::warn!(
            "ANOMALY DETECTED: [{}] {} - IP: {}, Count: {}",
            finding.kind, finding.message, finding.ip, finding.count
        );
    }

    let format: OutputFormat = config.output.format.parse()?;
    let mut output_handler = OutputHandler::new(format, config.output.file_path.clone())?;
    output_handler.write_report(&report)?;

    log::info!(
        "Analysis complete: {} record(s), {} finding(s)",
        report.record_count,
        report.findings.len()
    );
    Ok(())
}
