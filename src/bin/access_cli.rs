use std::path::{Path, PathBuf};
use structopt::StructOpt;

use weblog_sentinel::config::Config;
use weblog_sentinel::generator::SampleGenerator;
use weblog_sentinel::input::{self, stage_upload};
use weblog_sentinel::output::{OutputFormat, OutputHandler};
use weblog_sentinel::Analyzer;

/// Access log analyzer command line interface
#[derive(StructOpt, Debug)]
#[structopt(name = "access_cli", about = "Access log anomaly detection CLI")]
pub enum Cli {
    /// Analyze a log file and report anomalies
    Analyze {
        /// Path to configuration file
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
        /// Log file to analyze (defaults to the staged upload)
        #[structopt(short, long)]
        file: Option<PathBuf>,
        /// Output format: console, json, jsonl or html
        #[structopt(long)]
        format: Option<OutputFormat>,
        /// Write the report to this file instead of stdout
        #[structopt(short, long)]
        output: Option<PathBuf>,
    },
    /// Stage a .log file for analysis
    Upload {
        /// Path to configuration file
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
        /// Log file to upload
        #[structopt(short, long)]
        file: PathBuf,
    },
    /// Generate a sample access log
    Generate {
        /// Path to configuration file
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
        /// Output path (defaults to the configured generator path)
        #[structopt(short, long)]
        output: Option<PathBuf>,
        /// Number of lines to generate
        #[structopt(short = "n", long)]
        count: Option<usize>,
    },
    /// Parse and display records from a log file
    Parse {
        /// Path to log file
        #[structopt(short, long)]
        file: PathBuf,
        /// Number of records to display
        #[structopt(short, long, default_value = "10")]
        lines: usize,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the configuration file
        #[structopt(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}

fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        Ok(Config::from_file(path)?)
    } else {
        log::debug!("Config file {:?} not found, using defaults", path);
        Ok(Config::default())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let cli = Cli::from_args();

    match cli {
        Cli::Analyze { config, file, format, output } => {
            let config = load_config(&config)?;
            let log_path = file.unwrap_or_else(|| config.input.staged_path());

            let report = Analyzer::new(&config.detection).analyze_file(&log_path);
            if report.is_empty() {
                eprintln!("No log records found in {:?}", log_path);
                eprintln!("Run 'access_cli upload' or 'access_cli generate' to provide a log");
                std::process::exit(1);
            }

            let format = match format {
                Some(format) => format,
                None => config.output.format.parse()?,
            };
            let mut handler = OutputHandler::new(format, output.or(config.output.file_path))?;
            handler.write_report(&report)?;
        }
        Cli::Upload { config, file } => {
            let config = load_config(&config)?;
            let staged = stage_upload(&config.input, &file)?;
            println!("Uploaded {:?} to {:?}", file, staged);
        }
        Cli::Generate { config, output, count } => {
            let config = load_config(&config)?;
            let path = output.unwrap_or(config.generator.output_path);
            let count = count.unwrap_or(config.generator.entries);

            let generator = SampleGenerator::new()?;
            generator.write_to(&path, count, &mut rand::thread_rng())?;
            println!("Generated {} log line(s) in {:?}", count, path);
        }
        Cli::Parse { file, lines } => {
            if !file.exists() {
                eprintln!("File not found: {:?}", file);
                std::process::exit(1);
            }

            let records = input::parse_file(&file);
            let display_count = std::cmp::min(lines, records.len());

            println!("Parsed {} record(s) (showing {}):\n", records.len(), display_count);
            for record in records.iter().take(display_count) {
                println!(
                    "  IP: {}, Time: {}, Request: {} {} {}, Status: {}, Size: {}",
                    record.ip,
                    record.timestamp,
                    record.method,
                    record.path,
                    record.protocol,
                    record.status,
                    record.size
                );
            }
        }
        Cli::Config { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Default configuration written to: {:?}", output);
        }
    }

    Ok(())
}
