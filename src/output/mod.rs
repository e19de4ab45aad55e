mod html;

use crate::analysis::AnalysisReport;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while writing a report
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),
}

/// Output handler for analysis reports
pub struct OutputHandler {
    format: OutputFormat,
    writer: Box<dyn Write>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
    Jsonl,
    Html,
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "html" => Ok(OutputFormat::Html),
            _ => Err(OutputError::UnknownFormat(s.to_string())),
        }
    }
}

impl OutputHandler {
    /// Create a handler writing to `file_path`, or stdout when `None`
    pub fn new(format: OutputFormat, file_path: Option<PathBuf>) -> Result<Self, OutputError> {
        let writer: Box<dyn Write> = match file_path {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(io::stdout()),
        };

        Ok(OutputHandler { format, writer })
    }

    /// Create a handler around an arbitrary writer
    pub fn from_writer<W: Write + 'static>(format: OutputFormat, writer: W) -> Self {
        OutputHandler {
            format,
            writer: Box::new(writer),
        }
    }

    /// Write an analysis report
    pub fn write_report(&mut self, report: &AnalysisReport) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Console => self.write_console(report)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.writer, report)?;
                writeln!(self.writer)?;
            }
            OutputFormat::Jsonl => {
                for finding in &report.findings {
                    serde_json::to_writer(&mut self.writer, finding)?;
                    writeln!(self.writer)?;
                }
            }
            OutputFormat::Html => {
                self.writer.write_all(html::render(report).as_bytes())?;
            }
        }
        self.flush()
    }

    fn write_console(&mut self, report: &AnalysisReport) -> Result<(), OutputError> {
        writeln!(
            self.writer,
            "Analyzed {} record(s) from {:?}: {} anomal{} found",
            report.record_count,
            report.source,
            report.findings.len(),
            if report.findings.len() == 1 { "y" } else { "ies" }
        )?;

        if report.findings.is_empty() {
            writeln!(self.writer, "No anomalies detected")?;
        }

        for finding in &report.findings {
            writeln!(
                self.writer,
                "[{}] {} - IP: {}, Count: {}, Severity: {}",
                finding.kind, finding.message, finding.ip, finding.count, finding.severity
            )?;
        }
        Ok(())
    }

    /// Flush any buffered output
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }
}
