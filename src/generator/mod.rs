//! Synthetic access log generator
//!
//! Produces lines in the same format the parser accepts, drawing clients and
//! paths from small fixed pools and statuses from a weighted distribution.

use chrono::{Duration, Local};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

const PATHS: &[&str] = &["/", "/about", "/contact", "/login", "/wp-admin", "/admin", "/config"];

const STATUSES: &[(&str, u32)] = &[("200", 80), ("404", 10), ("500", 5), ("403", 3), ("302", 2)];

const RESPONSE_SIZE: u32 = 5432;

/// Generated timestamps fall within this many seconds before now
const MAX_AGE_SECS: i64 = 86_400;

/// Errors that can occur while writing a sample log
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid status weights: {0}")]
    Weights(#[from] rand::distributions::WeightedError),
}

/// Generates sample access log lines
pub struct SampleGenerator {
    ips: Vec<String>,
    status_dist: WeightedIndex<u32>,
}

impl SampleGenerator {
    pub fn new() -> Result<Self, GeneratorError> {
        let ips = (1..50).map(|i| format!("192.168.1.{}", i)).collect();
        let status_dist = WeightedIndex::new(STATUSES.iter().map(|&(_, weight)| weight))?;

        Ok(SampleGenerator { ips, status_dist })
    }

    /// Generate a single log line, without trailing newline
    pub fn entry<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let timestamp = Local::now() - Duration::seconds(rng.gen_range(0..=MAX_AGE_SECS));
        let ip = self.ips.choose(rng).map(String::as_str).unwrap_or("192.168.1.1");
        let path = PATHS.choose(rng).copied().unwrap_or("/");
        let status = STATUSES[self.status_dist.sample(rng)].0;

        format!(
            "{} - - [{}] \"GET {} HTTP/1.1\" {} {}",
            ip,
            timestamp.format("%d/%b/%Y:%H:%M:%S %z"),
            path,
            status,
            RESPONSE_SIZE
        )
    }

    /// Write `count` lines to `path`, creating parent directories as needed
    pub fn write_to<R: Rng + ?Sized>(
        &self,
        path: &Path,
        count: usize,
        rng: &mut R,
    ) -> Result<(), GeneratorError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        for _ in 0..count {
            writeln!(writer, "{}", self.entry(rng))?;
        }
        writer.flush()?;

        log::info!("Wrote {} sample log line(s) to {:?}", count, path);
        Ok(())
    }
}
