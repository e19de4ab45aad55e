//! Access log parser
//!
//! Parses the combined web server log format:
//! `ip ident authuser [timestamp] "METHOD /path PROTOCOL" status size`
//!
//! Anything after the size field (referrer, user agent) is ignored.

use crate::models::LogRecord;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

static ACCESS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\S+) (\S+) (\S+) \[([^\]]+)\] "(\S+) (\S+) (\S+)" (\d+) (\d+)"#)
        .expect("access log regex")
});

/// Parse a single log line, returning `None` if it does not match the grammar
pub fn parse_line(line: &str) -> Option<LogRecord> {
    let caps = ACCESS_LINE.captures(line)?;

    Some(LogRecord {
        ip: caps[1].to_string(),
        timestamp: caps[4].to_string(),
        method: caps[5].to_string(),
        path: caps[6].to_string(),
        protocol: caps[7].to_string(),
        status: caps[8].to_string(),
        size: caps[9].to_string(),
    })
}

/// Parse every matching line of a reader
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Non-matching lines and lines
/// that are not valid UTF-8 are skipped. A read error stops parsing and keeps
/// the records collected so far.
pub fn parse<R: BufRead>(mut source: R) -> Vec<LogRecord> {
    let mut records = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match source.read_until(b'\n', &mut buf) {
            Ok(0) => break, // EOF
            Ok(_) => {
                for chunk in buf.split(|&b| b == b'\r') {
                    let Ok(line) = std::str::from_utf8(chunk) else {
                        continue;
                    };
                    if let Some(record) = parse_line(line) {
                        records.push(record);
                    }
                }
            }
            Err(e) => {
                log::warn!("Stopped reading log after {} record(s): {}", records.len(), e);
                break;
            }
        }
    }

    records
}

/// Parse a log file from disk
///
/// A file that cannot be opened yields an empty record set; the failure is
/// logged rather than returned.
pub fn parse_file(path: &Path) -> Vec<LogRecord> {
    match File::open(path) {
        Ok(file) => {
            let records = parse(BufReader::new(file));
            log::debug!("Parsed {} record(s) from {:?}", records.len(), path);
            records
        }
        Err(e) => {
            log::error!("Error parsing log {:?}: {}", path, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const LINE: &str =
        r#"10.0.0.1 - - [01/Jan/2024:00:00:00 +0000] "GET /wp-admin HTTP/1.1" 200 100"#;

    #[test]
    fn test_parse_line() {
        let record = parse_line(LINE).unwrap();
        assert_eq!(record.ip, "10.0.0.1");
        assert_eq!(record.timestamp, "01/Jan/2024:00:00:00 +0000");
        assert_eq!(record.method, "GET");
        assert_eq!(record.path, "/wp-admin");
        assert_eq!(record.protocol, "HTTP/1.1");
        assert_eq!(record.status, "200");
        assert_eq!(record.size, "100");
    }

    #[test]
    fn test_combined_format_trailer_ignored() {
        let line = r#"127.0.0.1 - frank [10/Oct/2000:13:55:36 -0700] "POST /login HTTP/1.0" 401 2326 "http://example.com/" "Mozilla/5.0""#;
        let record = parse_line(line).unwrap();
        assert_eq!(record.path, "/login");
        assert_eq!(record.status, "401");
        assert_eq!(record.size, "2326");
    }

    #[test]
    fn test_status_keeps_leading_zeros() {
        let line = r#"10.0.0.1 - - [01/Jan/2024:00:00:00 +0000] "GET / HTTP/1.1" 0401 0"#;
        assert_eq!(parse_line(line).unwrap().status, "0401");
    }

    #[test]
    fn test_rejects_malformed_lines() {
        let cases = [
            // missing closing bracket
            r#"10.0.0.1 - - [01/Jan/2024:00:00:00 +0000 "GET / HTTP/1.1" 200 100"#,
            // unterminated quote
            r#"10.0.0.1 - - [01/Jan/2024:00:00:00 +0000] "GET / HTTP/1.1 200 100"#,
            // request line with two parts
            r#"10.0.0.1 - - [01/Jan/2024:00:00:00 +0000] "GET /" 200 100"#,
            // non-numeric status
            r#"10.0.0.1 - - [01/Jan/2024:00:00:00 +0000] "GET / HTTP/1.1" abc 100"#,
            // non-numeric size
            r#"10.0.0.1 - - [01/Jan/2024:00:00:00 +0000] "GET / HTTP/1.1" 200 -"#,
            // empty timestamp
            r#"10.0.0.1 - - [] "GET / HTTP/1.1" 200 100"#,
            // leading whitespace
            r#" 10.0.0.1 - - [01/Jan/2024:00:00:00 +0000] "GET / HTTP/1.1" 200 100"#,
            "",
            "garbage",
        ];

        for line in cases {
            assert!(parse_line(line).is_none(), "should reject: {line:?}");
        }
    }

    #[test]
    fn test_parse_skips_bad_lines_and_keeps_order() {
        let input = format!(
            "{LINE}\nnot a log line\n{}\n",
            LINE.replace("10.0.0.1", "10.0.0.2")
        );
        let records = parse(Cursor::new(input));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ip, "10.0.0.1");
        assert_eq!(records[1].ip, "10.0.0.2");
    }

    #[test]
    fn test_parse_skips_invalid_utf8() {
        let mut input = Vec::new();
        input.extend_from_slice(b"\xff\xfe broken\n");
        input.extend_from_slice(LINE.as_bytes());
        input.push(b'\n');

        let records = parse(Cursor::new(input));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_handles_crlf_and_missing_final_newline() {
        let input = format!("{LINE}\r\n{LINE}");
        let records = parse(Cursor::new(input));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].size, "100");
    }

    #[test]
    fn test_parse_handles_carriage_return_only_breaks() {
        let second = LINE.replace("10.0.0.1", "10.0.0.2");
        let input = format!("{LINE}\r{second}\rgarbage\r{LINE}\r");
        let records = parse(Cursor::new(input));

        let ips: Vec<&str> = records.iter().map(|r| r.ip.as_str()).collect();
        assert_eq!(ips, vec!["10.0.0.1", "10.0.0.2", "10.0.0.1"]);
    }

    #[test]
    fn test_parse_file_is_repeatable() {
        let mut file = NamedTempFile::new().unwrap();
        for _ in 0..3 {
            writeln!(file, "{LINE}").unwrap();
        }
        writeln!(file, "10.0.0.9 - - [01/Jan/2024:00:00:00 +0000").unwrap();

        let first = parse_file(file.path());
        let second = parse_file(file.path());
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(parse_file(&dir.path().join("missing.log")).is_empty());
    }
}
