//! Standalone HTML rendering of an analysis report

use crate::analysis::AnalysisReport;
use std::fmt::Write;

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse}\
th,td{border:1px solid #ccc;padding:4px 8px;text-align:left}\
th{background:#eee}";

pub(super) fn render(report: &AnalysisReport) -> String {
    let mut page = String::new();

    // Writing into a String cannot fail
    let _ = write!(
        page,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Log Analysis Results</title>\n<style>{}</style>\n</head>\n<body>\n\
         <h1>Log Analysis Results</h1>\n\
         <p>{} record(s) from <code>{}</code>, generated {}</p>\n",
        STYLE,
        report.record_count,
        escape(&report.source.display().to_string()),
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );

    if report.findings.is_empty() {
        page.push_str("<p>No anomalies detected.</p>\n");
    } else {
        page.push_str(
            "<table>\n<tr><th>Type</th><th>IP</th><th>Path</th>\
             <th>Count</th><th>Severity</th><th>Details</th></tr>\n",
        );
        for finding in &report.findings {
            let _ = writeln!(
                page,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                finding.kind,
                escape(&finding.ip),
                escape(finding.path.as_deref().unwrap_or("")),
                finding.count,
                finding.severity,
                escape(&finding.message),
            );
        }
        page.push_str("</table>\n");
    }

    page.push_str("</body>\n</html>\n");
    page
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
