use std::io::Write;
use std::path::{Path, PathBuf};

use super::{create_output, ReportEmitter, ReportError};
use crate::models::AnalysisReport;

const STYLE: &str = r#"      body {
        font-family: Arial, sans-serif;
        margin: 20px;
        background-color: #f4f4f9;
        color: #333;
      }
      h1, h2 {
        text-align: center;
        color: #0047ab;
      }
      p {
        text-align: center;
      }
      table {
        width: 80%;
        margin: 20px auto;
        border-collapse: collapse;
        box-shadow: 0 2px 5px rgba(0, 0, 0, 0.1);
        background-color: #ffffff;
      }
      th, td {
        border: 1px solid #dddddd;
        text-align: center;
        padding: 10px;
      }
      th {
        background-color: #0047ab;
        color: white;
        font-weight: bold;
      }
      tr:nth-child(even) {
        background-color: #f9f9f9;
      }
      tr.flagged td {
        color: #b00020;
        font-weight: bold;
      }
"#;

/// Self-contained HTML report page
pub struct HtmlReport {
    path: PathBuf,
}

impl HtmlReport {
    pub fn new(path: PathBuf) -> Self {
        HtmlReport { path }
    }

    pub fn write_to<W: Write>(report: &AnalysisReport, out: &mut W) -> Result<(), ReportError> {
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html>")?;
        writeln!(out, "  <head>")?;
        writeln!(out, "    <meta charset=\"utf-8\">")?;
        writeln!(out, "    <title>Log Analysis Report</title>")?;
        writeln!(out, "    <style>\n{}    </style>", STYLE)?;
        writeln!(out, "  </head>")?;
        writeln!(out, "  <body>")?;
        writeln!(out, "    <h1>Log Analysis Report</h1>")?;
        writeln!(
            out,
            "    <p>{} line(s) parsed, {} skipped, {} byte(s) served.</p>",
            report.lines_parsed, report.lines_skipped, report.total_bytes
        )?;
        if let (Some(first), Some(last)) = (report.first_seen, report.last_seen) {
            writeln!(
                out,
                "    <p>Log period: {} to {}</p>",
                first.format("%Y-%m-%d %H:%M:%S UTC"),
                last.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
        }

        writeln!(out, "    <h2>Requests Per IP</h2>")?;
        write_table(
            out,
            ("IP Address", "Request Count"),
            report.requests_per_ip.ranked(),
            None,
        )?;

        writeln!(out, "    <h2>Endpoint Access Counts</h2>")?;
        match report.most_accessed_endpoint() {
            Some((endpoint, hits)) => writeln!(
                out,
                "    <p>Most frequently accessed: <code>{}</code> (Accessed {} times)</p>",
                escape_html(endpoint),
                hits
            )?,
            None => writeln!(out, "    <p>No endpoints accessed.</p>")?,
        }
        write_table(
            out,
            ("Endpoint", "Access Count"),
            report.endpoint_hits.ranked(),
            None,
        )?;

        writeln!(
            out,
            "    <h2>Suspicious Activity (more than {} failed logins)</h2>",
            report.threshold
        )?;
        if report.has_suspicious_activity() {
            let rows = report
                .flagged_ips
                .iter()
                .map(|f| (f.ip.as_str(), f.failed_attempts))
                .collect();
            write_table(
                out,
                ("IP Address", "Failed Login Attempts"),
                rows,
                Some("flagged"),
            )?;
        } else {
            writeln!(out, "    <p>No suspicious activity detected.</p>")?;
        }

        writeln!(out, "  </body>")?;
        writeln!(out, "</html>")?;
        Ok(())
    }
}

fn write_table<W: Write>(
    out: &mut W,
    headers: (&str, &str),
    rows: Vec<(&str, u64)>,
    row_class: Option<&str>,
) -> Result<(), ReportError> {
    let tr = match row_class {
        Some(class) => format!("<tr class=\"{}\">", class),
        None => "<tr>".to_string(),
    };

    writeln!(out, "    <table>")?;
    writeln!(out, "      <tr><th>{}</th><th>{}</th></tr>", headers.0, headers.1)?;
    for (key, count) in rows {
        writeln!(out, "      {}<td>{}</td><td>{}</td></tr>", tr, escape_html(key), count)?;
    }
    writeln!(out, "    </table>")?;
    Ok(())
}

/// Escape text for use in HTML element content
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl ReportEmitter for HtmlReport {
    fn name(&self) -> &'static str {
        "HTML"
    }

    fn destination(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn emit(&self, report: &AnalysisReport) -> Result<(), ReportError> {
        let mut file = create_output(&self.path)?;
        Self::write_to(report, &mut file)?;
        file.flush()?;
        Ok(())
    }
}
