use std::io::{self, Write};

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{ReportEmitter, ReportError};
use crate::models::AnalysisReport;

#[derive(Tabled)]
struct IpRow {
    #[tabled(rename = "IP Address")]
    ip: String,
    #[tabled(rename = "Request Count")]
    requests: u64,
}

#[derive(Tabled)]
struct EndpointRow {
    #[tabled(rename = "Endpoint")]
    endpoint: String,
    #[tabled(rename = "Access Count")]
    hits: u64,
}

#[derive(Tabled)]
struct FlaggedRow {
    #[tabled(rename = "IP Address")]
    ip: String,
    #[tabled(rename = "Failed Login Attempts")]
    failed_attempts: u64,
}

/// Human readable summary on standard output
pub struct TerminalReport {
    top_n: usize,
}

impl TerminalReport {
    pub fn new(top_n: usize) -> Self {
        TerminalReport { top_n }
    }

    /// Render the summary shown on the terminal
    pub fn render(&self, report: &AnalysisReport) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write_to(report, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn write_to<W: Write>(&self, report: &AnalysisReport, out: &mut W) -> io::Result<()> {
        writeln!(out, "\n=== Overview ===")?;
        writeln!(
            out,
            "Parsed {} line(s), skipped {} malformed line(s), {} byte(s) served",
            report.lines_parsed, report.lines_skipped, report.total_bytes
        )?;
        if let (Some(first), Some(last)) = (report.first_seen, report.last_seen) {
            writeln!(
                out,
                "Log period: {} to {}",
                first.format("%Y-%m-%d %H:%M:%S UTC"),
                last.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
        }

        writeln!(out, "\n=== Top {} IPs by Request Count ===", self.top_n)?;
        let ips = report
            .requests_per_ip
            .top(self.top_n)
            .into_iter()
            .map(|(ip, requests)| IpRow {
                ip: ip.to_string(),
                requests,
            });
        writeln!(out, "{}", Table::new(ips).with(Style::ascii()))?;

        writeln!(out, "\n=== Top {} Endpoints ===", self.top_n)?;
        let endpoints = report
            .endpoint_hits
            .top(self.top_n)
            .into_iter()
            .map(|(endpoint, hits)| EndpointRow {
                endpoint: endpoint.to_string(),
                hits,
            });
        writeln!(out, "{}", Table::new(endpoints).with(Style::ascii()))?;

        writeln!(out, "\n=== Most Frequently Accessed Endpoint ===")?;
        match report.most_accessed_endpoint() {
            Some((endpoint, hits)) => writeln!(out, "{} (Accessed {} times)", endpoint, hits)?,
            None => writeln!(out, "No endpoints accessed.")?,
        }

        writeln!(
            out,
            "\n=== Suspicious Activity (more than {} failed logins) ===",
            report.threshold
        )?;
        if report.has_suspicious_activity() {
            let flagged = report.flagged_ips.iter().map(|f| FlaggedRow {
                ip: f.ip.clone(),
                failed_attempts: f.failed_attempts,
            });
            writeln!(out, "{}", Table::new(flagged).with(Style::ascii()))?;
        } else {
            writeln!(out, "No suspicious activity detected.")?;
        }

        Ok(())
    }
}

impl ReportEmitter for TerminalReport {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn emit(&self, report: &AnalysisReport) -> Result<(), ReportError> {
        let mut stdout = io::stdout().lock();
        self.write_to(report, &mut stdout)?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;

    fn report_with(lines: &[&str]) -> AnalysisReport {
        Analyzer::default().analyze_lines(lines)
    }

    #[test]
    fn test_render_truncates_to_top_n() {
        let lines: Vec<String> = (1..=5)
            .flat_map(|i| {
                std::iter::repeat(format!(
                    r#"10.0.0.{} - - [10/Oct/2024:13:55:36] "GET /p{} HTTP/1.1" 200 1"#,
                    i, i
                ))
                .take(i)
            })
            .collect();
        let report = Analyzer::default().analyze_lines(&lines);
        let text = TerminalReport::new(2).render(&report).unwrap();

        assert!(text.contains("Top 2 IPs"));
        assert!(text.contains("10.0.0.5"));
        assert!(text.contains("10.0.0.4"));
        assert!(!text.contains("10.0.0.3"));
        assert!(text.contains("/p5 (Accessed 5 times)"));
    }

    #[test]
    fn test_render_no_suspicious_activity() {
        let report = report_with(&[r#"10.0.0.1 - - [10/Oct/2024:13:55:36] "POST /login HTTP/1.1" 401 0"#]);
        let text = TerminalReport::new(10).render(&report).unwrap();

        assert!(text.contains("No suspicious activity detected."));
        assert!(text.contains("Log period: 2024-10-10 13:55:36 UTC to 2024-10-10 13:55:36 UTC"));
    }

    #[test]
    fn test_render_flagged_table() {
        let line = r#"10.0.0.2 - - [10/Oct/2024:13:56:00] "POST /login HTTP/1.1" 401 128"#;
        let lines = vec![line; 11];
        let report = report_with(&lines);
        let text = TerminalReport::new(10).render(&report).unwrap();

        let suspicious = text.split("=== Suspicious Activity").nth(1).unwrap();
        assert!(suspicious.contains("Failed Login Attempts"));
        let row = suspicious.lines().find(|l| l.contains("10.0.0.2")).unwrap();
        assert!(row.contains("11"));
    }

    #[test]
    fn test_render_empty_report() {
        let report = report_with(&[]);
        let text = TerminalReport::new(10).render(&report).unwrap();

        assert!(text.contains("No endpoints accessed."));
        assert!(!text.contains("Log period"));
    }
}
