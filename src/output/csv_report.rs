//! CSV results file
//!
//! Three labelled sections separated by a blank line, each with its own
//! header row. Rows follow ranked order, so output is stable for a given
//! input.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::{create_output, ReportEmitter, ReportError};
use crate::models::AnalysisReport;

pub struct CsvReport {
    path: PathBuf,
}

impl CsvReport {
    pub fn new(path: PathBuf) -> Self {
        CsvReport { path }
    }

    /// Write the CSV sections to `out`
    pub fn write_to<W: Write>(report: &AnalysisReport, out: &mut W) -> Result<(), ReportError> {
        write_section(
            out,
            "Requests Per IP",
            ["IP Address", "Request Count"],
            report.requests_per_ip.ranked(),
        )?;
        out.write_all(b"\n")?;

        write_section(
            out,
            "Endpoint Access Counts",
            ["Endpoint", "Access Count"],
            report.endpoint_hits.ranked(),
        )?;
        out.write_all(b"\n")?;

        let label = format!(
            "Suspicious Activity (more than {} failed logins)",
            report.threshold
        );
        let flagged = report
            .flagged_ips
            .iter()
            .map(|f| (f.ip.as_str(), f.failed_attempts))
            .collect();
        write_section(out, &label, ["IP Address", "Failed Login Attempts"], flagged)?;

        Ok(())
    }
}

/// One labelled section. Each section gets its own csv writer so the blank
/// separator line can go straight to `out`; the csv writer would quote an
/// empty record.
fn write_section<W: Write>(
    out: &mut W,
    label: &str,
    headers: [&str; 2],
    rows: Vec<(&str, u64)>,
) -> Result<(), ReportError> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(&mut *out);

    writer.write_record([label])?;
    writer.write_record(headers)?;
    for (key, count) in rows {
        writer.write_record([key, count.to_string().as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

impl ReportEmitter for CsvReport {
    fn name(&self) -> &'static str {
        "CSV"
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
