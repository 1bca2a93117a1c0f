use std::io::Write;
use std::path::{Path, PathBuf};

use super::{create_output, ReportEmitter, ReportError};
use crate::models::AnalysisReport;

/// Pretty-printed JSON export of the full report
pub struct JsonReport {
    path: PathBuf,
}

impl JsonReport {
    pub fn new(path: PathBuf) -> Self {
        JsonReport { path }
    }
}

impl ReportEmitter for JsonReport {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn destination(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn emit(&self, report: &AnalysisReport) -> Result<(), ReportError> {
        let mut file = create_output(&self.path)?;
        serde_json::to_writer_pretty(&mut file, report)?;
        file.write_all(b"\n")?;
        file.flush()?;
        Ok(())
    }
}
