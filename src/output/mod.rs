//! Report emitters
//!
//! Each emitter renders the same [`AnalysisReport`] into one artifact. They
//! run independently: a failing emitter does not stop the others.

pub mod csv_report;
pub mod html;
pub mod json;
pub mod terminal;

pub use csv_report::CsvReport;
pub use html::HtmlReport;
pub use json::JsonReport;
pub use terminal::TerminalReport;

use crate::models::AnalysisReport;
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Cannot create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders an analysis report into one output format
pub trait ReportEmitter {
    /// Short format name used in log messages
    fn name(&self) -> &'static str;

    /// File written by this emitter, if any
    fn destination(&self) -> Option<&Path> {
        None
    }

    fn emit(&self, report: &AnalysisReport) -> Result<(), ReportError>;
}

/// Outcome of running a set of emitters
#[derive(Debug, Default)]
pub struct EmitSummary {
    /// Files written successfully
    pub written: Vec<PathBuf>,
    /// Emitters that failed, by name
    pub failed: Vec<(&'static str, ReportError)>,
}

impl EmitSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run every emitter, continuing past failures
pub fn emit_all(emitters: &[Box<dyn ReportEmitter>], report: &AnalysisReport) -> EmitSummary {
    let mut summary = EmitSummary::default();

    for emitter in emitters {
        match emitter.emit(report) {
            Ok(()) => {
                if let Some(path) = emitter.destination() {
                    log::info!("Wrote {} report to {:?}", emitter.name(), path);
                    summary.written.push(path.to_path_buf());
                }
            }
            Err(e) => {
                log::error!("Failed to write {} report: {}", emitter.name(), e);
                summary.failed.push((emitter.name(), e));
            }
        }
    }

    summary
}

/// Open `path` for writing, replacing any previous contents
pub(crate) fn create_output(path: &Path) -> Result<BufWriter<File>, ReportError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|source| ReportError::Create {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;

    struct FailingEmitter;

    impl ReportEmitter for FailingEmitter {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn emit(&self, _report: &AnalysisReport) -> Result<(), ReportError> {
            Err(ReportError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        }
    }

    #[test]
    fn test_failure_does_not_stop_other_emitters() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("results.csv");
        let report = Analyzer::default().analyze_lines([
            r#"10.0.0.1 - - [10/Oct/2024:13:55:36] "GET / HTTP/1.1" 200 1"#,
        ]);

        let emitters: Vec<Box<dyn ReportEmitter>> = vec![
            Box::new(FailingEmitter),
            Box::new(CsvReport::new(csv_path.clone())),
        ];
        let summary = emit_all(&emitters, &report);

        assert!(!summary.all_succeeded());
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "failing");
        assert_eq!(summary.written, vec![csv_path.clone()]);
        assert!(csv_path.exists());
    }

    #[test]
    fn test_unwritable_destination() {
        let report = Analyzer::default().analyze_lines(Vec::<String>::new());
        let emitter = HtmlReport::new(PathBuf::from("/nonexistent-dir/report.html"));

        let err = emitter.emit(&report).unwrap_err();
        assert!(matches!(err, ReportError::Create { .. }));
    }
}
