//! Analysis pipeline
//!
//! Runs lines through the parser, aggregator and threat detector and
//! assembles the [`AnalysisReport`] handed to the emitters.

use std::path::Path;

use crate::aggregation::{Aggregates, Aggregator};
use crate::config::DetectionConfig;
use crate::detection::ThreatDetector;
use crate::input::{InputError, LogReader, ReadStats};
use crate::models::AnalysisReport;

pub struct Analyzer {
    detector: ThreatDetector,
    auth_failure_status: u16,
}

impl Analyzer {
    pub fn new(config: &DetectionConfig) -> Self {
        Analyzer {
            detector: ThreatDetector::new(config.failed_login_threshold),
            auth_failure_status: config.auth_failure_status,
        }
    }

    /// Analyze an access log on disk
    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisReport, InputError> {
        let reader = LogReader::new(path.to_path_buf());
        let mut aggregator = self.aggregator();
        let stats = reader.read_records(|record| aggregator.record(&record))?;
        Ok(self.build_report(aggregator.finish(), stats))
    }

    /// Analyze lines already in memory
    pub fn analyze_lines<I, S>(&self, lines: I) -> AnalysisReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut aggregator = self.aggregator();
        let mut stats = ReadStats::default();

        for line in lines {
            if let Some(record) = stats.observe(line.as_ref()) {
                aggregator.record(&record);
            }
        }

        self.build_report(aggregator.finish(), stats)
    }

    fn aggregator(&self) -> Aggregator {
        Aggregator::with_auth_failure_status(self.auth_failure_status)
    }

    fn build_report(&self, aggregates: Aggregates, stats: ReadStats) -> AnalysisReport {
        let flagged_ips = self.detector.detect(&aggregates.failed_logins);

        log::info!(
            "Parsed {} line(s), skipped {}; {} client IP(s), {} endpoint(s)",
            stats.lines_parsed,
            stats.lines_skipped,
            aggregates.requests_per_ip.len(),
            aggregates.endpoint_hits.len()
        );
        for flagged in &flagged_ips {
            log::warn!(
                "SUSPICIOUS IP: {} has {} failed login(s) (threshold: {})",
                flagged.ip,
                flagged.failed_attempts,
                self.detector.threshold()
            );
        }

        AnalysisReport {
            requests_per_ip: aggregates.requests_per_ip,
            endpoint_hits: aggregates.endpoint_hits,
            failed_logins: aggregates.failed_logins,
            flagged_ips,
            threshold: self.detector.threshold(),
            auth_failure_status: self.auth_failure_status,
            lines_parsed: stats.lines_parsed,
            lines_skipped: stats.lines_skipped,
            total_bytes: aggregates.total_bytes,
            first_seen: aggregates.first_seen,
            last_seen: aggregates.last_seen,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&DetectionConfig::default())
    }
}
