use chrono::{DateTime, Utc};
use serde::Serialize;

use super::CountTable;

/// An IP whose failed login count exceeded the detection threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedIp {
    pub ip: String,
    pub failed_attempts: u64,
}

/// Everything the report emitters need from one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Requests per client IP
    pub requests_per_ip: CountTable,
    /// Requests per path
    pub endpoint_hits: CountTable,
    /// Failed logins per client IP; IPs without failures are absent
    pub failed_logins: CountTable,
    /// IPs whose failed logins exceed `threshold`, highest first
    pub flagged_ips: Vec<FlaggedIp>,
    pub threshold: u64,
    pub auth_failure_status: u16,
    pub lines_parsed: usize,
    pub lines_skipped: usize,
    pub total_bytes: u64,
    pub first_seen: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
}

impl AnalysisReport {
    /// The endpoint with the most hits, if any lines were parsed
    pub fn most_accessed_endpoint(&self) -> Option<(&str, u64)> {
        self.endpoint_hits.ranked().into_iter().next()
    }

    pub fn has_suspicious_activity(&self) -> bool {
        !self.flagged_ips.is_empty()
    }
}
