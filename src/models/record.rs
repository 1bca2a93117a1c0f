use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access log timestamp as written by Apache and Nginx
const TIMESTAMP_WITH_ZONE: &str = "%d/%b/%Y:%H:%M:%S %z";
const TIMESTAMP_NO_ZONE: &str = "%d/%b/%Y:%H:%M:%S";

/// One parsed access log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub ip: String,
    /// Raw text between the square brackets
    pub timestamp: String,
    pub method: String,
    pub path: String,
    pub protocol: String,
    pub status: u16,
    pub bytes: u64,
}

impl LogRecord {
    /// Interpret the raw timestamp, if it is in the usual access log layout.
    ///
    /// Timestamps without a zone offset are taken as UTC.
    pub fn parsed_time(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_str(&self.timestamp, TIMESTAMP_WITH_ZONE) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_NO_ZONE)
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn is_auth_failure(&self, auth_failure_status: u16) -> bool {
        self.status == auth_failure_status
    }
}
