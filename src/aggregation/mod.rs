//! Frequency aggregation over parsed access log records
//!
//! Counts requests per client IP, hits per endpoint and failed logins per
//! client IP in a single pass. Records are not retained.

use chrono::{DateTime, Utc};

use crate::models::{CountTable, LogRecord};

/// Counts produced by an [`Aggregator`]
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub requests_per_ip: CountTable,
    pub endpoint_hits: CountTable,
    pub failed_logins: CountTable,
    pub total_bytes: u64,
    pub first_seen: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
}

/// Accumulates counts one record at a time
pub struct Aggregator {
    /// Status code that counts as a failed login
    auth_failure_status: u16,
    aggregates: Aggregates,
}

impl Aggregator {
    /// Create an aggregator that treats 401 as a failed login
    pub fn new() -> Self {
        Self::with_auth_failure_status(401)
    }

    pub fn with_auth_failure_status(auth_failure_status: u16) -> Self {
        Aggregator {
            auth_failure_status,
            aggregates: Aggregates::default(),
        }
    }

    pub fn record(&mut self, record: &LogRecord) {
        let agg = &mut self.aggregates;

        agg.requests_per_ip.increment(&record.ip);
        agg.endpoint_hits.increment(&record.path);
        if record.is_auth_failure(self.auth_failure_status) {
            agg.failed_logins.increment(&record.ip);
        }
        agg.total_bytes = agg.total_bytes.saturating_add(record.bytes);

        if let Some(at) = record.parsed_time() {
            agg.first_seen = Some(agg.first_seen.map_or(at, |first| first.min(at)));
            agg.last_seen = Some(agg.last_seen.map_or(at, |last| last.max(at)));
        }
    }

    pub fn finish(self) -> Aggregates {
        self.aggregates
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate a finite sequence of records
pub fn aggregate<'a, I>(records: I, auth_failure_status: u16) -> Aggregates
where
    I: IntoIterator<Item = &'a LogRecord>,
{
    let mut aggregator = Aggregator::with_auth_failure_status(auth_failure_status);
    for record in records {
        aggregator.record(record);
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_record(ip: &str, path: &str, status: u16, timestamp: &str) -> LogRecord {
        LogRecord {
            ip: ip.to_string(),
            timestamp: timestamp.to_string(),
            method: "GET".to_string(),
            path: path.to_string(),
            protocol: "HTTP/1.1".to_string(),
            status,
            bytes: 100,
        }
    }

    #[test]
    fn test_counts_per_ip_and_endpoint() {
        let records = vec![
            create_record("1.1.1.1", "/", 200, "10/Oct/2024:13:55:36"),
            create_record("2.2.2.2", "/about", 200, "10/Oct/2024:13:55:37"),
            create_record("1.1.1.1", "/about", 404, "10/Oct/2024:13:55:38"),
        ];
        let agg = aggregate(&records, 401);

        assert_eq!(agg.requests_per_ip.total(), records.len() as u64);
        assert_eq!(agg.requests_per_ip.get("1.1.1.1"), 2);
        assert_eq!(agg.requests_per_ip.get("2.2.2.2"), 1);
        assert_eq!(agg.endpoint_hits.get("/about"), 2);
        assert_eq!(agg.endpoint_hits.get("/"), 1);
        assert_eq!(agg.total_bytes, 300);
    }

    #[test]
    fn test_totals_match_record_count() {
        let records: Vec<LogRecord> = (0..25)
            .map(|i| {
                create_record(
                    &format!("10.0.0.{}", i % 4),
                    &format!("/page/{}", i % 7),
                    200,
                    "10/Oct/2024:13:55:36",
                )
            })
            .collect();
        let agg = aggregate(&records, 401);

        assert_eq!(agg.requests_per_ip.total(), 25);
        assert_eq!(agg.endpoint_hits.total(), 25);
    }

    #[test]
    fn test_failed_logins_only_for_auth_failures() {
        let records = vec![
            create_record("1.1.1.1", "/login", 401, "10/Oct/2024:13:55:36"),
            create_record("1.1.1.1", "/login", 401, "10/Oct/2024:13:55:37"),
            create_record("1.1.1.1", "/login", 200, "10/Oct/2024:13:55:38"),
            create_record("2.2.2.2", "/login", 403, "10/Oct/2024:13:55:39"),
        ];
        let agg = aggregate(&records, 401);

        assert_eq!(agg.failed_logins.get("1.1.1.1"), 2);
        assert!(!agg.failed_logins.contains("2.2.2.2"));
        assert_eq!(agg.failed_logins.len(), 1);
    }

    #[test]
    fn test_custom_auth_failure_status() {
        let records = vec![
            create_record("2.2.2.2", "/login", 403, "10/Oct/2024:13:55:39"),
            create_record("3.3.3.3", "/login", 401, "10/Oct/2024:13:55:40"),
        ];
        let agg = aggregate(&records, 403);

        assert_eq!(agg.failed_logins.get("2.2.2.2"), 1);
        assert!(!agg.failed_logins.contains("3.3.3.3"));
    }

    #[test]
    fn test_time_span() {
        let records = vec![
            create_record("1.1.1.1", "/", 200, "10/Oct/2024:13:55:36"),
            create_record("1.1.1.1", "/", 200, "09/Oct/2024:08:00:00"),
            create_record("1.1.1.1", "/", 200, "not a time"),
            create_record("1.1.1.1", "/", 200, "11/Oct/2024:00:00:01"),
        ];
        let agg = aggregate(&records, 401);

        assert_eq!(
            agg.first_seen,
            Some(Utc.with_ymd_and_hms(2024, 10, 9, 8, 0, 0).unwrap())
        );
        assert_eq!(
            agg.last_seen,
            Some(Utc.with_ymd_and_hms(2024, 10, 11, 0, 0, 1).unwrap())
        );
    }

    #[test]
    fn test_empty_input() {
        let agg = Aggregator::new().finish();

        assert!(agg.requests_per_ip.is_empty());
        assert!(agg.failed_logins.is_empty());
        assert!(agg.first_seen.is_none());
    }
}
