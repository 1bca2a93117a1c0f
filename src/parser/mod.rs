//! Access log line parser
//!
//! Understands the Apache/Nginx common log format:
//!
//! ```text
//! 10.0.0.1 - - [10/Oct/2024:13:55:36 +0000] "GET /index.html HTTP/1.1" 200 512
//! ```
//!
//! Anything after the byte count (referer and user agent in the combined
//! format) is ignored.

use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

use crate::models::LogRecord;

static ACCESS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<ip>[0-9A-Fa-f.:]+) \S+ \S+ \[(?P<timestamp>[^\]]+)\] "(?P<method>[A-Za-z]+) (?P<path>\S+) (?P<protocol>HTTP/\d+(?:\.\d+)?)" (?P<status>\d{3}) (?P<bytes>\S+)"#,
    )
    .expect("access log pattern is valid")
});

/// Parse one access log line.
///
/// Returns `None` when the line does not follow the access log layout or
/// the client field is not an IPv4/IPv6 address. A byte count that is not a
/// number (Apache writes `-` for empty bodies) is read as zero.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    let caps = ACCESS_LINE.captures(line.trim_end())?;
    caps["ip"].parse::<IpAddr>().ok()?;

    Some(LogRecord {
        ip: caps["ip"].to_string(),
        timestamp: caps["timestamp"].to_string(),
        method: caps["method"].to_string(),
        path: caps["path"].to_string(),
        protocol: caps["protocol"].to_string(),
        status: caps["status"].parse().unwrap_or(0),
        bytes: caps["bytes"].parse().unwrap_or(0),
    })
}
