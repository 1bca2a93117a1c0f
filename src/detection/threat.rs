//! Failed login threshold detection
//!
//! Flags client IPs whose failed login count strictly exceeds a threshold.
//! A count equal to the threshold is not flagged.

use crate::models::{CountTable, FlaggedIp};

pub const DEFAULT_FAILED_LOGIN_THRESHOLD: u64 = 10;

#[derive(Debug, Clone, Copy)]
pub struct ThreatDetector {
    threshold: u64,
}

impl ThreatDetector {
    pub fn new(threshold: u64) -> Self {
        ThreatDetector { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn is_suspicious(&self, failed_attempts: u64) -> bool {
        failed_attempts > self.threshold
    }

    /// Flagged IPs, most failed attempts first
    pub fn detect(&self, failed_logins: &CountTable) -> Vec<FlaggedIp> {
        failed_logins
            .ranked()
            .into_iter()
            .filter(|(_, count)| self.is_suspicious(*count))
            .map(|(ip, failed_attempts)| FlaggedIp {
                ip: ip.to_string(),
                failed_attempts,
            })
            .collect()
    }
}

impl Default for ThreatDetector {
    fn default() -> Self {
        Self::new(DEFAULT_FAILED_LOGIN_THRESHOLD)
    }
}
