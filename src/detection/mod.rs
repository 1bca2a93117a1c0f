pub mod threat;

pub use threat::{ThreatDetector, DEFAULT_FAILED_LOGIN_THRESHOLD};
