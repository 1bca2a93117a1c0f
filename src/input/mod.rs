//! Access log input
//!
//! Reads log files line by line and feeds each line through the parser.

pub mod log_reader;

pub use log_reader::{LogReader, ReadStats};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort reading an access log
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Cannot open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading {} at line {line}: {source}", .path.display())]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },
}
