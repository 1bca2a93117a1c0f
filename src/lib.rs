pub mod aggregation;
pub mod analyzer;
pub mod config;
pub mod detection;
pub mod input;
pub mod models;
pub mod output;
pub mod parser;

// Re-export commonly used types
pub use aggregation::{Aggregates, Aggregator};
pub use analyzer::Analyzer;
pub use config::Config;
pub use detection::ThreatDetector;
pub use input::{InputError, LogReader};
pub use models::{AnalysisReport, CountTable, FlaggedIp, LogRecord};
pub use output::{CsvReport, HtmlReport, JsonReport, ReportEmitter, ReportError, TerminalReport};
pub use parser::parse_line;
