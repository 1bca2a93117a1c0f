pub mod counts;
pub mod record;
pub mod report;

pub use counts::CountTable;
pub use record::LogRecord;
pub use report::{AnalysisReport, FlaggedIp};
