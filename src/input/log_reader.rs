use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::InputError;
use crate::models::LogRecord;
use crate::parser;

/// Line counts from one pass over an access log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Lines read, including blank ones
    pub lines_read: usize,
    /// Lines that produced a record
    pub lines_parsed: usize,
    /// Non-blank lines that did not match the access log layout
    pub lines_skipped: usize,
}

impl ReadStats {
    /// Account for one line, returning its record if it parsed
    pub fn observe(&mut self, line: &str) -> Option<LogRecord> {
        self.lines_read += 1;
        if line.trim().is_empty() {
            return None;
        }

        match parser::parse_line(line) {
            Some(record) => {
                self.lines_parsed += 1;
                Some(record)
            }
            None => {
                self.lines_skipped += 1;
                log::debug!("Skipping malformed line {}: {}", self.lines_read, line.trim_end());
                None
            }
        }
    }
}

/// Reads an access log from disk and parses it line by line
pub struct LogReader {
    file_path: PathBuf,
}

impl LogReader {
    pub fn new(file_path: PathBuf) -> Self {
        LogReader { file_path }
    }

    /// Parse every line of the file, handing each record to `on_record`.
    ///
    /// Lines that fail to parse are skipped and counted. Only failure to
    /// open or read the file is an error.
    pub fn read_records<F>(&self, on_record: F) -> Result<ReadStats, InputError>
    where
        F: FnMut(LogRecord),
    {
        let file = File::open(&self.file_path).map_err(|source| InputError::Open {
            path: self.file_path.clone(),
            source,
        })?;

        log::debug!("Reading access log {:?}", self.file_path);
        Self::scan(BufReader::new(file), &self.file_path, on_record)
    }

    /// Parse lines from any buffered source. `origin` names it in errors.
    ///
    /// Invalid UTF-8 is replaced rather than treated as a read failure, so a
    /// single corrupt line is skipped like any other unparseable line.
    pub fn scan<R, F>(mut reader: R, origin: &Path, mut on_record: F) -> Result<ReadStats, InputError>
    where
        R: BufRead,
        F: FnMut(LogRecord),
    {
        let mut stats = ReadStats::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let bytes_read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| InputError::Read {
                    path: origin.to_path_buf(),
                    line: stats.lines_read + 1,
                    source,
                })?;

            if bytes_read == 0 {
                break; // EOF
            }

            let line = String::from_utf8_lossy(&buf);
            if let Some(record) = stats.observe(&line) {
                on_record(record);
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const SAMPLE: &str = concat!(
        "10.0.0.1 - - [10/Oct/2024:13:55:36] \"GET /index.html HTTP/1.1\" 200 512\n",
        "\n",
        "garbage line\n",
        "10.0.0.2 - - [10/Oct/2024:13:56:00] \"POST /login HTTP/1.1\" 401 128",
    );

    #[test]
    fn test_scan_counts_lines() {
        let mut records = Vec::new();
        let stats = LogReader::scan(Cursor::new(SAMPLE), Path::new("memory"), |r| records.push(r))
            .unwrap();

        assert_eq!(
            stats,
            ReadStats {
                lines_read: 4,
                lines_parsed: 2,
                lines_skipped: 1,
            }
        );
        assert_eq!(records[0].ip, "10.0.0.1");
        assert_eq!(records[1].path, "/login");
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let mut data = b"\xff\xfe broken\n".to_vec();
        data.extend_from_slice(b"10.0.0.1 - - [10/Oct/2024:13:55:36] \"GET / HTTP/1.1\" 200 1\n");

        let mut count = 0;
        let stats = LogReader::scan(Cursor::new(data), Path::new("memory"), |_| count += 1).unwrap();

        assert_eq!(count, 1);
        assert_eq!(stats.lines_skipped, 1);
    }

    #[test]
    fn test_read_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let reader = LogReader::new(file.path().to_path_buf());
        let mut ips = Vec::new();
        let stats = reader.read_records(|r| ips.push(r.ip)).unwrap();

        assert_eq!(stats.lines_parsed, 2);
        assert_eq!(ips, vec!["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn test_missing_file() {
        let reader = LogReader::new(PathBuf::from("/nonexistent/access.log"));
        let err = reader.read_records(|_| {}).unwrap_err();

        assert!(matches!(err, InputError::Open { .. }));
        assert!(err.to_string().contains("/nonexistent/access.log"));
    }
}
