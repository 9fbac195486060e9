use crate::{Builder, LogRecord, Severity};
use chrono::{DateTime, FixedOffset};
use regex::Regex;
use std::fs::{remove_file, File};
use std::io::{BufRead, BufReader};

pub const TEST_LOCK_FILE: &str = "/tmp/captains_format_test_lock";

macro_rules! lock_file {
    () => {
        // NOTE: use one {} to expose the guard into context
        let lock_fd = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .open(&super::utils::TEST_LOCK_FILE)
            .unwrap();
        let _guard = fmutex::lock_exclusive(&lock_fd).unwrap();
    };
}
pub(super) use lock_file;

pub fn clear_test_files(builder: &Builder) {
    for sink in &builder.sinks {
        if let Some(file_path) = sink.get_file_path() {
            let _ = remove_file(file_path);
        }
    }
}

/// 2014-01-08 18:27:14.123456 UTC
pub fn test_time() -> DateTime<FixedOffset> {
    DateTime::from_timestamp(1389205634, 123_456_000).unwrap().fixed_offset()
}

pub fn test_record(msg: &str) -> LogRecord<'_> {
    LogRecord::new(test_time(), Severity::Panic, msg)
        .with_location("/path/to/testing.go", 391)
        .with_function("pkg.func")
        .with_pid(1234)
}

/// Each matched line as its capture groups
pub fn parse_log(file_path: &str, re: &str) -> std::io::Result<Vec<Vec<String>>> {
    let re = Regex::new(re).unwrap();
    let f = File::open(file_path)?;
    let mut results = Vec::new();
    for line in BufReader::new(f).lines() {
        let line = line?;
        if let Some(caps) = re.captures(&line) {
            let groups: Vec<String> = caps
                .iter()
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect();
            results.push(groups);
        }
    }
    Ok(results)
}
