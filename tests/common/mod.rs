#![allow(dead_code)]

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
            .open(&common::TEST_LOCK_FILE)
            .unwrap();
        let _guard = fmutex::lock_exclusive(&lock_fd).unwrap();
    };
}

pub fn clear_test_files(paths: &[&str]) {
    for path in paths {
        let _ = remove_file(path);
    }
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
