//! Claude Code JSONL scanner
//!
//! Finds the most recent timestamped record across all usage logs.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::LatestActivity;

/// Outcome of scanning a set of log files
#[derive(Debug, Default)]
pub(crate) struct ScanResult {
    pub(crate) latest: Option<LatestActivity>,
    /// Records that carried a usable timestamp
    pub(crate) valid: usize,
    /// Lines that were not valid JSON
    pub(crate) skipped_lines: usize,
    /// Files that could not be read at all
    pub(crate) unreadable_files: usize,
}

impl ScanResult {
    /// Strict greater-than: on a tie the first record seen stays
    fn offer(&mut self, timestamp: DateTime<Utc>, record: Value, path: &Path) {
        self.valid += 1;
        let newer = match &self.latest {
            Some(latest) => timestamp > latest.timestamp,
            None => true,
        };
        if newer {
            self.latest = Some(LatestActivity {
                timestamp,
                record,
                path: path.to_path_buf(),
            });
        }
    }
}

/// `timestamp` is either an ISO 8601 string or epoch milliseconds.
///
/// Strings without an offset are machine local time, date-only strings are
/// UTC midnight.
pub(crate) fn record_timestamp(record: &Value) -> Option<DateTime<Utc>> {
    match record.get("timestamp")? {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = s.parse::<DateTime<Utc>>() {
        return Some(ts);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        // Skipped wall-clock times (DST gaps) have no instant
        return Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn scan_file(path: &Path, result: &mut ScanResult) {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!("Failed to read {}: {}", path.display(), err);
            result.unreadable_files += 1;
            return;
        }
    };
    let content = String::from_utf8_lossy(&bytes);

    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let record: Value = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(err) => {
                tracing::debug!("Invalid JSON at {}:{}: {}", path.display(), line_no + 1, err);
                result.skipped_lines += 1;
                continue;
            }
        };

        if let Some(timestamp) = record_timestamp(&record) {
            result.offer(timestamp, record, path);
        }
    }
}

pub(crate) fn scan_latest_activity(files: &[PathBuf]) -> ScanResult {
    let mut result = ScanResult::default();
    for path in files {
        scan_file(path, &mut result);
    }

    tracing::debug!(
        "Scanned {} files: {} timestamped records, {} invalid lines, {} unreadable files",
        files.len(),
        result.valid,
        result.skipped_lines,
        result.unreadable_files
    );
    result
}
