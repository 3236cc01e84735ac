//! Core data types shared by the scanner and the block check

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::PathBuf;

use crate::consts::UNKNOWN;

/// Most recent timestamped record across all scanned logs
#[derive(Debug, Clone)]
pub(crate) struct LatestActivity {
    pub(crate) timestamp: DateTime<Utc>,
    /// The full record, kept untyped; only a few fields are ever read
    pub(crate) record: Value,
    /// File the record came from
    pub(crate) path: PathBuf,
}

impl LatestActivity {
    /// `message.model`, if the record has one
    pub(crate) fn model(&self) -> Option<&str> {
        self.record
            .get("message")
            .and_then(|m| m.get("model"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
    }

    pub(crate) fn model_or_unknown(&self) -> &str {
        self.model().unwrap_or(UNKNOWN)
    }

    /// Top-level `costUSD`, 0 when absent
    pub(crate) fn cost_usd(&self) -> f64 {
        self.record
            .get("costUSD")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }
}
