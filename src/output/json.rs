//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Envelope for JSON output: the payload plus run metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T, S = ()> {
    /// The actual data
    pub data: T,

    /// Summary counts, when the command has any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<S>,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl Metadata {
    fn now() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl<T> JsonOutput<T> {
    /// Create a new JSON output without stats
    pub fn new(data: T) -> Self {
        Self {
            data,
            stats: None,
            meta: Metadata::now(),
        }
    }
}

impl<T, S> JsonOutput<T, S> {
    /// Create a new JSON output carrying summary stats
    pub fn with_stats(data: T, stats: S) -> Self {
        Self {
            data,
            stats: Some(stats),
            meta: Metadata::now(),
        }
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

/// Format data and stats as pretty-printed JSON
pub fn format_json_with_stats<T: Serialize + ?Sized, S: Serialize>(
    data: &T,
    stats: S,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::with_stats(data, stats))
}
