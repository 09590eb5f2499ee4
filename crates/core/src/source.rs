//! Retrieved-source domain types and deduplication.
//!
//! The remote index attaches a free-form metadata map to every retrieved
//! passage. A `SourceRecord` is the typed view of one such passage, with its
//! identity resolved from the metadata by `resolve_identifier`. Two records
//! with the same identifier are the same logical source regardless of any
//! other field differences.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sentinel identifier for records whose metadata carries no usable ID.
pub const UNKNOWN_IDENTIFIER: &str = "unknown";

/// Metadata keys tried, in order, when resolving a record's identifier.
const IDENTIFIER_KEYS: [&str; 3] = ["external_file_id", "file_id", "document_id"];

/// Titles this short (in characters) are treated as noise and dropped.
const MIN_TITLE_CHARS: usize = 10;

/// One retrieved document reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Dedup key, resolved from metadata (`"unknown"` when absent)
    pub identifier: String,

    /// Document title
    pub title: String,

    /// Author list, possibly empty
    #[serde(default)]
    pub authors: String,

    /// Publication year, possibly empty
    #[serde(default)]
    pub year: String,

    /// The full raw metadata mapping the record was built from
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl SourceRecord {
    /// Build a record from a raw metadata mapping, resolving its identifier.
    pub fn from_metadata(metadata: serde_json::Map<String, serde_json::Value>) -> Self {
        let identifier = resolve_identifier(&metadata);
        let str_field = |key: &str| {
            metadata
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        Self {
            identifier,
            title: str_field("title"),
            authors: str_field("authors"),
            year: str_field("year"),
            metadata,
        }
    }
}

/// Resolve a record identifier from a metadata mapping.
///
/// Tries `external_file_id`, then `file_id`, then `document_id`; falls back
/// to [`UNKNOWN_IDENTIFIER`] when none is present or none holds a
/// non-empty string.
pub fn resolve_identifier(metadata: &serde_json::Map<String, serde_json::Value>) -> String {
    IDENTIFIER_KEYS
        .iter()
        .find_map(|key| {
            metadata
                .get(*key)
                .and_then(|v| v.as_str())
                .filter(|s| !s.trim().is_empty())
        })
        .unwrap_or(UNKNOWN_IDENTIFIER)
        .to_string()
}

/// Deduplicate records by identifier, preserving first-seen order.
///
/// Records with a missing or ≤10-character title are dropped before the
/// dedup pass. The operation is idempotent: running it on its own output
/// yields the same list.
pub fn dedup_sources(records: &[SourceRecord]) -> Vec<SourceRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique = Vec::new();

    for record in records {
        if record.title.chars().count() <= MIN_TITLE_CHARS {
            continue;
        }
        if seen.insert(record.identifier.as_str()) {
            unique.push(record.clone());
        }
    }

    unique
}
