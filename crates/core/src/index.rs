//! IndexClient trait — the abstraction over the remote document index.
//!
//! An IndexClient runs one retrieval query and returns the index's response
//! text plus the source records attached to it.
//!
//! Implementations: HTTP client for a hosted retrieval index, mocks in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::IndexError;
use crate::source::SourceRecord;

/// The result of one index query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    /// The index's synthesized response text for the query
    pub response_text: String,

    /// The passages the response was drawn from
    #[serde(default)]
    pub source_records: Vec<SourceRecord>,
}

impl IndexResponse {
    /// Whether the response carries any usable text.
    pub fn is_empty(&self) -> bool {
        self.response_text.trim().is_empty()
    }
}

/// The document-retrieval index abstraction.
///
/// One call per query variant; the aggregator issues these sequentially and
/// tolerates individual failures.
#[async_trait]
pub trait IndexClient: Send + Sync {
    /// A human-readable name for this index backend.
    fn name(&self) -> &str;

    /// Run one query, returning at most `top_k` source records.
    async fn query(&self, text: &str, top_k: usize)
    -> std::result::Result<IndexResponse, IndexError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_response_detection() {
        let response = IndexResponse {
            response_text: "   ".into(),
            source_records: vec![],
        };
        assert!(response.is_empty());

        let response = IndexResponse {
            response_text: "Volatility clusters at tick scale.".into(),
            source_records: vec![],
        };
        assert!(!response.is_empty());
    }
}
