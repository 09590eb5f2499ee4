//! Remote document index client for RefSeek.
//!
//! Implements `refseek_core::IndexClient` against a hosted retrieval index
//! exposing a JSON `POST /query` endpoint (LlamaIndex-style: a synthesized
//! response string plus the source nodes it was drawn from).
//!
//! The unconfigured state is modeled at the construction boundary:
//! [`build_from_config`] returns `None` when no endpoint is configured, so
//! an unconfigured deployment can never attempt network I/O.

use std::sync::Arc;

use async_trait::async_trait;
use refseek_core::error::IndexError;
use refseek_core::index::{IndexClient, IndexResponse};
use refseek_core::source::SourceRecord;
use serde::Deserialize;
use tracing::{debug, warn};

/// HTTP client for a remote retrieval index.
pub struct RemoteIndexClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl RemoteIndexClient {
    /// Create a new client for the given endpoint.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, IndexError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| IndexError::NotConfigured(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }
}

/// Wire format of one retrieved node.
#[derive(Debug, Deserialize)]
struct ApiSourceNode {
    #[serde(default)]
    metadata: serde_json::Map<String, serde_json::Value>,
}

/// Wire format of the index's query response.
#[derive(Debug, Deserialize)]
struct ApiQueryResponse {
    #[serde(default)]
    response: String,

    #[serde(default)]
    source_nodes: Vec<ApiSourceNode>,

    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl IndexClient for RemoteIndexClient {
    fn name(&self) -> &str {
        "remote-index"
    }

    async fn query(
        &self,
        text: &str,
        top_k: usize,
    ) -> std::result::Result<IndexResponse, IndexError> {
        let url = format!("{}/query", self.base_url);

        let body = serde_json::json!({
            "query": text,
            "top_k": top_k,
        });

        debug!(query = %text, top_k, "Sending index query");

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body);

        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                IndexError::Timeout(e.to_string())
            } else {
                IndexError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Index returned error status");
            return Err(IndexError::Api {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiQueryResponse =
            response.json().await.map_err(|e| IndexError::Api {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        if let Some(error) = api_response.error.filter(|e| !e.is_empty()) {
            return Err(IndexError::Backend(error));
        }

        let source_records: Vec<SourceRecord> = api_response
            .source_nodes
            .into_iter()
            .map(|node| SourceRecord::from_metadata(node.metadata))
            .collect();

        debug!(
            sources = source_records.len(),
            response_len = api_response.response.len(),
            "Index query completed"
        );

        Ok(IndexResponse {
            response_text: api_response.response,
            source_records,
        })
    }
}

/// Build an index client from configuration.
///
/// Returns `None` when no endpoint is configured — the caller treats that
/// as test mode and must not expect any retrieval.
pub fn build_from_config(config: &refseek_config::AppConfig) -> Option<Arc<dyn IndexClient>> {
    let base_url = config.index.base_url.as_deref()?.trim();
    if base_url.is_empty() {
        return None;
    }

    match RemoteIndexClient::new(
        base_url,
        config.index.api_key.clone(),
        config.index.timeout_secs,
    ) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!("Failed to build index client: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_index_yields_no_client() {
        let config = refseek_config::AppConfig::default();
        assert!(build_from_config(&config).is_none());
    }

    #[test]
    fn blank_endpoint_yields_no_client() {
        let config = refseek_config::AppConfig {
            index: refseek_config::IndexConfig {
                base_url: Some("   ".into()),
                ..refseek_config::IndexConfig::default()
            },
            ..refseek_config::AppConfig::default()
        };
        assert!(build_from_config(&config).is_none());
    }

    #[test]
    fn configured_endpoint_yields_client() {
        let config = refseek_config::AppConfig {
            index: refseek_config::IndexConfig {
                base_url: Some("https://index.example.com/".into()),
                ..refseek_config::IndexConfig::default()
            },
            ..refseek_config::AppConfig::default()
        };
        let client = build_from_config(&config).unwrap();
        assert_eq!(client.name(), "remote-index");
    }

    #[test]
    fn response_parsing_maps_source_nodes() {
        let raw = serde_json::json!({
            "response": "Volatility is rough at tick scale.",
            "source_nodes": [
                {
                    "metadata": {
                        "external_file_id": "arxiv-1803.05049",
                        "title": "Rough volatility: evidence from tick data",
                        "year": "2018"
                    }
                },
                { "metadata": {} }
            ]
        });
        let parsed: ApiQueryResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.source_nodes.len(), 2);

        let records: Vec<SourceRecord> = parsed
            .source_nodes
            .into_iter()
            .map(|n| SourceRecord::from_metadata(n.metadata))
            .collect();
        assert_eq!(records[0].identifier, "arxiv-1803.05049");
        assert_eq!(records[1].identifier, refseek_core::UNKNOWN_IDENTIFIER);
    }

    #[test]
    fn error_field_deserializes() {
        let raw = serde_json::json!({
            "response": "",
            "error": "index unavailable"
        });
        let parsed: ApiQueryResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.error.as_deref(), Some("index unavailable"));
    }
}
