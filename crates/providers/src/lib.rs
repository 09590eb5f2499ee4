//! LLM completion backends for RefSeek.
//!
//! All backends implement the `refseek_core::CompletionClient` trait.
//! [`build_from_config`] selects the backend based on configuration and
//! returns `None` when no credential is configured — the agent then runs
//! in search-only mode.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatClient;

use std::sync::Arc;

use refseek_core::completion::CompletionClient;
use tracing::info;

/// Build a completion client from configuration.
///
/// Returns `None` when no API key is configured.
pub fn build_from_config(
    config: &refseek_config::AppConfig,
) -> Option<Arc<dyn CompletionClient>> {
    let api_key = config.api_key.as_deref()?.trim();
    if api_key.is_empty() {
        return None;
    }

    let client = match config.provider.name.as_str() {
        "openrouter" => OpenAiCompatClient::openrouter(api_key),
        "custom" => {
            let base_url = config.provider.api_url.as_deref()?;
            OpenAiCompatClient::new("custom", base_url, api_key)
        }
        _ => OpenAiCompatClient::openai(api_key),
    };

    let client = client
        .with_model(&config.model)
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens);

    info!(backend = %client.name(), model = %config.model, "Completion backend configured");
    Some(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use refseek_config::{AppConfig, ProviderConfig};

    #[test]
    fn no_api_key_yields_no_client() {
        let config = AppConfig::default();
        assert!(build_from_config(&config).is_none());
    }

    #[test]
    fn blank_api_key_yields_no_client() {
        let config = AppConfig {
            api_key: Some("   ".into()),
            ..AppConfig::default()
        };
        assert!(build_from_config(&config).is_none());
    }

    #[test]
    fn openai_selected_by_default() {
        let config = AppConfig {
            api_key: Some("sk-test".into()),
            ..AppConfig::default()
        };
        let client = build_from_config(&config).unwrap();
        assert_eq!(client.name(), "openai");
    }

    #[test]
    fn openrouter_selected_by_name() {
        let config = AppConfig {
            api_key: Some("sk-or-test".into()),
            provider: ProviderConfig {
                name: "openrouter".into(),
                api_url: None,
            },
            ..AppConfig::default()
        };
        let client = build_from_config(&config).unwrap();
        assert_eq!(client.name(), "openrouter");
    }

    #[test]
    fn custom_without_url_yields_no_client() {
        let config = AppConfig {
            api_key: Some("sk-test".into()),
            provider: ProviderConfig {
                name: "custom".into(),
                api_url: None,
            },
            ..AppConfig::default()
        };
        assert!(build_from_config(&config).is_none());
    }
}
