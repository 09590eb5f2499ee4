//! Error types for the RefSeek domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each external collaborator has its own error enum so callers can
//! pattern-match on the failure mode instead of intercepting blind
//! exceptions.

use thiserror::Error;

/// The top-level error type for all RefSeek operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Document index errors ---
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    // --- LLM completion errors ---
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures from the remote document-retrieval index.
#[derive(Debug, Clone, Error)]
pub enum IndexError {
    #[error("Index request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Index not configured: {0}")]
    NotConfigured(String),

    #[error("Index query timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Index returned an error: {0}")]
    Backend(String),
}

/// Failures from the LLM completion backend.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Completion backend not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_error_displays_correctly() {
        let err = Error::Index(IndexError::Api {
            status_code: 502,
            message: "Bad gateway".into(),
        });
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("Bad gateway"));
    }

    #[test]
    fn completion_error_displays_correctly() {
        let err = Error::Completion(CompletionError::RateLimited {
            retry_after_secs: 5,
        });
        assert!(err.to_string().contains("5s"));
    }
}
