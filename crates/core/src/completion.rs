//! CompletionClient trait — the abstraction over LLM text completion.
//!
//! One prompt in, one completion out. The enhancer makes at most a single
//! call per chat turn and degrades gracefully when it fails.

use async_trait::async_trait;

use crate::error::CompletionError;

/// A text-completion backend.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// A human-readable name for this backend (e.g., "openai").
    fn name(&self) -> &str;

    /// Send one prompt and return the completion text.
    async fn complete(&self, prompt: &str) -> std::result::Result<String, CompletionError>;
}
