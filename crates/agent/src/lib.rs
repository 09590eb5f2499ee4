//! The RefSeek research loop — the heart of the assistant.
//!
//! One chat turn flows through three stages:
//!
//! 1. **Expand** — the topic becomes five query variants that widen recall
//! 2. **Aggregate** — each variant is issued to the document index; the
//!    retrieved passages are combined and deduplicated by source identifier
//! 3. **Enhance** — when an LLM backend is configured, the combined report
//!    is rewritten into friendlier prose (one completion call, best-effort)
//!
//! Every failure mode degrades to a user-visible message; nothing escapes
//! [`ConversationAgent::chat`] as an error.

pub mod aggregator;
pub mod conversation;
pub mod enhancer;
pub mod expander;

pub use aggregator::{DetailLevel, ResultAggregator};
pub use conversation::ConversationAgent;
pub use enhancer::ResponseEnhancer;
pub use expander::expand_topic;

/// Marker present in the report when the index is not configured.
///
/// The enhancer skips rewriting any report carrying this marker — there is
/// no data to explain, only a setup hint.
pub const TEST_MODE_MARKER: &str = "Knowledge base not connected";

/// Marker present in the report when no variant returned anything.
pub const NO_RESULTS_MARKER: &str = "No information found";
