//! # RefSeek Core
//!
//! Domain types, traits, and error definitions for the RefSeek research
//! assistant. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The two external collaborators (the document index and the LLM completion
//! backend) are defined as traits here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod completion;
pub mod error;
pub mod index;
pub mod message;
pub mod source;

// Re-export key types at crate root for ergonomics
pub use completion::CompletionClient;
pub use error::{CompletionError, Error, IndexError, Result};
pub use index::{IndexClient, IndexResponse};
pub use message::{ConversationTurn, Role, Transcript, TRANSCRIPT_CAPACITY};
pub use source::{dedup_sources, resolve_identifier, SourceRecord, UNKNOWN_IDENTIFIER};
