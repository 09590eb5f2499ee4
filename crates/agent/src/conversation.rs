//! The conversation agent — one chat session over the research pipeline.
//!
//! Whether the agent runs LLM-enhanced or search-only is decided once at
//! construction, from the presence of a completion backend. Each turn:
//! append the user message, run the detailed search, maybe enhance, append
//! the assistant reply, cap the transcript. `chat` never returns an error;
//! every failure becomes an error-marked assistant turn.

use refseek_core::message::{ConversationTurn, Transcript};
use tracing::{debug, info};

use crate::aggregator::{DetailLevel, ResultAggregator};
use crate::enhancer::ResponseEnhancer;

/// Example research topics surfaced as quick actions in the chat UIs.
const SUGGESTED_TOPICS: [&str; 8] = [
    "Stochastic volatility approximation for tick-level price models",
    "Machine learning in financial market forecasting",
    "High-frequency trading algorithms and market microstructure",
    "Behavioral finance and market anomalies",
    "Risk management and modern approaches to risk control",
    "Portfolio optimization with alternative data",
    "Cryptocurrency markets and their mathematical models",
    "Econometric time series analysis in finance",
];

/// A single research conversation.
pub struct ConversationAgent {
    aggregator: ResultAggregator,
    enhancer: Option<ResponseEnhancer>,
    transcript: Transcript,
}

impl ConversationAgent {
    /// Create an agent. Passing `None` for the enhancer selects
    /// search-only mode; the choice is not re-evaluated per call.
    pub fn new(aggregator: ResultAggregator, enhancer: Option<ResponseEnhancer>) -> Self {
        info!(
            llm_enabled = enhancer.is_some(),
            index_configured = aggregator.index_configured(),
            "Conversation agent created"
        );
        Self {
            aggregator,
            enhancer,
            transcript: Transcript::new(),
        }
    }

    /// Whether responses are LLM-enhanced.
    pub fn llm_enabled(&self) -> bool {
        self.enhancer.is_some()
    }

    /// Whether the document index is configured.
    pub fn index_configured(&self) -> bool {
        self.aggregator.index_configured()
    }

    /// Run one chat turn and return the assistant's reply.
    ///
    /// Infallible by contract: search and enhancement already degrade to
    /// text internally, so the reply is always a user-facing string and the
    /// transcript always gains exactly one user and one assistant turn.
    pub async fn chat(&mut self, message: &str) -> String {
        self.transcript.push(ConversationTurn::user(message));

        let report = self.aggregator.search(message, DetailLevel::Detailed).await;

        let reply = match &self.enhancer {
            Some(enhancer) if ResponseEnhancer::should_enhance(&report) => {
                enhancer.enhance(message, &report).await
            }
            _ => {
                debug!("Returning raw search report");
                report
            }
        };

        self.transcript.push(ConversationTurn::assistant(&reply));
        reply
    }

    /// The transcript window, oldest turn first.
    pub fn history(&self) -> &[ConversationTurn] {
        self.transcript.turns()
    }

    /// Forget the conversation so far.
    pub fn clear_history(&mut self) {
        self.transcript.clear();
    }

    /// Static list of example research topics, in fixed order.
    pub fn suggestions() -> &'static [&'static str] {
        &SUGGESTED_TOPICS
    }
}
