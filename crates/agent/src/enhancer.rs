//! Response enhancement — optional LLM rewriting of the aggregated report.
//!
//! One instruction prompt embeds the user's question and the raw report
//! verbatim; one completion call rewrites it into plainer prose. Reports
//! that already say "no data" (test mode or no results) are returned
//! unmodified — there is nothing worth rewriting. A failed completion
//! degrades to the raw report with a visible warning.

use std::sync::Arc;

use refseek_core::completion::CompletionClient;
use tracing::{debug, warn};

use crate::{NO_RESULTS_MARKER, TEST_MODE_MARKER};

/// Rewrites aggregated reports into friendlier explanations.
pub struct ResponseEnhancer {
    completion: Arc<dyn CompletionClient>,
}

impl ResponseEnhancer {
    /// Create an enhancer over a completion backend.
    pub fn new(completion: Arc<dyn CompletionClient>) -> Self {
        Self { completion }
    }

    /// Whether this report should be rewritten at all.
    ///
    /// Reports carrying the test-mode or no-results marker contain no paper
    /// content — an LLM pass would only reword a setup hint.
    pub fn should_enhance(report: &str) -> bool {
        !report.contains(TEST_MODE_MARKER) && !report.contains(NO_RESULTS_MARKER)
    }

    /// Enhance the report, degrading to the raw report on failure.
    pub async fn enhance(&self, user_message: &str, report: &str) -> String {
        let prompt = build_prompt(user_message, report);

        debug!(
            backend = %self.completion.name(),
            prompt_len = prompt.len(),
            "Requesting report enhancement"
        );

        match self.completion.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Enhancement failed, returning raw report");
                format!("📚 {report}\n\n⚠️ Response enhancement unavailable: {e}")
            }
        }
    }
}

/// Build the single instruction prompt embedding question and report.
fn build_prompt(user_message: &str, report: &str) -> String {
    format!(
        "You are an expert in financial research. Your task is to explain complex \
scientific information in simple, accessible language while preserving every \
important detail.

ORIGINAL USER QUESTION: {user_message}

INFORMATION FROM RESEARCH PAPERS:
{report}

TASK:
1. Explain the key concepts in plain language
2. Keep all important details, formulas, and methods
3. Show the practical applications
4. Structure the information logically
5. Use examples for difficult concepts

Answer thoroughly but accessibly. Do not lose scientific precision, but make \
the information usable in practice."
    )
}
