//! Query expansion — one topic becomes five retrieval variants.
//!
//! Each variant appends a fixed intent suffix to the topic so the index is
//! probed from several angles (methodology, results, models, applications).
//! The order is fixed and drives the ordering of the final report.

/// The five intent suffixes, in issuance order.
const INTENT_SUFFIXES: [&str; 5] = [
    "research analysis",
    "methodology approach",
    "results conclusions practice",
    "model formula algorithm",
    "application implementation",
];

/// Number of query variants generated per topic.
pub const VARIANT_COUNT: usize = INTENT_SUFFIXES.len();

/// Expand a topic into its five query variants.
///
/// Pure function of the input; each variant contains the topic verbatim.
pub fn expand_topic(topic: &str) -> Vec<String> {
    INTENT_SUFFIXES
        .iter()
        .map(|suffix| format!("{topic} {suffix}"))
        .collect()
}
