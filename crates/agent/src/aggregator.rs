//! Multi-query retrieval and aggregation — the core of RefSeek.
//!
//! `search` fans a topic out into five query variants, issues each to the
//! document index sequentially, combines the per-variant response texts,
//! deduplicates the retrieved sources by identifier, and renders one
//! human-readable report. Individual variant failures are skipped; a fully
//! empty round yields a "no information found" message; an unconfigured
//! index short-circuits to a fixed test-mode message without touching the
//! network. The routine never surfaces an error to its caller.

use std::sync::Arc;

use refseek_core::index::IndexClient;
use refseek_core::source::{SourceRecord, dedup_sources};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::expander::{VARIANT_COUNT, expand_topic};
use crate::{NO_RESULTS_MARKER, TEST_MODE_MARKER};

/// Extra results requested per variant on top of the integer share of the
/// total budget. Tunable; compensates for integer truncation so every
/// variant still returns a useful slice.
const VARIANT_HEADROOM: usize = 5;

/// Maximum number of sources rendered in the report. The trailing count
/// line always states the true deduplicated total.
const SOURCE_DISPLAY_CAP: usize = 15;

/// How many results a search may consume in total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Basic,
    #[default]
    Detailed,
    Comprehensive,
}

impl DetailLevel {
    /// Total result budget for this level, split across the variants.
    pub fn result_budget(self) -> usize {
        match self {
            Self::Basic => 10,
            Self::Detailed => 20,
            Self::Comprehensive => 30,
        }
    }
}

/// Issues expanded queries against the index and aggregates the results.
pub struct ResultAggregator {
    /// `None` models the unconfigured index — test mode, no network I/O.
    index: Option<Arc<dyn IndexClient>>,
}

impl ResultAggregator {
    /// Create an aggregator. Pass `None` for test mode.
    pub fn new(index: Option<Arc<dyn IndexClient>>) -> Self {
        Self { index }
    }

    /// Whether a real index backend is available.
    pub fn index_configured(&self) -> bool {
        self.index.is_some()
    }

    /// Run the multi-query search and return a formatted report.
    ///
    /// Always returns a user-facing string; every failure mode is rendered
    /// as text rather than propagated.
    pub async fn search(&self, topic: &str, level: DetailLevel) -> String {
        let Some(index) = &self.index else {
            return test_mode_message(topic);
        };

        let total_budget = level.result_budget();
        let per_variant = total_budget / VARIANT_COUNT + VARIANT_HEADROOM;
        let variants = expand_topic(topic);

        info!(topic, detail = ?level, per_variant, "Starting multi-query search");

        let mut narratives: Vec<String> = Vec::new();
        let mut sources: Vec<SourceRecord> = Vec::new();

        for variant in &variants {
            match index.query(variant, per_variant).await {
                Ok(response) if !response.is_empty() => {
                    sources.extend(response.source_records);
                    narratives.push(response.response_text);
                }
                Ok(_) => {
                    debug!(variant = %variant, "Variant returned no text, skipping");
                }
                Err(e) => {
                    // One bad variant must not sink the whole search.
                    warn!(variant = %variant, error = %e, "Variant query failed, skipping");
                }
            }
        }

        if narratives.is_empty() {
            return no_results_message(topic);
        }

        let unique = dedup_sources(&sources);

        info!(
            narratives = narratives.len(),
            raw_sources = sources.len(),
            unique_sources = unique.len(),
            "Search aggregated"
        );

        format_report(topic, &narratives, &unique)
    }
}

/// Fixed message for an unconfigured index. Carries [`TEST_MODE_MARKER`].
fn test_mode_message(topic: &str) -> String {
    format!(
        "🔍 **Search for: {topic}** (test mode)\n\n\
         ⚠️ **{TEST_MODE_MARKER}**\n\
         Set `REFSEEK_INDEX_URL` (or `index.base_url` in the config file) \
         to retrieve real papers from the ArXiv index."
    )
}

/// Message for a search where every variant came back empty or failed.
/// Carries [`NO_RESULTS_MARKER`].
fn no_results_message(topic: &str) -> String {
    format!("❌ {NO_RESULTS_MARKER} for topic '{topic}' in the knowledge base. Try different keywords.")
}

/// Render the combined narrative and the deduplicated source listing.
fn format_report(topic: &str, narratives: &[String], sources: &[SourceRecord]) -> String {
    let combined = narratives.join("\n\n");

    let mut report = format!(
        "📚 **Research on: {topic}**\n\n\
         ## 🔍 What the papers say\n\n\
         {combined}\n\n\
         ## 📖 Sources from the knowledge base ({} papers)\n",
        sources.len()
    );

    for (i, source) in sources.iter().take(SOURCE_DISPLAY_CAP).enumerate() {
        report.push_str(&format!("\n{}. **{}**", i + 1, source.title));
        if !source.authors.is_empty() {
            report.push_str(&format!("\n   📝 Authors: {}", source.authors));
        }
        if !source.year.is_empty() {
            report.push_str(&format!("\n   📅 Year: {}", source.year));
        }
        report.push_str(&format!("\n   🆔 **Document ID:** `{}`\n", source.identifier));
    }

    report.push_str(&format!(
        "\n\n💡 **Found {} unique papers in the ArXiv knowledge base**",
        sources.len()
    ));
    report.push_str(
        "\n\n📋 **How to use document IDs:** pass a document ID back to the index \
         to fetch that specific paper.",
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use refseek_core::error::IndexError;
    use refseek_core::index::IndexResponse;
    use std::sync::Mutex;

    /// Scripted index: one canned outcome per expected variant call, plus a
    /// log of the budgets it was called with.
    struct ScriptedIndex {
        outcomes: Mutex<Vec<Result<IndexResponse, IndexError>>>,
        budgets: Mutex<Vec<usize>>,
    }

    impl ScriptedIndex {
        fn new(outcomes: Vec<Result<IndexResponse, IndexError>>) -> Self {
            let mut outcomes = outcomes;
            outcomes.reverse(); // pop() returns them in original order
            Self {
                outcomes: Mutex::new(outcomes),
                budgets: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl IndexClient for ScriptedIndex {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn query(&self, _text: &str, top_k: usize) -> Result<IndexResponse, IndexError> {
            self.budgets.lock().unwrap().push(top_k);
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(IndexError::Backend("script exhausted".into())))
        }
    }

    fn response_with(text: &str, ids: &[&str]) -> IndexResponse {
        IndexResponse {
            response_text: text.into(),
            source_records: ids
                .iter()
                .map(|id| SourceRecord {
                    identifier: id.to_string(),
                    title: format!("Paper {id} with a sufficiently long title"),
                    authors: String::new(),
                    year: String::new(),
                    metadata: serde_json::Map::new(),
                })
                .collect(),
        }
    }

    fn aggregator_with(index: ScriptedIndex) -> (ResultAggregator, Arc<ScriptedIndex>) {
        let index = Arc::new(index);
        (
            ResultAggregator::new(Some(index.clone())),
            index,
        )
    }

    #[test]
    fn detail_level_budgets() {
        assert_eq!(DetailLevel::Basic.result_budget(), 10);
        assert_eq!(DetailLevel::Detailed.result_budget(), 20);
        assert_eq!(DetailLevel::Comprehensive.result_budget(), 30);
        assert_eq!(DetailLevel::default(), DetailLevel::Detailed);
    }

    #[tokio::test]
    async fn unconfigured_index_short_circuits() {
        let aggregator = ResultAggregator::new(None);
        let report = aggregator.search("anything", DetailLevel::Detailed).await;
        assert!(report.contains(TEST_MODE_MARKER));
    }

    #[tokio::test]
    async fn basic_level_uses_headroom_budget() {
        let (aggregator, index) = aggregator_with(ScriptedIndex::new(
            (0..5).map(|_| Ok(response_with("text", &[]))).collect(),
        ));

        aggregator.search("volatility modeling", DetailLevel::Basic).await;

        // 10 / 5 + 5 = 7 per variant, for all five variants
        let budgets = index.budgets.lock().unwrap().clone();
        assert_eq!(budgets, vec![7, 7, 7, 7, 7]);
    }

    #[tokio::test]
    async fn duplicate_identifiers_collapse_in_order() {
        let (aggregator, _) = aggregator_with(ScriptedIndex::new(vec![
            Ok(response_with("first narrative", &["A", "A"])),
            Ok(response_with("second narrative", &["B"])),
            Ok(response_with("third narrative", &["C"])),
            Ok(response_with("", &[])),
            Ok(response_with("", &[])),
        ]));

        let report = aggregator
            .search("volatility modeling", DetailLevel::Basic)
            .await;

        assert!(report.contains("3 papers"));
        assert!(report.contains("Found 3 unique papers"));
        let a = report.find("`A`").unwrap();
        let b = report.find("`B`").unwrap();
        let c = report.find("`C`").unwrap();
        assert!(a < b && b < c);
    }

    #[tokio::test]
    async fn all_variants_failing_yields_no_results_message() {
        let (aggregator, _) = aggregator_with(ScriptedIndex::new(
            (0..5)
                .map(|_| Err(IndexError::Network("connection refused".into())))
                .collect(),
        ));

        let report = aggregator.search("obscure topic", DetailLevel::Detailed).await;
        assert!(report.contains(NO_RESULTS_MARKER));
    }

    #[tokio::test]
    async fn partial_failures_are_skipped() {
        let (aggregator, _) = aggregator_with(ScriptedIndex::new(vec![
            Err(IndexError::Timeout("slow index".into())),
            Ok(response_with("surviving narrative", &["X"])),
            Err(IndexError::Backend("index unavailable".into())),
            Ok(response_with("", &[])),
            Err(IndexError::Network("reset".into())),
        ]));

        let report = aggregator.search("resilience", DetailLevel::Detailed).await;
        assert!(report.contains("surviving narrative"));
        assert!(report.contains("Found 1 unique papers"));
    }

    #[tokio::test]
    async fn narratives_keep_variant_order() {
        let (aggregator, _) = aggregator_with(ScriptedIndex::new(vec![
            Ok(response_with("alpha narrative", &["A"])),
            Ok(response_with("beta narrative", &["B"])),
            Ok(response_with("gamma narrative", &["C"])),
            Ok(response_with("", &[])),
            Ok(response_with("", &[])),
        ]));

        let report = aggregator.search("ordering", DetailLevel::Detailed).await;
        let alpha = report.find("alpha narrative").unwrap();
        let beta = report.find("beta narrative").unwrap();
        let gamma = report.find("gamma narrative").unwrap();
        assert!(alpha < beta && beta < gamma);
    }

    #[tokio::test]
    async fn display_caps_at_fifteen_but_counts_all() {
        let ids: Vec<String> = (0..18).map(|i| format!("paper-{i:02}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
        let (aggregator, _) = aggregator_with(ScriptedIndex::new(vec![
            Ok(response_with("big narrative", &id_refs)),
            Ok(response_with("", &[])),
            Ok(response_with("", &[])),
            Ok(response_with("", &[])),
            Ok(response_with("", &[])),
        ]));

        let report = aggregator.search("breadth", DetailLevel::Comprehensive).await;
        assert!(report.contains("(18 papers)"));
        assert!(report.contains("Found 18 unique papers"));
        assert!(report.contains("`paper-14`"));
        assert!(!report.contains("`paper-15`"));
        assert!(report.contains("\n15. "));
        assert!(!report.contains("\n16. "));
    }
}
