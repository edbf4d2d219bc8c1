use serde::{Deserialize, Serialize};

/// Which duplicate-detection strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupStrategyKind {
    /// Normalized-quote hash collision within a grouping key.
    #[default]
    Exact,
    /// Greedy cosine-similarity suppression over embedding vectors.
    Similarity,
}

/// Grouping scope for exact-hash dedup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupScope {
    /// `(dialog_id, turn_id, theme, subtheme, hash)` — pre-consolidation.
    #[default]
    Strict,
    /// `(theme, subtheme, hash)` — collapses repeats across dialogs.
    CrossDialog,
}

/// Deduplicator subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    pub strategy: DedupStrategyKind,
    pub scope: DedupScope,
    /// Cosine similarity at or above which a later item is suppressed.
    pub similarity_threshold: f64,
    /// Global dedup rate above which a warning is logged (not fatal).
    pub warn_rate: f64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            strategy: DedupStrategyKind::Exact,
            scope: DedupScope::Strict,
            similarity_threshold: super::defaults::SIMILARITY_THRESHOLD,
            warn_rate: super::defaults::DEDUP_WARN_RATE,
        }
    }
}
