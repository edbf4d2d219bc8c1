use crate::errors::PipelineResult;
use crate::mention::Mention;

/// Outcome of one dedup pass.
#[derive(Debug, Clone)]
pub struct DedupOutcome {
    /// Surviving mentions, in original order.
    pub kept: Vec<Mention>,
    /// How many mentions were removed.
    pub removed: usize,
    /// `removed / before`, 0.0 for an empty input.
    pub rate: f64,
}

impl DedupOutcome {
    /// Build an outcome from the pre-dedup count and the survivors.
    pub fn from_counts(before: usize, kept: Vec<Mention>) -> Self {
        let removed = before.saturating_sub(kept.len());
        let rate = if before == 0 {
            0.0
        } else {
            removed as f64 / before as f64
        };
        Self {
            kept,
            removed,
            rate,
        }
    }
}

/// Near-duplicate suppression within a grouping key. One interface, two
/// implementations (exact-hash and similarity-threshold), selected by
/// configuration.
pub trait IDedupStrategy: Send + Sync {
    /// Remove near-duplicates, keeping at most one survivor per duplicate
    /// cluster. Survivors keep their original relative order.
    fn dedup(&self, mentions: Vec<Mention>) -> PipelineResult<DedupOutcome>;

    /// Human-readable strategy name.
    fn name(&self) -> &str;
}
