//! # mention-dedup
//!
//! Near-duplicate suppression within a grouping key. One `IDedupStrategy`
//! interface, two implementations selected by configuration:
//!
//! - [`ExactHashStrategy`] — normalized-quote hash collision, first seen wins.
//! - [`SimilarityStrategy`] — greedy cosine-similarity suppression over
//!   externally supplied embedding vectors.
//!
//! A dedup rate above the configured warning threshold is logged but never
//! fatal; the rate feeds the quality gate.

mod exact;
mod similarity;

pub use exact::ExactHashStrategy;
pub use similarity::{cosine_similarity, SimilarityStrategy};

use mention_core::config::DedupConfig;
use mention_core::errors::PipelineResult;
use mention_core::traits::{DedupOutcome, IDedupStrategy, IEmbeddingProvider};
use mention_core::Mention;
use tracing::{info, warn};

/// Build the configured strategy.
pub fn strategy_for(
    config: &DedupConfig,
    embedder: Option<Box<dyn IEmbeddingProvider>>,
) -> Box<dyn IDedupStrategy> {
    use mention_core::config::DedupStrategyKind;
    match (config.strategy, embedder) {
        (DedupStrategyKind::Similarity, Some(embedder)) => Box::new(SimilarityStrategy::new(
            embedder,
            config.similarity_threshold,
        )),
        // Similarity without a provider degrades to exact-hash.
        (DedupStrategyKind::Similarity, None) => {
            warn!("similarity dedup requested without an embedding provider, using exact-hash");
            Box::new(ExactHashStrategy::new(config.scope))
        }
        (DedupStrategyKind::Exact, _) => Box::new(ExactHashStrategy::new(config.scope)),
    }
}

/// Run one dedup pass and log the outcome.
pub fn run_dedup(
    strategy: &dyn IDedupStrategy,
    mentions: Vec<Mention>,
    warn_rate: f64,
) -> PipelineResult<DedupOutcome> {
    let before = mentions.len();
    let outcome = strategy.dedup(mentions)?;
    info!(
        strategy = strategy.name(),
        before,
        after = outcome.kept.len(),
        rate = outcome.rate,
        "dedup pass complete"
    );
    if outcome.rate > warn_rate {
        warn!(
            rate = outcome.rate,
            threshold = warn_rate,
            "dedup rate exceeds warning threshold"
        );
    }
    Ok(outcome)
}

/// Normalize a quote for hashing: lowercase, collapse whitespace runs.
pub fn normalize_quote(quote: &str) -> String {
    quote
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
