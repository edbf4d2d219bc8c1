//! Similarity-threshold dedup: pairwise cosine over externally supplied
//! embedding vectors, grouped by `(theme, subtheme)`.
//!
//! Greedy and order-dependent: items are walked in original order and a
//! later item is removed if its similarity to any earlier, still-kept item
//! meets the threshold. Non-transitive by construction. O(n²) per group;
//! groups are small relative to the batch.

use std::collections::HashMap;

use mention_core::errors::{PipelineError, PipelineResult};
use mention_core::traits::{DedupOutcome, IDedupStrategy, IEmbeddingProvider};
use mention_core::Mention;

/// Cosine similarity between two vectors.
/// Returns 0.0 for zero-length, mismatched, or zero-magnitude vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Suppresses later mentions whose quote embedding resembles an earlier
/// kept mention in the same `(theme, subtheme)` group.
pub struct SimilarityStrategy {
    embedder: Box<dyn IEmbeddingProvider>,
    threshold: f64,
}

impl SimilarityStrategy {
    pub fn new(embedder: Box<dyn IEmbeddingProvider>, threshold: f64) -> Self {
        Self {
            embedder,
            threshold,
        }
    }
}

impl IDedupStrategy for SimilarityStrategy {
    fn dedup(&self, mentions: Vec<Mention>) -> PipelineResult<DedupOutcome> {
        let before = mentions.len();
        if before < 2 {
            return Ok(DedupOutcome::from_counts(before, mentions));
        }

        let quotes: Vec<String> = mentions.iter().map(|m| m.text_quote.clone()).collect();
        let embeddings = self.embedder.embed_batch(&quotes)?;
        // The provider is an external black box; a short or long batch is a
        // stage-level error, not a panic further down.
        if embeddings.len() != quotes.len() {
            return Err(PipelineError::Embedding {
                reason: format!(
                    "provider {} returned {} vectors for {} quotes",
                    self.embedder.name(),
                    embeddings.len(),
                    quotes.len()
                ),
            });
        }

        // Group indices by (theme, subtheme), preserving original order.
        let mut groups: HashMap<(String, String), Vec<usize>> = HashMap::new();
        for (idx, m) in mentions.iter().enumerate() {
            groups
                .entry((m.theme.clone(), m.subtheme.clone()))
                .or_default()
                .push(idx);
        }

        let mut keep = vec![true; before];
        for indices in groups.values() {
            if indices.len() < 2 {
                continue;
            }
            for i in 0..indices.len() {
                if !keep[indices[i]] {
                    continue;
                }
                for j in (i + 1)..indices.len() {
                    if !keep[indices[j]] {
                        continue;
                    }
                    let sim = cosine_similarity(&embeddings[indices[i]], &embeddings[indices[j]]);
                    if sim >= self.threshold {
                        keep[indices[j]] = false;
                    }
                }
            }
        }

        let kept = mentions
            .into_iter()
            .zip(keep)
            .filter_map(|(m, k)| k.then_some(m))
            .collect();
        Ok(DedupOutcome::from_counts(before, kept))
    }

    fn name(&self) -> &str {
        "similarity"
    }
}
