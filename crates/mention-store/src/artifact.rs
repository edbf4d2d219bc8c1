//! Artifact naming: which files a batch partition consists of.

use mention_core::{BatchId, EntityKind};
use std::fmt;

/// One persisted pipeline output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// Raw ingested dialog turns.
    Utterances,
    /// Extractor output, pre-normalization.
    Mentions,
    /// Normalizer output (PII-masked quotes).
    MentionsNorm,
    /// Deduplicator output, input to consolidation.
    MentionsFinal,
    /// Consolidated mentions for one entity kind.
    Consolidated(EntityKind),
    /// Aggregate summary for one entity kind.
    Summary(EntityKind),
    /// Subtheme breakdown for one entity kind.
    Subthemes(EntityKind),
    /// Theme co-occurrence pairs, batch-level.
    Cooccur,
    /// The quality report (single JSON document).
    Quality,
}

impl Artifact {
    /// File name inside the warehouse root for the given batch.
    pub fn file_name(&self, batch: &BatchId) -> String {
        match self {
            Artifact::Quality => format!("{self}_{batch}.json"),
            _ => format!("{self}_{batch}.jsonl"),
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Utterances => write!(f, "utterances"),
            Artifact::Mentions => write!(f, "mentions"),
            Artifact::MentionsNorm => write!(f, "mentions_norm"),
            Artifact::MentionsFinal => write!(f, "mentions_final"),
            Artifact::Consolidated(kind) => write!(f, "consolidated_{kind}"),
            Artifact::Summary(kind) => write!(f, "summary_{kind}"),
            Artifact::Subthemes(kind) => write!(f, "subthemes_{kind}"),
            Artifact::Cooccur => write!(f, "cooccur"),
            Artifact::Quality => write!(f, "quality"),
        }
    }
}
