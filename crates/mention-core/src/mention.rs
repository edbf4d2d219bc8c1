//! Data model for the mention pipeline: utterances, mentions, aggregates,
//! and the quality report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who spoke a dialog turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Operator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Client => write!(f, "client"),
            Role::Operator => write!(f, "operator"),
        }
    }
}

/// One dialog turn as produced by ingestion. Immutable; identified by
/// `(dialog_id, turn_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub dialog_id: String,
    pub turn_id: u32,
    pub role: Role,
    pub text: String,
}

/// The category of a mention: barrier, idea, or signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelType {
    Barrier,
    Idea,
    Signal,
}

impl fmt::Display for LabelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelType::Barrier => write!(f, "barrier"),
            LabelType::Idea => write!(f, "idea"),
            LabelType::Signal => write!(f, "signal"),
        }
    }
}

/// Classifier confidence clamped to [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    /// Below this threshold a mention counts toward the ambiguity rate.
    pub const LOW: f64 = 0.6;
    /// Fixed confidence assigned to rule-based extraction hits.
    pub const RULE_HIT: f64 = 0.75;

    /// Create a new Confidence, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this confidence counts as ambiguous.
    pub fn is_low(self) -> bool {
        self.0 < Self::LOW
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.5)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

/// A single extracted client statement classified into a taxonomy
/// theme/subtheme with a supporting verbatim quote.
///
/// Created by the Extractor from exactly one `role = client` utterance.
/// Mutated only by the Normalizer (`text_quote` masking); the Deduplicator
/// drops mentions but never rewrites them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub dialog_id: String,
    pub turn_id: u32,
    pub theme: String,
    /// May be empty when the classifier did not assign a subtheme.
    #[serde(default)]
    pub subtheme: String,
    pub label_type: LabelType,
    pub text_quote: String,
    pub confidence: Confidence,
    pub is_client_only: bool,
    pub has_evidence: bool,
}

impl Mention {
    /// Source-utterance identity this mention is traceable to.
    pub fn source_key(&self) -> (&str, u32) {
        (&self.dialog_id, self.turn_id)
    }
}

/// A mention joined onto a canonical entity. Unmatched mentions land in the
/// `other_unmapped` bucket rather than being dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedMention {
    #[serde(flatten)]
    pub mention: Mention,
    pub canonical_id: String,
    pub canonical_title: String,
}

impl ConsolidatedMention {
    /// Whether this mention fell into the default bucket.
    pub fn is_unmapped(&self) -> bool {
        self.canonical_id == crate::constants::OTHER_UNMAPPED_ID
    }
}

/// Per-entity aggregate statistics, recomputed from scratch each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub canonical_id: String,
    pub canonical_title: String,
    /// Distinct dialog count.
    pub dialogs: u64,
    pub mentions: u64,
    pub share_dialogs_pct: f64,
    pub freq_per_1k: f64,
    pub intensity_mpd: f64,
}

/// Theme co-occurrence row: two themes raised in the same dialog, weighted
/// by how many dialogs mention both. Pairs are stored with
/// `theme_a < theme_b` so each unordered pair appears once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooccurrenceRow {
    pub theme_a: String,
    pub theme_b: String,
    /// Distinct dialogs mentioning both themes.
    pub weight: u64,
}

/// Subtheme breakdown row: the same counts grouped one level deeper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubthemeRow {
    pub canonical_id: String,
    pub canonical_title: String,
    pub theme: String,
    pub subtheme: String,
    pub dialogs: u64,
    pub mentions: u64,
}

/// Immutable snapshot of a pipeline run's quality metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub evidence_100: bool,
    pub client_only_100: bool,
    pub schema_valid_100: bool,
    pub dedup_rate: f64,
    pub coverage_other_pct: f64,
    /// Share of mentions below the low-confidence threshold. Informational.
    pub ambiguity_pct: f64,
    pub total_dialogs: u64,
    pub total_mentions: u64,
    pub passed: bool,
    pub generated_at: DateTime<Utc>,
}

/// Identifier partitioning all persisted artifacts of one processing run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(String);

impl BatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random batch identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BatchId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_clamps_out_of_range() {
        assert_eq!(Confidence::new(1.5).value(), 1.0);
        assert_eq!(Confidence::new(-0.2).value(), 0.0);
    }

    #[test]
    fn confidence_low_threshold() {
        assert!(Confidence::new(0.59).is_low());
        assert!(!Confidence::new(0.6).is_low());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Client).unwrap(), "\"client\"");
        assert_eq!(
            serde_json::to_string(&Role::Operator).unwrap(),
            "\"operator\""
        );
    }

    #[test]
    fn consolidated_mention_flattens_in_json() {
        let m = Mention {
            dialog_id: "d1".to_string(),
            turn_id: 0,
            theme: "доставка".to_string(),
            subtheme: "".to_string(),
            label_type: LabelType::Barrier,
            text_quote: "проблема".to_string(),
            confidence: Confidence::new(0.75),
            is_client_only: true,
            has_evidence: true,
        };
        let c = ConsolidatedMention {
            mention: m,
            canonical_id: "p1".to_string(),
            canonical_title: "Delivery".to_string(),
        };
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["dialog_id"], "d1");
        assert_eq!(json["canonical_id"], "p1");
    }

    #[test]
    fn batch_id_roundtrip() {
        let b = BatchId::new("2024-01");
        assert_eq!(b.as_str(), "2024-01");
        assert_ne!(BatchId::generate(), BatchId::generate());
    }
}
