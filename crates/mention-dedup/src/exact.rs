//! Exact-hash dedup: blake3 over the normalized quote, first seen wins
//! within the grouping key.

use std::collections::HashSet;

use mention_core::config::DedupScope;
use mention_core::errors::PipelineResult;
use mention_core::traits::{DedupOutcome, IDedupStrategy};
use mention_core::Mention;

use crate::normalize_quote;

/// Keeps the first mention among an exact-hash collision within a group.
pub struct ExactHashStrategy {
    scope: DedupScope,
}

impl ExactHashStrategy {
    pub fn new(scope: DedupScope) -> Self {
        Self { scope }
    }

    fn group_key(&self, m: &Mention, quote_hash: String) -> (String, u32, String, String, String) {
        match self.scope {
            DedupScope::Strict => (
                m.dialog_id.clone(),
                m.turn_id,
                m.theme.clone(),
                m.subtheme.clone(),
                quote_hash,
            ),
            // Cross-dialog collapsing ignores the source identity.
            DedupScope::CrossDialog => (
                String::new(),
                0,
                m.theme.clone(),
                m.subtheme.clone(),
                quote_hash,
            ),
        }
    }
}

impl IDedupStrategy for ExactHashStrategy {
    fn dedup(&self, mentions: Vec<Mention>) -> PipelineResult<DedupOutcome> {
        let before = mentions.len();
        let mut seen: HashSet<(String, u32, String, String, String)> =
            HashSet::with_capacity(before);
        let mut kept = Vec::with_capacity(before);

        for mention in mentions {
            let hash = blake3::hash(normalize_quote(&mention.text_quote).as_bytes())
                .to_hex()
                .to_string();
            if seen.insert(self.group_key(&mention, hash)) {
                kept.push(mention);
            }
        }

        Ok(DedupOutcome::from_counts(before, kept))
    }

    fn name(&self) -> &str {
        "exact-hash"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mention_core::{Confidence, LabelType};

    fn mention(dialog: &str, turn: u32, quote: &str) -> Mention {
        Mention {
            dialog_id: dialog.to_string(),
            turn_id: turn,
            theme: "доставка".to_string(),
            subtheme: "не работает выборочно".to_string(),
            label_type: LabelType::Barrier,
            text_quote: quote.to_string(),
            confidence: Confidence::new(0.75),
            is_client_only: true,
            has_evidence: true,
        }
    }

    #[test]
    fn cross_dialog_collapses_identical_normalized_quotes() {
        // Scenario: two identical quotes and one distinct quote in the same
        // (theme, subtheme) group -> 2 survivors, rate 1/3.
        let strategy = ExactHashStrategy::new(DedupScope::CrossDialog);
        let outcome = strategy
            .dedup(vec![
                mention("d1", 0, "у меня проблема с доставкой"),
                mention("d2", 3, "У меня  проблема с доставкой"),
                mention("d3", 1, "другая проблема с доставкой"),
            ])
            .unwrap();
        assert_eq!(outcome.kept.len(), 2);
        assert_eq!(outcome.removed, 1);
        assert!((outcome.rate - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn strict_scope_keeps_same_quote_from_different_turns() {
        let strategy = ExactHashStrategy::new(DedupScope::Strict);
        let outcome = strategy
            .dedup(vec![
                mention("d1", 0, "у меня проблема с доставкой"),
                mention("d1", 2, "у меня проблема с доставкой"),
            ])
            .unwrap();
        assert_eq!(outcome.kept.len(), 2);
        assert_eq!(outcome.removed, 0);
    }

    #[test]
    fn strict_scope_drops_repeat_within_same_turn() {
        let strategy = ExactHashStrategy::new(DedupScope::Strict);
        let outcome = strategy
            .dedup(vec![
                mention("d1", 0, "у меня проблема с доставкой"),
                mention("d1", 0, "у меня проблема с доставкой"),
            ])
            .unwrap();
        assert_eq!(outcome.kept.len(), 1);
    }

    #[test]
    fn first_seen_mention_survives() {
        let strategy = ExactHashStrategy::new(DedupScope::CrossDialog);
        let outcome = strategy
            .dedup(vec![
                mention("first", 0, "одна и та же цитата"),
                mention("second", 0, "одна и та же цитата"),
            ])
            .unwrap();
        assert_eq!(outcome.kept[0].dialog_id, "first");
    }

    #[test]
    fn dedup_is_idempotent() {
        let strategy = ExactHashStrategy::new(DedupScope::CrossDialog);
        let first = strategy
            .dedup(vec![
                mention("d1", 0, "цитата"),
                mention("d2", 0, "цитата"),
                mention("d3", 0, "другая"),
            ])
            .unwrap();
        let second = strategy.dedup(first.kept.clone()).unwrap();
        assert_eq!(second.rate, 0.0);
        assert_eq!(second.kept, first.kept);
    }
}
