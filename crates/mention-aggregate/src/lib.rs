//! # mention-aggregate
//!
//! Per-entity statistics over consolidated mentions: distinct dialog
//! counts, mention counts, dialog share, frequency per thousand dialogs,
//! and intensity (mentions per dialog). Recomputed from scratch each run —
//! nothing is persisted incrementally.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use mention_core::{AggregateRow, ConsolidatedMention, CooccurrenceRow, Mention, SubthemeRow};
use tracing::info;

/// Round to one decimal place, for presentation.
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Round to two decimal places.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Compute per-canonical-entity aggregate rows.
///
/// `total_dialogs` is the distinct dialog count across the whole batch, not
/// just this entity kind. A zero total short-circuits shares to 0 instead
/// of dividing. Rows are sorted by descending dialog count, then id.
pub fn summarize(rows: &[ConsolidatedMention], total_dialogs: u64) -> Vec<AggregateRow> {
    // BTreeMap keyed by canonical_id for deterministic iteration.
    let mut by_entity: BTreeMap<&str, (&str, HashSet<&str>, u64)> = BTreeMap::new();

    for row in rows {
        let slot = by_entity
            .entry(&row.canonical_id)
            .or_insert_with(|| (&row.canonical_title, HashSet::new(), 0));
        slot.1.insert(&row.mention.dialog_id);
        slot.2 += 1;
    }

    let mut out: Vec<AggregateRow> = by_entity
        .into_iter()
        .map(|(id, (title, dialog_set, mentions))| {
            let dialogs = dialog_set.len() as u64;
            let (share, freq) = if total_dialogs == 0 {
                (0.0, 0.0)
            } else {
                (
                    100.0 * dialogs as f64 / total_dialogs as f64,
                    1000.0 * dialogs as f64 / total_dialogs as f64,
                )
            };
            AggregateRow {
                canonical_id: id.to_string(),
                canonical_title: title.to_string(),
                dialogs,
                mentions,
                share_dialogs_pct: round1(share),
                freq_per_1k: round1(freq),
                intensity_mpd: round2(mentions as f64 / dialogs.max(1) as f64),
            }
        })
        .collect();

    out.sort_by(|a, b| {
        b.dialogs
            .cmp(&a.dialogs)
            .then_with(|| a.canonical_id.cmp(&b.canonical_id))
    });

    info!(entities = out.len(), total_dialogs, "aggregation complete");
    out
}

/// Compute the subtheme breakdown: the same counts further grouped by
/// `(canonical_id, theme, subtheme)`, sorted by descending dialog count
/// within each canonical id.
pub fn subtheme_breakdown(rows: &[ConsolidatedMention]) -> Vec<SubthemeRow> {
    let mut by_key: BTreeMap<(&str, &str, &str), (&str, HashSet<&str>, u64)> = BTreeMap::new();

    for row in rows {
        let key = (
            row.canonical_id.as_str(),
            row.mention.theme.as_str(),
            row.mention.subtheme.as_str(),
        );
        let slot = by_key
            .entry(key)
            .or_insert_with(|| (&row.canonical_title, HashSet::new(), 0));
        slot.1.insert(&row.mention.dialog_id);
        slot.2 += 1;
    }

    let mut out: Vec<SubthemeRow> = by_key
        .into_iter()
        .map(|((id, theme, subtheme), (title, dialog_set, mentions))| SubthemeRow {
            canonical_id: id.to_string(),
            canonical_title: title.to_string(),
            theme: theme.to_string(),
            subtheme: subtheme.to_string(),
            dialogs: dialog_set.len() as u64,
            mentions,
        })
        .collect();

    out.sort_by(|a, b| {
        a.canonical_id
            .cmp(&b.canonical_id)
            .then_with(|| b.dialogs.cmp(&a.dialogs))
            .then_with(|| a.theme.cmp(&b.theme))
            .then_with(|| a.subtheme.cmp(&b.subtheme))
    });
    out
}

/// Count theme pairs raised within the same dialog.
///
/// Each dialog contributes its distinct theme set once; every unordered
/// pair of that set (`theme_a < theme_b`) adds one to the pair's weight.
/// Rows come out sorted by descending weight, then pair.
pub fn theme_cooccurrence(mentions: &[Mention]) -> Vec<CooccurrenceRow> {
    let mut themes_by_dialog: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for m in mentions {
        themes_by_dialog
            .entry(&m.dialog_id)
            .or_default()
            .insert(&m.theme);
    }

    let mut weights: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for themes in themes_by_dialog.values() {
        let themes: Vec<&str> = themes.iter().copied().collect();
        for i in 0..themes.len() {
            for j in (i + 1)..themes.len() {
                // BTreeSet order already gives themes[i] < themes[j].
                *weights.entry((themes[i], themes[j])).or_default() += 1;
            }
        }
    }

    let mut out: Vec<CooccurrenceRow> = weights
        .into_iter()
        .map(|((a, b), weight)| CooccurrenceRow {
            theme_a: a.to_string(),
            theme_b: b.to_string(),
            weight,
        })
        .collect();
    out.sort_by(|a, b| {
        b.weight
            .cmp(&a.weight)
            .then_with(|| a.theme_a.cmp(&b.theme_a))
            .then_with(|| a.theme_b.cmp(&b.theme_b))
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mention_core::{Confidence, ConsolidatedMention, LabelType, Mention};

    fn row(dialog: &str, theme: &str, subtheme: &str, id: &str) -> ConsolidatedMention {
        ConsolidatedMention {
            mention: Mention {
                dialog_id: dialog.to_string(),
                turn_id: 0,
                theme: theme.to_string(),
                subtheme: subtheme.to_string(),
                label_type: LabelType::Barrier,
                text_quote: "цитата".to_string(),
                confidence: Confidence::new(0.75),
                is_client_only: true,
                has_evidence: true,
            },
            canonical_id: id.to_string(),
            canonical_title: format!("title-{id}"),
        }
    }

    #[test]
    fn two_of_three_dialogs_yield_expected_shares() {
        // Scenario: 2 distinct dialogs mention delivery, 3 dialogs total.
        let rows = vec![
            row("d1", "доставка", "", "delivery"),
            row("d2", "доставка", "", "delivery"),
        ];
        let agg = summarize(&rows, 3);
        assert_eq!(agg.len(), 1);
        assert_eq!(agg[0].dialogs, 2);
        assert_eq!(agg[0].share_dialogs_pct, 66.7);
        assert_eq!(agg[0].freq_per_1k, 666.7);
    }

    #[test]
    fn intensity_is_mentions_per_dialog() {
        let rows = vec![
            row("d1", "доставка", "", "delivery"),
            row("d1", "доставка", "", "delivery"),
            row("d1", "доставка", "", "delivery"),
            row("d2", "доставка", "", "delivery"),
        ];
        let agg = summarize(&rows, 2);
        assert_eq!(agg[0].mentions, 4);
        assert_eq!(agg[0].intensity_mpd, 2.0);
    }

    #[test]
    fn zero_total_dialogs_short_circuits_to_zero() {
        let rows = vec![row("d1", "доставка", "", "delivery")];
        let agg = summarize(&rows, 0);
        assert_eq!(agg[0].share_dialogs_pct, 0.0);
        assert_eq!(agg[0].freq_per_1k, 0.0);
    }

    #[test]
    fn shares_stay_within_bounds() {
        let rows: Vec<ConsolidatedMention> = (0..5)
            .map(|i| row(&format!("d{i}"), "доставка", "", "delivery"))
            .collect();
        let agg = summarize(&rows, 5);
        for r in &agg {
            assert!(r.share_dialogs_pct >= 0.0 && r.share_dialogs_pct <= 100.0);
        }
    }

    #[test]
    fn rows_sorted_by_descending_dialogs() {
        let rows = vec![
            row("d1", "цены", "", "pricing"),
            row("d1", "доставка", "", "delivery"),
            row("d2", "доставка", "", "delivery"),
        ];
        let agg = summarize(&rows, 2);
        assert_eq!(agg[0].canonical_id, "delivery");
        assert_eq!(agg[1].canonical_id, "pricing");
    }

    #[test]
    fn breakdown_groups_by_subtheme_within_entity() {
        let rows = vec![
            row("d1", "доставка", "регион/покрытие", "delivery"),
            row("d2", "доставка", "регион/покрытие", "delivery"),
            row("d1", "доставка", "вес/габариты", "delivery"),
        ];
        let sub = subtheme_breakdown(&rows);
        assert_eq!(sub.len(), 2);
        // Within the entity, the higher-dialog subtheme comes first.
        assert_eq!(sub[0].subtheme, "регион/покрытие");
        assert_eq!(sub[0].dialogs, 2);
        assert_eq!(sub[1].subtheme, "вес/габариты");
    }

    fn plain(dialog: &str, theme: &str) -> Mention {
        row(dialog, theme, "", "unused").mention
    }

    #[test]
    fn cooccurrence_counts_dialogs_not_mentions() {
        // d1 raises delivery twice plus support; the pair still weighs 1.
        let mentions = vec![
            plain("d1", "доставка"),
            plain("d1", "доставка"),
            plain("d1", "поддержка"),
            plain("d2", "доставка"),
            plain("d2", "поддержка"),
            plain("d3", "цены"),
        ];
        let pairs = theme_cooccurrence(&mentions);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].theme_a, "доставка");
        assert_eq!(pairs[0].theme_b, "поддержка");
        assert_eq!(pairs[0].weight, 2);
    }

    #[test]
    fn cooccurrence_pairs_sorted_by_descending_weight() {
        let mentions = vec![
            plain("d1", "a"),
            plain("d1", "b"),
            plain("d2", "a"),
            plain("d2", "b"),
            plain("d2", "c"),
        ];
        let pairs = theme_cooccurrence(&mentions);
        assert_eq!(pairs[0].theme_a, "a");
        assert_eq!(pairs[0].theme_b, "b");
        assert_eq!(pairs[0].weight, 2);
        // Remaining pairs each occur in one dialog.
        assert_eq!(pairs.len(), 3);
        assert!(pairs[1..].iter().all(|p| p.weight == 1));
    }

    #[test]
    fn single_theme_dialogs_yield_no_pairs() {
        let mentions = vec![plain("d1", "доставка"), plain("d2", "цены")];
        assert!(theme_cooccurrence(&mentions).is_empty());
    }

    #[test]
    fn aggregation_is_order_independent() {
        let mut rows = vec![
            row("d1", "доставка", "", "delivery"),
            row("d2", "цены", "", "pricing"),
            row("d3", "доставка", "", "delivery"),
        ];
        let a = summarize(&rows, 3);
        rows.reverse();
        let b = summarize(&rows, 3);
        assert_eq!(a, b);
    }
}
