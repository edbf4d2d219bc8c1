use std::collections::{HashMap, HashSet};

use chrono::Utc;
use mention_core::config::QualityConfig;
use mention_core::errors::{PipelineResult, QualityError};
use mention_core::{Confidence, ConsolidatedMention, QualityReport, Role, Utterance};
use tracing::info;

/// Everything the gate needs from the preceding stages.
pub struct QualityInput<'a> {
    /// Final post-dedup, post-consolidation mention set.
    pub mentions: &'a [ConsolidatedMention],
    /// The originating utterance set of the batch.
    pub utterances: &'a [Utterance],
    /// Global dedup rate reported by the Deduplicator.
    pub dedup_rate: f64,
}

/// The quality gate. Computes a [`QualityReport`] and the pass verdict.
///
/// Coverage is measured at the dialog level: the share of distinct dialogs
/// whose mentions all fall in the other/unmapped bucket.
pub struct QualityGate {
    config: QualityConfig,
}

impl QualityGate {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Compute the report. Pure over its input — no side effects beyond
    /// logging the verdict.
    pub fn certify(&self, input: &QualityInput<'_>) -> PipelineResult<QualityReport> {
        let mentions = input.mentions;

        // Without the utterance set every mention would look orphaned and
        // the client-only verdict would be meaningless.
        if !mentions.is_empty() && input.utterances.is_empty() {
            return Err(QualityError::MissingUtterances.into());
        }

        let evidence_100 = mentions
            .iter()
            .all(|m| !m.mention.text_quote.trim().is_empty());

        // Index utterance roles by (dialog_id, turn_id). A mention with no
        // matching utterance record is a violation, not vacuously valid.
        let roles: HashMap<(&str, u32), Role> = input
            .utterances
            .iter()
            .map(|u| ((u.dialog_id.as_str(), u.turn_id), u.role))
            .collect();
        let client_only_100 = mentions.iter().all(|m| {
            roles
                .get(&(m.mention.dialog_id.as_str(), m.mention.turn_id))
                .is_some_and(|r| *r == Role::Client)
        });

        let schema_valid_100 = mentions.iter().all(|m| {
            !m.mention.dialog_id.trim().is_empty()
                && !m.mention.theme.trim().is_empty()
                && !m.mention.text_quote.is_empty()
                && (0.0..=1.0).contains(&m.mention.confidence.value())
        });

        // Coverage denominator is the set of dialogs that produced mentions;
        // a dialog with no mentions at all is not "covered by other".
        let dialog_ids: HashSet<&str> =
            mentions.iter().map(|m| m.mention.dialog_id.as_str()).collect();
        let covered_dialogs: HashSet<&str> = mentions
            .iter()
            .filter(|m| !m.is_unmapped())
            .map(|m| m.mention.dialog_id.as_str())
            .collect();
        let mentioned_dialogs = dialog_ids.len() as u64;
        let other_dialogs = dialog_ids.difference(&covered_dialogs).count() as u64;
        let coverage_other_pct = if mentioned_dialogs == 0 {
            0.0
        } else {
            100.0 * other_dialogs as f64 / mentioned_dialogs as f64
        };

        // Batch size for the report is the whole batch, mentions or not.
        let total_dialogs = input
            .utterances
            .iter()
            .map(|u| u.dialog_id.as_str())
            .collect::<HashSet<_>>()
            .len() as u64;

        let total_mentions = mentions.len() as u64;
        let ambiguity_pct = if total_mentions == 0 {
            0.0
        } else {
            100.0
                * mentions
                    .iter()
                    .filter(|m| m.mention.confidence.value() < Confidence::LOW)
                    .count() as f64
                / total_mentions as f64
        };

        let passed = evidence_100
            && client_only_100
            && schema_valid_100
            && input.dedup_rate <= self.config.dedup_max
            && coverage_other_pct <= self.config.coverage_other_max;

        let report = QualityReport {
            evidence_100,
            client_only_100,
            schema_valid_100,
            dedup_rate: input.dedup_rate,
            coverage_other_pct,
            ambiguity_pct,
            total_dialogs,
            total_mentions,
            passed,
            generated_at: Utc::now(),
        };

        info!(
            passed = report.passed,
            evidence = report.evidence_100,
            client_only = report.client_only_100,
            schema = report.schema_valid_100,
            dedup_rate = report.dedup_rate,
            coverage_other_pct = report.coverage_other_pct,
            ambiguity_pct = report.ambiguity_pct,
            "quality gate verdict"
        );
        Ok(report)
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new(QualityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mention_core::constants::{OTHER_UNMAPPED_ID, OTHER_UNMAPPED_TITLE};
    use mention_core::{LabelType, Mention};

    fn utterance(dialog: &str, turn: u32, role: Role) -> Utterance {
        Utterance {
            dialog_id: dialog.to_string(),
            turn_id: turn,
            role,
            text: "текст".to_string(),
        }
    }

    fn consolidated(dialog: &str, turn: u32, quote: &str, mapped: bool) -> ConsolidatedMention {
        ConsolidatedMention {
            mention: Mention {
                dialog_id: dialog.to_string(),
                turn_id: turn,
                theme: "доставка".to_string(),
                subtheme: "".to_string(),
                label_type: LabelType::Barrier,
                text_quote: quote.to_string(),
                confidence: Confidence::new(0.75),
                is_client_only: true,
                has_evidence: true,
            },
            canonical_id: if mapped {
                "delivery".to_string()
            } else {
                OTHER_UNMAPPED_ID.to_string()
            },
            canonical_title: if mapped {
                "Delivery".to_string()
            } else {
                OTHER_UNMAPPED_TITLE.to_string()
            },
        }
    }

    fn gate() -> QualityGate {
        QualityGate::default()
    }

    #[test]
    fn clean_batch_passes() {
        let utterances = vec![utterance("d1", 0, Role::Client)];
        let mentions = vec![consolidated("d1", 0, "проблема с доставкой", true)];
        let report = gate()
            .certify(&QualityInput {
                mentions: &mentions,
                utterances: &utterances,
                dedup_rate: 0.0,
            })
            .unwrap();
        assert!(report.passed);
        assert!(report.evidence_100);
        assert!(report.client_only_100);
        assert!(report.schema_valid_100);
    }

    #[test]
    fn empty_quote_fails_evidence_and_gate() {
        // Scenario: one empty quote fails the whole batch regardless of
        // other metrics.
        let utterances = vec![
            utterance("d1", 0, Role::Client),
            utterance("d2", 0, Role::Client),
        ];
        let mentions = vec![
            consolidated("d1", 0, "проблема", true),
            consolidated("d2", 0, "   ", true),
        ];
        let report = gate()
            .certify(&QualityInput {
                mentions: &mentions,
                utterances: &utterances,
                dedup_rate: 0.0,
            })
            .unwrap();
        assert!(!report.evidence_100);
        assert!(!report.passed);
    }

    #[test]
    fn operator_sourced_mention_fails_client_only() {
        // Scenario: mention traced to an operator turn.
        let utterances = vec![utterance("d1", 0, Role::Operator)];
        let mentions = vec![consolidated("d1", 0, "проблема", true)];
        let report = gate()
            .certify(&QualityInput {
                mentions: &mentions,
                utterances: &utterances,
                dedup_rate: 0.0,
            })
            .unwrap();
        assert!(!report.client_only_100);
        assert!(!report.passed);
    }

    #[test]
    fn orphan_mention_is_a_client_only_violation() {
        // The utterance set exists but has no record for turn 7.
        let utterances = vec![utterance("d1", 0, Role::Client)];
        let mentions = vec![consolidated("d1", 7, "проблема", true)];
        let report = gate()
            .certify(&QualityInput {
                mentions: &mentions,
                utterances: &utterances,
                dedup_rate: 0.0,
            })
            .unwrap();
        assert!(!report.client_only_100);
    }

    #[test]
    fn mentions_without_an_utterance_set_are_an_error() {
        let mentions = vec![consolidated("d1", 0, "проблема", true)];
        let err = gate()
            .certify(&QualityInput {
                mentions: &mentions,
                utterances: &[],
                dedup_rate: 0.0,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            mention_core::PipelineError::Quality(QualityError::MissingUtterances)
        ));
    }

    #[test]
    fn excess_dedup_rate_fails_gate_but_is_reported() {
        let utterances = vec![utterance("d1", 0, Role::Client)];
        let mentions = vec![consolidated("d1", 0, "проблема", true)];
        let report = gate()
            .certify(&QualityInput {
                mentions: &mentions,
                utterances: &utterances,
                dedup_rate: 0.05,
            })
            .unwrap();
        assert!(!report.passed);
        assert_eq!(report.dedup_rate, 0.05);
        // The metric checks themselves still hold.
        assert!(report.evidence_100);
    }

    #[test]
    fn coverage_counts_dialogs_not_mentions() {
        // d1 has one mapped and one unmapped mention: covered.
        // d2 has only unmapped mentions: in the other bucket.
        let utterances = vec![
            utterance("d1", 0, Role::Client),
            utterance("d1", 2, Role::Client),
            utterance("d2", 0, Role::Client),
        ];
        let mentions = vec![
            consolidated("d1", 0, "проблема", true),
            consolidated("d1", 2, "ещё", false),
            consolidated("d2", 0, "другое", false),
        ];
        let report = gate()
            .certify(&QualityInput {
                mentions: &mentions,
                utterances: &utterances,
                dedup_rate: 0.0,
            })
            .unwrap();
        assert!((report.coverage_other_pct - 50.0).abs() < 1e-9);
        assert!(!report.passed); // 50% > 2% default ceiling.
    }

    #[test]
    fn empty_batch_yields_neutral_report() {
        let report = gate()
            .certify(&QualityInput {
                mentions: &[],
                utterances: &[],
                dedup_rate: 0.0,
            })
            .unwrap();
        assert!(report.passed);
        assert_eq!(report.total_mentions, 0);
        assert_eq!(report.coverage_other_pct, 0.0);
    }

    #[test]
    fn ambiguity_is_informational_only() {
        let utterances = vec![utterance("d1", 0, Role::Client)];
        let mut low = consolidated("d1", 0, "проблема", true);
        low.mention.confidence = Confidence::new(0.3);
        let report = gate()
            .certify(&QualityInput {
                mentions: &[low],
                utterances: &utterances,
                dedup_rate: 0.0,
            })
            .unwrap();
        assert_eq!(report.ambiguity_pct, 100.0);
        assert!(report.passed);
    }
}
