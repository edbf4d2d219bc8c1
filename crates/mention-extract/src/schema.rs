//! Validation of raw classifier candidates against the mention schema and
//! the taxonomy.
//!
//! The classifier returns untyped JSON; anything that does not carry the
//! required fields in well-formed shape, or names a theme outside the
//! taxonomy, is dropped, not repaired. An off-taxonomy subtheme under a
//! known theme is demoted to empty rather than losing the mention.

use mention_core::{Confidence, LabelType, Mention, Taxonomy};
use serde_json::Value;
use tracing::debug;

/// Result of validating one window's worth of candidates.
#[derive(Debug, Default)]
pub struct ValidatedBatch {
    pub mentions: Vec<Mention>,
    pub dropped: usize,
}

/// Validate a single candidate object. `None` means schema-invalid.
///
/// Required: `turn_id` (unsigned integer), `theme` (non-empty string known
/// to the taxonomy), `text_quote` (non-empty after trimming; `quote`
/// accepted as an alias), `confidence` (number in `[0, 1]`). Optional:
/// `subtheme` (defaults to empty; an invented one is demoted to empty),
/// `label_type` (defaults to `barrier`).
pub fn validate_candidate(
    dialog_id: &str,
    taxonomy: &Taxonomy,
    candidate: &Value,
) -> Option<Mention> {
    let obj = candidate.as_object()?;

    let turn_id = obj.get("turn_id")?.as_u64()?;
    let turn_id = u32::try_from(turn_id).ok()?;

    let theme = obj.get("theme")?.as_str()?.trim();
    if theme.is_empty() || !taxonomy.contains_theme(theme) {
        return None;
    }

    let quote = obj
        .get("text_quote")
        .or_else(|| obj.get("quote"))?
        .as_str()?
        .trim();
    if quote.len() < mention_core::constants::MIN_QUOTE_LEN {
        return None;
    }

    let confidence = obj.get("confidence")?.as_f64()?;
    if !(0.0..=1.0).contains(&confidence) {
        return None;
    }

    let mut subtheme = obj
        .get("subtheme")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim();
    if !taxonomy.contains_pair(theme, subtheme) {
        debug!(dialog_id, theme, subtheme, "demoting off-taxonomy subtheme");
        subtheme = "";
    }

    let label_type = match obj.get("label_type") {
        None | Some(Value::Null) => LabelType::Barrier,
        Some(v) => match v.as_str()? {
            "barrier" => LabelType::Barrier,
            "idea" => LabelType::Idea,
            "signal" => LabelType::Signal,
            _ => return None,
        },
    };

    Some(Mention {
        dialog_id: dialog_id.to_string(),
        turn_id,
        theme: theme.to_string(),
        subtheme: subtheme.to_string(),
        label_type,
        text_quote: quote.to_string(),
        confidence: Confidence::new(confidence),
        is_client_only: true,
        has_evidence: true,
    })
}

/// Validate every candidate for one dialog window, counting drops.
pub fn validate_batch(dialog_id: &str, taxonomy: &Taxonomy, candidates: &[Value]) -> ValidatedBatch {
    let mut batch = ValidatedBatch::default();
    for candidate in candidates {
        match validate_candidate(dialog_id, taxonomy, candidate) {
            Some(mention) => batch.mentions.push(mention),
            None => {
                debug!(dialog_id, %candidate, "dropping schema-invalid candidate");
                batch.dropped += 1;
            }
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use mention_core::ThemeSpec;
    use serde_json::json;

    fn taxonomy() -> Taxonomy {
        Taxonomy {
            themes: vec![
                ThemeSpec {
                    name: "доставка".to_string(),
                    subthemes: vec!["не работает выборочно".to_string()],
                },
                ThemeSpec {
                    name: "цены".to_string(),
                    subthemes: vec!["дорого для категории".to_string()],
                },
            ],
            max_subthemes: 12,
        }
    }

    #[test]
    fn well_formed_candidate_passes() {
        let m = validate_candidate(
            "d1",
            &taxonomy(),
            &json!({
                "turn_id": 2,
                "theme": "доставка",
                "subtheme": "не работает выборочно",
                "label_type": "barrier",
                "text_quote": "доставка то работает, то нет",
                "confidence": 0.9
            }),
        )
        .unwrap();
        assert_eq!(m.dialog_id, "d1");
        assert_eq!(m.turn_id, 2);
        assert_eq!(m.subtheme, "не работает выборочно");
        assert_eq!(m.confidence.value(), 0.9);
        assert!(m.is_client_only);
        assert!(m.has_evidence);
    }

    #[test]
    fn missing_quote_is_dropped() {
        let candidate = json!({"turn_id": 0, "theme": "цены", "confidence": 0.8});
        assert!(validate_candidate("d1", &taxonomy(), &candidate).is_none());
    }

    #[test]
    fn empty_quote_is_dropped() {
        let candidate = json!({
            "turn_id": 0, "theme": "цены", "text_quote": "   ", "confidence": 0.8
        });
        assert!(validate_candidate("d1", &taxonomy(), &candidate).is_none());
    }

    #[test]
    fn out_of_range_confidence_is_dropped() {
        let candidate = json!({
            "turn_id": 0, "theme": "цены", "text_quote": "дорого", "confidence": 1.2
        });
        assert!(validate_candidate("d1", &taxonomy(), &candidate).is_none());
    }

    #[test]
    fn label_type_defaults_to_barrier() {
        let m = validate_candidate(
            "d1",
            &taxonomy(),
            &json!({"turn_id": 0, "theme": "цены", "text_quote": "дорого", "confidence": 0.7}),
        )
        .unwrap();
        assert_eq!(m.label_type, LabelType::Barrier);
    }

    #[test]
    fn unknown_label_type_is_dropped() {
        let candidate = json!({
            "turn_id": 0, "theme": "цены", "text_quote": "дорого",
            "label_type": "complaint", "confidence": 0.7
        });
        assert!(validate_candidate("d1", &taxonomy(), &candidate).is_none());
    }

    #[test]
    fn quote_alias_is_accepted() {
        let m = validate_candidate(
            "d1",
            &taxonomy(),
            &json!({"turn_id": 1, "theme": "цены", "quote": "дорого", "confidence": 0.7}),
        )
        .unwrap();
        assert_eq!(m.text_quote, "дорого");
    }

    #[test]
    fn off_taxonomy_theme_is_dropped() {
        // The model is free-text; a theme it invented never reaches the
        // pipeline.
        let candidate = json!({
            "turn_id": 0, "theme": "логистика склада",
            "text_quote": "дорого", "confidence": 0.7
        });
        assert!(validate_candidate("d1", &taxonomy(), &candidate).is_none());
    }

    #[test]
    fn invented_subtheme_is_demoted_not_dropped() {
        let m = validate_candidate(
            "d1",
            &taxonomy(),
            &json!({
                "turn_id": 0, "theme": "цены", "subtheme": "придуманная",
                "text_quote": "дорого", "confidence": 0.7
            }),
        )
        .unwrap();
        assert_eq!(m.theme, "цены");
        assert_eq!(m.subtheme, "");
    }

    #[test]
    fn batch_counts_drops() {
        let batch = validate_batch(
            "d1",
            &taxonomy(),
            &[
                json!({"turn_id": 0, "theme": "цены", "text_quote": "дорого", "confidence": 0.7}),
                json!({"turn_id": "not a number"}),
                json!("not even an object"),
            ],
        );
        assert_eq!(batch.mentions.len(), 1);
        assert_eq!(batch.dropped, 2);
    }
}
