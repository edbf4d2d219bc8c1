use mention_core::errors::PipelineResult;
use mention_core::traits::{ISanitizer, Redaction, SanitizedText};
use mention_core::Mention;
use tracing::debug;

use crate::patterns;

/// Sanitizer for mention quotes.
///
/// Implements `ISanitizer` from mention-core. Replaces phone-like digit runs
/// and email-like strings with placeholders. Idempotent: placeholders
/// contain no digits and no `@`, so a second pass matches nothing.
#[derive(Default)]
pub struct QuoteSanitizer;

impl QuoteSanitizer {
    pub fn new() -> Self {
        Self
    }
}

impl ISanitizer for QuoteSanitizer {
    fn sanitize(&self, text: &str) -> PipelineResult<SanitizedText> {
        let mut out = text.to_string();
        let mut redactions = Vec::new();

        for pat in patterns::all_patterns() {
            // Patterns that failed to compile at init produce no matches.
            let Some(re) = pat.regex.as_ref() else {
                continue;
            };
            let hits = re.find_iter(&out).count();
            if hits == 0 {
                continue;
            }
            for _ in 0..hits {
                redactions.push(Redaction {
                    category: pat.name.to_string(),
                    placeholder: pat.placeholder.to_string(),
                });
            }
            out = re.replace_all(&out, pat.placeholder).into_owned();
        }

        Ok(SanitizedText {
            text: out,
            redactions,
        })
    }
}

/// Counters for one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub mentions: usize,
    pub quotes_changed: usize,
    pub redactions: usize,
}

/// Mask PII in every mention's quote. Only `text_quote` is mutated.
pub fn normalize_batch(
    mentions: &mut [Mention],
    sanitizer: &dyn ISanitizer,
) -> PipelineResult<NormalizeStats> {
    let mut stats = NormalizeStats {
        mentions: mentions.len(),
        ..Default::default()
    };

    for mention in mentions.iter_mut() {
        let sanitized = sanitizer.sanitize(&mention.text_quote)?;
        if sanitized.text != mention.text_quote {
            stats.quotes_changed += 1;
        }
        stats.redactions += sanitized.redactions.len();
        mention.text_quote = sanitized.text;
    }

    debug!(
        mentions = stats.mentions,
        changed = stats.quotes_changed,
        redactions = stats.redactions,
        "quotes normalized"
    );
    Ok(stats)
}
