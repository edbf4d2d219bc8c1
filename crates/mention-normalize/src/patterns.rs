//! PII detection patterns for quote text.

use regex::Regex;
use std::sync::LazyLock;

use mention_core::constants::{EMAIL_PLACEHOLDER, PHONE_PLACEHOLDER};

/// A compiled PII detection pattern.
pub struct PiiPattern {
    pub name: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub placeholder: &'static str,
}

macro_rules! pii_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Phone numbers: 7+ digits with optional +, spaces, dashes ──────────────
pii_pattern!(RE_PHONE, r"(?:\+?\d[\s\-]?){7,}");

// ── Email-like strings ────────────────────────────────────────────────────
// The repeated @-segment keeps the match maximal: a leftover `@` right
// after a replacement could otherwise re-match against the placeholder.
pii_pattern!(RE_EMAIL, r"[\w.\-]+(?:@[\w.\-]+)+");

/// All quote patterns in detection order. Email first: an address can embed
/// a digit run the phone pattern would otherwise split.
pub fn all_patterns() -> Vec<PiiPattern> {
    vec![
        PiiPattern {
            name: "email",
            regex: &RE_EMAIL,
            placeholder: EMAIL_PLACEHOLDER,
        },
        PiiPattern {
            name: "phone",
            regex: &RE_PHONE,
            placeholder: PHONE_PLACEHOLDER,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_pattern_matches_separated_runs() {
        let re = RE_PHONE.as_ref().unwrap();
        assert!(re.is_match("+7 912 345-67-89"));
        assert!(re.is_match("89123456789"));
        assert!(!re.is_match("звонил 2 раза"));
    }

    #[test]
    fn email_pattern_matches_addresses() {
        let re = RE_EMAIL.as_ref().unwrap();
        assert!(re.is_match("ivan.petrov@example.com"));
        assert!(!re.is_match("нет почты"));
    }
}
