/// Pipeline system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Canonical id assigned to mentions no map entry matches.
pub const OTHER_UNMAPPED_ID: &str = "other_unmapped";

/// Canonical title for the default bucket.
pub const OTHER_UNMAPPED_TITLE: &str = "Other/unconsolidated";

/// Placeholder inserted for phone-like digit runs.
pub const PHONE_PLACEHOLDER: &str = "[PHONE]";

/// Placeholder inserted for email-like strings.
pub const EMAIL_PLACEHOLDER: &str = "[EMAIL]";

/// Minimum quote length accepted from the classifier.
pub const MIN_QUOTE_LEN: usize = 1;
