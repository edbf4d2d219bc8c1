/// Extractor-stage errors. Only batch-fatal conditions appear here;
/// per-window classifier failures are handled locally and logged.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("taxonomy is empty: extractor cannot run without a theme vocabulary")]
    EmptyTaxonomy,

    #[error("taxonomy file not found: {path}")]
    TaxonomyNotFound { path: String },

    #[error("taxonomy parse failed: {reason}")]
    TaxonomyParse { reason: String },

    #[error("classifier endpoint not configured")]
    ClassifierNotConfigured,

    /// Per-window transport or parse failure. Local: the caller treats the
    /// window as producing zero mentions and continues.
    #[error("classifier call failed: {reason}")]
    ClassifierCall { reason: String },

    #[error("invalid extraction rule `{pattern}`: {reason}")]
    InvalidRule { pattern: String, reason: String },
}
