/// Consolidator-stage errors.
#[derive(Debug, thiserror::Error)]
pub enum ConsolidateError {
    #[error("canonical map for `{kind}` not found: {path}")]
    MapNotFound { kind: String, path: String },

    #[error("canonical map for `{kind}` failed to parse: {reason}")]
    MapParse { kind: String, reason: String },

    #[error("canonical map for `{kind}` is empty")]
    EmptyMap { kind: String },
}
