use crate::errors::PipelineResult;
use serde::{Deserialize, Serialize};

/// Result of sanitization with metadata about what was redacted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizedText {
    pub text: String,
    pub redactions: Vec<Redaction>,
}

/// A single redaction applied during sanitization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Redaction {
    pub category: String,
    pub placeholder: String,
}

/// PII sanitization of quote text. Must be idempotent: sanitizing an
/// already-sanitized text is a no-op.
pub trait ISanitizer: Send + Sync {
    /// Sanitize text, replacing PII with placeholders.
    fn sanitize(&self, text: &str) -> PipelineResult<SanitizedText>;
}
