use crate::errors::PipelineResult;
use crate::taxonomy::Taxonomy;

/// External LLM classifier: given the client-only text of a dialog window
/// and the taxonomy, return candidate mentions as raw JSON objects.
///
/// Candidates are validated against the mention schema by the caller;
/// schema-invalid items are dropped there, not here. An `Err` from
/// `classify` is a local failure — the caller treats the window as
/// producing zero mentions and continues.
pub trait IClassifier: Send + Sync {
    /// Classify one window of aggregated client turns.
    fn classify(
        &self,
        client_window: &str,
        taxonomy: &Taxonomy,
    ) -> PipelineResult<Vec<serde_json::Value>>;

    /// Human-readable classifier name.
    fn name(&self) -> &str;
}
