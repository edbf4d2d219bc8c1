/// QualityGate errors. Threshold violations are not errors — they land in
/// the report with `passed = false`. These variants cover conditions where
/// the gate cannot be computed at all.
#[derive(Debug, thiserror::Error)]
pub enum QualityError {
    #[error("no utterance set available for the client-only check")]
    MissingUtterances,
}
