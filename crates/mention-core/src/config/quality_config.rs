use serde::{Deserialize, Serialize};

/// Quality-gate thresholds.
///
/// Coverage is measured at the dialog level: the share of distinct dialogs
/// whose mentions all fall in the other/unmapped bucket must stay at or
/// below `coverage_other_max` percent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Maximum dedup rate (fraction) the gate accepts.
    pub dedup_max: f64,
    /// Maximum share (%) of dialogs in the other/unmapped bucket.
    pub coverage_other_max: f64,
    /// Ambiguity share (%) above which a recommendation is emitted.
    /// Informational — not part of the pass/fail formula.
    pub ambiguity_max: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            dedup_max: super::defaults::DEDUP_MAX,
            coverage_other_max: super::defaults::COVERAGE_OTHER_MAX,
            ambiguity_max: super::defaults::AMBIGUITY_MAX,
        }
    }
}
