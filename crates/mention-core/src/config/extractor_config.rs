use serde::{Deserialize, Serialize};

/// How mentions are extracted from client utterances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode {
    /// Ordered regex rules, first match wins.
    #[default]
    Rules,
    /// External LLM classifier over per-dialog windows.
    Classifier,
}

/// Extractor subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub mode: ExtractMode,
    /// Workers used for classifier fan-out across windows.
    pub classifier_workers: usize,
    /// Per-call timeout for classifier requests, seconds.
    pub classifier_timeout_secs: u64,
    /// Retry attempts per classifier call before the window is given up.
    pub classifier_retries: u32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            mode: ExtractMode::Rules,
            classifier_workers: 4,
            classifier_timeout_secs: super::defaults::CLASSIFIER_TIMEOUT_SECS,
            classifier_retries: super::defaults::CLASSIFIER_RETRIES,
        }
    }
}
