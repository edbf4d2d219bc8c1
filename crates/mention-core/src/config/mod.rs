//! Pipeline configuration, loadable from a TOML document.

mod dedup_config;
mod extractor_config;
mod quality_config;

pub use dedup_config::{DedupConfig, DedupScope, DedupStrategyKind};
pub use extractor_config::{ExtractMode, ExtractorConfig};
pub use quality_config::QualityConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{PipelineError, PipelineResult};

/// Default values shared across config sections.
pub mod defaults {
    /// Cosine similarity at or above which a later quote is a near-duplicate.
    pub const SIMILARITY_THRESHOLD: f64 = 0.92;
    /// Dedup rate above which a warning is logged.
    pub const DEDUP_WARN_RATE: f64 = 0.01;
    /// Maximum dedup rate the quality gate accepts.
    pub const DEDUP_MAX: f64 = 0.01;
    /// Maximum share (%) of dialogs allowed in the other/unmapped bucket.
    pub const COVERAGE_OTHER_MAX: f64 = 2.0;
    /// Ambiguity share (%) above which a recommendation is emitted.
    pub const AMBIGUITY_MAX: f64 = 40.0;
    /// Per-call timeout for external classifier requests, seconds.
    pub const CLASSIFIER_TIMEOUT_SECS: u64 = 60;
    /// Retry attempts for a failed classifier call.
    pub const CLASSIFIER_RETRIES: u32 = 2;
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub extractor: ExtractorConfig,
    pub dedup: DedupConfig,
    pub quality: QualityConfig,
}

impl PipelineConfig {
    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| PipelineError::InvalidConfig {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        toml::from_str(&raw).map_err(|e| PipelineError::InvalidConfig {
            reason: e.to_string(),
        })
    }
}
