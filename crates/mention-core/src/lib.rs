//! # mention-core
//!
//! Foundation crate for the dialog mention pipeline.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod canonical;
pub mod config;
pub mod constants;
pub mod errors;
pub mod mention;
pub mod taxonomy;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use canonical::{CanonicalMap, CanonicalMapEntry, EntityKind, MatchKey};
pub use config::{
    DedupConfig, DedupScope, DedupStrategyKind, ExtractMode, ExtractorConfig, PipelineConfig,
    QualityConfig,
};
pub use errors::{PipelineError, PipelineResult};
pub use mention::{
    AggregateRow, BatchId, Confidence, ConsolidatedMention, CooccurrenceRow, LabelType, Mention,
    QualityReport, Role, SubthemeRow, Utterance,
};
pub use taxonomy::{Taxonomy, ThemeSpec};
