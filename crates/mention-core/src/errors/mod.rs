//! Error taxonomy for the pipeline.
//!
//! Fatal conditions (missing taxonomy, missing canonical map, missing input
//! artifact) surface as explicit variants; locally recoverable conditions
//! (bad classifier output, one failed call) are swallowed at the call site
//! with a count and never reach this type.

mod consolidate_error;
mod extract_error;
mod quality_error;
mod store_error;

pub use consolidate_error::ConsolidateError;
pub use extract_error::ExtractError;
pub use quality_error::QualityError;
pub use store_error::StoreError;

/// Top-level error wrapping every domain error in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("consolidation error: {0}")]
    Consolidate(#[from] ConsolidateError),

    #[error("quality error: {0}")]
    Quality(#[from] QualityError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("embedding provider failed: {reason}")]
    Embedding { reason: String },
}

/// Workspace-wide result alias.
pub type PipelineResult<T> = Result<T, PipelineError>;
