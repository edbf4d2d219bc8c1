//! # mention-pipeline
//!
//! Orchestrates the six pipeline stages in fixed order:
//! Extract → Normalize → Dedup → Consolidate → Aggregate → Quality.
//!
//! Each stage reads the previous stage's persisted artifact and writes its
//! own, keyed by batch id, so every stage is independently re-runnable. A
//! stage whose upstream dependency did not complete is skipped, never
//! retried; fatal errors mark the stage failed in the [`RunReport`] and
//! never panic.
//!
//! The caller names the input explicitly via [`DialogSource`] — the runner
//! never probes the filesystem to guess where a batch came from.

mod report;
mod runner;
mod source;
mod telemetry;

pub use report::{RunReport, Stage, StageStatus};
pub use runner::{PipelineRunner, RunnerBuilder};
pub use source::DialogSource;
pub use telemetry::init_tracing;
