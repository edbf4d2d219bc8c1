//! # mention-store
//!
//! Batch-partitioned artifact store. Every pipeline stage persists its
//! output here as JSONL (one record per line) or JSON (single document),
//! named `<artifact>_<batch>.<ext>` under one warehouse root.
//!
//! Writes are atomic (temp file in the same directory, then rename), so a
//! crashed run never leaves a half-written artifact behind. Re-running a
//! batch overwrites only that batch's files; other partitions are untouched.

mod artifact;
mod batch_store;

pub use artifact::Artifact;
pub use batch_store::BatchStore;
