//! Explicit source descriptors for pipeline input.

use std::path::PathBuf;

use mention_core::errors::{PipelineResult, StoreError};
use mention_core::{BatchId, Utterance};
use mention_store::BatchStore;

/// Where a batch's utterances come from. The caller names the
/// representation explicitly; the runner never infers it from the presence
/// of files on disk.
#[derive(Debug, Clone)]
pub enum DialogSource {
    /// Utterances already materialized in memory (tests, upstream ingestion).
    Inline(Vec<Utterance>),
    /// A JSONL file of utterance records, one per line.
    JsonlFile(PathBuf),
    /// A batch whose utterances were persisted to the warehouse by an
    /// earlier run.
    StoredBatch(BatchId),
}

impl DialogSource {
    /// Materialize the utterance set.
    pub(crate) fn load(&self, store: &BatchStore) -> PipelineResult<Vec<Utterance>> {
        match self {
            DialogSource::Inline(utterances) => Ok(utterances.clone()),
            DialogSource::JsonlFile(path) => read_jsonl_file(path),
            DialogSource::StoredBatch(batch) => store.load_utterances(batch),
        }
    }

    /// Short tag for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            DialogSource::Inline(_) => "inline",
            DialogSource::JsonlFile(_) => "jsonl-file",
            DialogSource::StoredBatch(_) => "stored-batch",
        }
    }
}

fn read_jsonl_file(path: &PathBuf) -> PipelineResult<Vec<Utterance>> {
    let raw = std::fs::read_to_string(path).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut rows = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(line).map_err(|e| StoreError::CorruptRecord {
            path: path.display().to_string(),
            line: idx + 1,
            reason: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}
