//! The warehouse itself: typed read/write of batch artifacts.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use mention_core::errors::{PipelineResult, StoreError};
use mention_core::{
    AggregateRow, BatchId, ConsolidatedMention, CooccurrenceRow, EntityKind, Mention,
    QualityReport, SubthemeRow, Utterance,
};

use crate::artifact::Artifact;

/// JSONL/JSON artifact store rooted at one warehouse directory.
pub struct BatchStore {
    root: PathBuf,
}

impl BatchStore {
    /// Open (creating the root directory if needed).
    pub fn open(root: impl Into<PathBuf>) -> PipelineResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::Io {
            path: root.display().to_string(),
            source: e,
        })?;
        info!(root = %root.display(), "artifact store opened");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, artifact: Artifact, batch: &BatchId) -> PathBuf {
        self.root.join(artifact.file_name(batch))
    }

    pub fn exists(&self, artifact: Artifact, batch: &BatchId) -> bool {
        self.path(artifact, batch).exists()
    }

    // -- typed artifact accessors ------------------------------------------

    pub fn save_utterances(&self, batch: &BatchId, rows: &[Utterance]) -> PipelineResult<()> {
        self.write_jsonl(Artifact::Utterances, batch, rows)
    }

    pub fn load_utterances(&self, batch: &BatchId) -> PipelineResult<Vec<Utterance>> {
        self.read_jsonl(Artifact::Utterances, batch)
    }

    pub fn save_mentions(
        &self,
        artifact: Artifact,
        batch: &BatchId,
        rows: &[Mention],
    ) -> PipelineResult<()> {
        self.write_jsonl(artifact, batch, rows)
    }

    pub fn load_mentions(&self, artifact: Artifact, batch: &BatchId) -> PipelineResult<Vec<Mention>> {
        self.read_jsonl(artifact, batch)
    }

    pub fn save_consolidated(
        &self,
        kind: EntityKind,
        batch: &BatchId,
        rows: &[ConsolidatedMention],
    ) -> PipelineResult<()> {
        self.write_jsonl(Artifact::Consolidated(kind), batch, rows)
    }

    pub fn load_consolidated(
        &self,
        kind: EntityKind,
        batch: &BatchId,
    ) -> PipelineResult<Vec<ConsolidatedMention>> {
        self.read_jsonl(Artifact::Consolidated(kind), batch)
    }

    pub fn save_summary(
        &self,
        kind: EntityKind,
        batch: &BatchId,
        rows: &[AggregateRow],
    ) -> PipelineResult<()> {
        self.write_jsonl(Artifact::Summary(kind), batch, rows)
    }

    pub fn load_summary(
        &self,
        kind: EntityKind,
        batch: &BatchId,
    ) -> PipelineResult<Vec<AggregateRow>> {
        self.read_jsonl(Artifact::Summary(kind), batch)
    }

    pub fn save_subthemes(
        &self,
        kind: EntityKind,
        batch: &BatchId,
        rows: &[SubthemeRow],
    ) -> PipelineResult<()> {
        self.write_jsonl(Artifact::Subthemes(kind), batch, rows)
    }

    pub fn load_subthemes(
        &self,
        kind: EntityKind,
        batch: &BatchId,
    ) -> PipelineResult<Vec<SubthemeRow>> {
        self.read_jsonl(Artifact::Subthemes(kind), batch)
    }

    pub fn save_cooccurrence(
        &self,
        batch: &BatchId,
        rows: &[CooccurrenceRow],
    ) -> PipelineResult<()> {
        self.write_jsonl(Artifact::Cooccur, batch, rows)
    }

    pub fn load_cooccurrence(&self, batch: &BatchId) -> PipelineResult<Vec<CooccurrenceRow>> {
        self.read_jsonl(Artifact::Cooccur, batch)
    }

    pub fn save_quality(&self, batch: &BatchId, report: &QualityReport) -> PipelineResult<()> {
        let body = serde_json::to_vec_pretty(report).map_err(|e| StoreError::CorruptRecord {
            path: Artifact::Quality.file_name(batch),
            line: 0,
            reason: e.to_string(),
        })?;
        self.write_atomic(Artifact::Quality, batch, &body)
    }

    pub fn load_quality(&self, batch: &BatchId) -> PipelineResult<QualityReport> {
        let path = self.path(Artifact::Quality, batch);
        let raw = fs::read_to_string(&path).map_err(|_| StoreError::ArtifactMissing {
            artifact: Artifact::Quality.to_string(),
            batch: batch.to_string(),
        })?;
        let report = serde_json::from_str(&raw).map_err(|e| StoreError::CorruptRecord {
            path: path.display().to_string(),
            line: 0,
            reason: e.to_string(),
        })?;
        Ok(report)
    }

    // -- generic JSONL plumbing --------------------------------------------

    fn write_jsonl<T: Serialize>(
        &self,
        artifact: Artifact,
        batch: &BatchId,
        rows: &[T],
    ) -> PipelineResult<()> {
        let mut body = Vec::new();
        for row in rows {
            serde_json::to_writer(&mut body, row).map_err(|e| StoreError::CorruptRecord {
                path: artifact.file_name(batch),
                line: 0,
                reason: e.to_string(),
            })?;
            body.push(b'\n');
        }
        self.write_atomic(artifact, batch, &body)?;
        debug!(%artifact, %batch, rows = rows.len(), "artifact written");
        Ok(())
    }

    fn read_jsonl<T: DeserializeOwned>(
        &self,
        artifact: Artifact,
        batch: &BatchId,
    ) -> PipelineResult<Vec<T>> {
        let path = self.path(artifact, batch);
        let file = fs::File::open(&path).map_err(|_| StoreError::ArtifactMissing {
            artifact: artifact.to_string(),
            batch: batch.to_string(),
        })?;
        let reader = BufReader::new(file);
        let mut rows = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| StoreError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let row = serde_json::from_str(&line).map_err(|e| StoreError::CorruptRecord {
                path: path.display().to_string(),
                line: idx + 1,
                reason: e.to_string(),
            })?;
            rows.push(row);
        }
        Ok(rows)
    }

    /// Write to a temp file in the warehouse root, then rename into place.
    fn write_atomic(&self, artifact: Artifact, batch: &BatchId, body: &[u8]) -> PipelineResult<()> {
        let path = self.path(artifact, batch);
        let tmp = path.with_extension("tmp");
        let io_err = |e: std::io::Error| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        };
        let mut file = fs::File::create(&tmp).map_err(io_err)?;
        file.write_all(body).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }
}
