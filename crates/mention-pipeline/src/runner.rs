//! The stage runner: fixed order, dependency gating, persisted handoffs.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use tracing::{error, info, warn};

use mention_core::errors::PipelineResult;
use mention_core::traits::{IClassifier, IDedupStrategy, IEmbeddingProvider};
use mention_core::{BatchId, CanonicalMap, EntityKind, PipelineConfig, QualityReport, Taxonomy};
use mention_dedup::{run_dedup, strategy_for};
use mention_extract::Extractor;
use mention_normalize::{normalize_batch, QuoteSanitizer};
use mention_quality::{QualityGate, QualityInput};
use mention_store::{Artifact, BatchStore};

use crate::report::{RunReport, Stage, StageStatus};
use crate::source::DialogSource;

/// Assembles a [`PipelineRunner`]. Canonical maps are registered per kind;
/// a kind without a map fails at consolidation time, not at build time,
/// so partial map sets are usable.
pub struct RunnerBuilder {
    config: PipelineConfig,
    taxonomy: Taxonomy,
    maps: HashMap<EntityKind, CanonicalMap>,
    classifier: Option<Box<dyn IClassifier>>,
    embedder: Option<Box<dyn IEmbeddingProvider>>,
}

impl RunnerBuilder {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            config: PipelineConfig::default(),
            taxonomy,
            maps: HashMap::new(),
            classifier: None,
            embedder: None,
        }
    }

    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn map(mut self, kind: EntityKind, map: CanonicalMap) -> Self {
        self.maps.insert(kind, map);
        self
    }

    pub fn classifier(mut self, classifier: Box<dyn IClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn embedder(mut self, embedder: Box<dyn IEmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Validate the configuration and bind the runner to a warehouse.
    pub fn build(self, store: BatchStore) -> PipelineResult<PipelineRunner> {
        let extractor = Extractor::new(self.taxonomy, self.config.extractor.clone(), self.classifier)?;
        let dedup = strategy_for(&self.config.dedup, self.embedder);
        let gate = QualityGate::new(self.config.quality.clone());
        Ok(PipelineRunner {
            store,
            extractor,
            sanitizer: QuoteSanitizer::new(),
            dedup,
            maps: self.maps,
            gate,
            warn_rate: self.config.dedup.warn_rate,
        })
    }
}

/// Runs the six stages for one batch, persisting every stage's output.
pub struct PipelineRunner {
    store: BatchStore,
    extractor: Extractor,
    sanitizer: QuoteSanitizer,
    dedup: Box<dyn IDedupStrategy>,
    maps: HashMap<EntityKind, CanonicalMap>,
    gate: QualityGate,
    warn_rate: f64,
}

impl PipelineRunner {
    pub fn builder(taxonomy: Taxonomy) -> RunnerBuilder {
        RunnerBuilder::new(taxonomy)
    }

    pub fn store(&self) -> &BatchStore {
        &self.store
    }

    /// Run the full pipeline for one batch. Stage failures are captured in
    /// the report and skip everything downstream; this never panics and
    /// never returns `Err` for a stage-level failure.
    pub fn run(&self, source: &DialogSource, batch: &BatchId) -> RunReport {
        let started_at = Utc::now();
        info!(%batch, source = source.kind(), "pipeline run starting");

        let mut stages: Vec<(Stage, StageStatus)> = Vec::new();
        let mut kind_errors: Vec<(String, String)> = Vec::new();
        let mut quality: Option<QualityReport> = None;
        let mut dedup_rate = 0.0;
        let mut blocked_by: Option<Stage> = None;

        for stage in Stage::ORDER {
            if let Some(failed) = blocked_by {
                stages.push((
                    stage,
                    StageStatus::Skipped {
                        reason: format!("upstream {failed} failed"),
                    },
                ));
                continue;
            }

            let result = match stage {
                Stage::Extract => self.stage_extract(source, batch),
                Stage::Normalize => self.stage_normalize(batch),
                Stage::Dedup => self.stage_dedup(batch).map(|rate| dedup_rate = rate),
                Stage::Consolidate => self.stage_consolidate(batch, &mut kind_errors),
                Stage::Aggregate => self.stage_aggregate(batch),
                Stage::Quality => self
                    .stage_quality(batch, dedup_rate)
                    .map(|report| quality = Some(report)),
            };

            match result {
                Ok(()) => {
                    info!(%batch, %stage, "stage completed");
                    stages.push((stage, StageStatus::Completed));
                }
                Err(e) => {
                    error!(%batch, %stage, error = %e, "stage failed");
                    stages.push((
                        stage,
                        StageStatus::Failed {
                            error: e.to_string(),
                        },
                    ));
                    blocked_by = Some(stage);
                }
            }
        }

        let report = RunReport {
            batch: batch.clone(),
            stages,
            kind_errors,
            quality,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            %batch,
            all_completed = report.all_completed(),
            passed = report.quality.as_ref().map(|q| q.passed),
            "pipeline run finished"
        );
        report
    }

    fn stage_extract(&self, source: &DialogSource, batch: &BatchId) -> PipelineResult<()> {
        let utterances = source.load(&self.store)?;
        self.store.save_utterances(batch, &utterances)?;
        let outcome = self.extractor.extract(&utterances)?;
        self.store
            .save_mentions(Artifact::Mentions, batch, &outcome.mentions)
    }

    fn stage_normalize(&self, batch: &BatchId) -> PipelineResult<()> {
        let mut mentions = self.store.load_mentions(Artifact::Mentions, batch)?;
        let stats = normalize_batch(&mut mentions, &self.sanitizer)?;
        info!(
            %batch,
            quotes_changed = stats.quotes_changed,
            redactions = stats.redactions,
            "quotes normalized"
        );
        self.store
            .save_mentions(Artifact::MentionsNorm, batch, &mentions)
    }

    fn stage_dedup(&self, batch: &BatchId) -> PipelineResult<f64> {
        let mentions = self.store.load_mentions(Artifact::MentionsNorm, batch)?;
        let outcome = run_dedup(self.dedup.as_ref(), mentions, self.warn_rate)?;
        self.store
            .save_mentions(Artifact::MentionsFinal, batch, &outcome.kept)?;
        Ok(outcome.rate)
    }

    fn stage_consolidate(
        &self,
        batch: &BatchId,
        kind_errors: &mut Vec<(String, String)>,
    ) -> PipelineResult<()> {
        let mentions = self.store.load_mentions(Artifact::MentionsFinal, batch)?;
        for kind in EntityKind::ALL {
            match self.maps.get(&kind) {
                Some(map) => {
                    let outcome = mention_consolidate::consolidate_kind(kind, &mentions, map)?;
                    self.store.save_consolidated(kind, batch, &outcome.rows)?;
                }
                None => {
                    // This kind fails with empty output; the others proceed.
                    warn!(%batch, %kind, "no canonical map registered for kind");
                    kind_errors.push((
                        kind.to_string(),
                        "no canonical map registered".to_string(),
                    ));
                    self.store.save_consolidated(kind, batch, &[])?;
                }
            }
        }
        Ok(())
    }

    fn stage_aggregate(&self, batch: &BatchId) -> PipelineResult<()> {
        let utterances = self.store.load_utterances(batch)?;
        let total_dialogs = utterances
            .iter()
            .map(|u| u.dialog_id.as_str())
            .collect::<HashSet<_>>()
            .len() as u64;

        for kind in EntityKind::ALL {
            let rows = self.store.load_consolidated(kind, batch)?;
            let summary = mention_aggregate::summarize(&rows, total_dialogs);
            self.store.save_summary(kind, batch, &summary)?;
            let breakdown = mention_aggregate::subtheme_breakdown(&rows);
            self.store.save_subthemes(kind, batch, &breakdown)?;
        }

        // Theme pairs are batch-level, over the deduplicated mentions.
        let final_mentions = self.store.load_mentions(Artifact::MentionsFinal, batch)?;
        let pairs = mention_aggregate::theme_cooccurrence(&final_mentions);
        self.store.save_cooccurrence(batch, &pairs)?;
        Ok(())
    }

    fn stage_quality(&self, batch: &BatchId, dedup_rate: f64) -> PipelineResult<QualityReport> {
        let utterances = self.store.load_utterances(batch)?;
        let mut mentions = Vec::new();
        for kind in EntityKind::ALL {
            mentions.extend(self.store.load_consolidated(kind, batch)?);
        }
        let report = self.gate.certify(&QualityInput {
            mentions: &mentions,
            utterances: &utterances,
            dedup_rate,
        })?;
        self.store.save_quality(batch, &report)?;
        Ok(report)
    }
}
