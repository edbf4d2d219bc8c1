//! The extraction engine: mode dispatch, classifier fan-out, and the
//! per-window failure policy.

use mention_core::errors::{ExtractError, PipelineResult};
use mention_core::traits::IClassifier;
use mention_core::{ExtractMode, ExtractorConfig, Mention, Taxonomy};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::rules::RuleSet;
use crate::schema;
use crate::windows::{client_windows, DialogWindow};

/// What one extraction pass produced, with its loss accounting.
#[derive(Debug, Default)]
pub struct ExtractOutcome {
    pub mentions: Vec<Mention>,
    /// Windows whose classifier call failed after retries. Each contributes
    /// zero mentions; the batch itself never fails for this.
    pub windows_failed: usize,
    /// Classifier candidates dropped by schema validation.
    pub candidates_dropped: usize,
}

/// Mention extractor over a validated taxonomy.
pub struct Extractor {
    taxonomy: Taxonomy,
    config: ExtractorConfig,
    rules: RuleSet,
    classifier: Option<Box<dyn IClassifier>>,
}

impl Extractor {
    /// Build an extractor. The taxonomy is validated up front: an empty
    /// one is batch-fatal. Classifier mode without a classifier is a
    /// configuration error.
    pub fn new(
        taxonomy: Taxonomy,
        config: ExtractorConfig,
        classifier: Option<Box<dyn IClassifier>>,
    ) -> PipelineResult<Self> {
        taxonomy.validate()?;
        if config.mode == ExtractMode::Classifier && classifier.is_none() {
            return Err(ExtractError::ClassifierNotConfigured.into());
        }
        Ok(Self {
            taxonomy,
            config,
            rules: RuleSet::default(),
            classifier,
        })
    }

    /// Replace the built-in rule set.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Run extraction over a batch of utterances.
    pub fn extract(
        &self,
        utterances: &[mention_core::Utterance],
    ) -> PipelineResult<ExtractOutcome> {
        let outcome = match self.config.mode {
            ExtractMode::Rules => self.extract_with_rules(utterances),
            ExtractMode::Classifier => self.extract_with_classifier(utterances)?,
        };
        info!(
            mode = ?self.config.mode,
            mentions = outcome.mentions.len(),
            windows_failed = outcome.windows_failed,
            candidates_dropped = outcome.candidates_dropped,
            "extraction finished"
        );
        Ok(outcome)
    }

    fn extract_with_rules(&self, utterances: &[mention_core::Utterance]) -> ExtractOutcome {
        let mentions = utterances
            .iter()
            .filter_map(|u| self.rules.apply(u))
            .collect();
        ExtractOutcome {
            mentions,
            ..Default::default()
        }
    }

    fn extract_with_classifier(
        &self,
        utterances: &[mention_core::Utterance],
    ) -> PipelineResult<ExtractOutcome> {
        // new() guarantees presence in classifier mode
        let classifier = self
            .classifier
            .as_deref()
            .ok_or(ExtractError::ClassifierNotConfigured)?;

        let windows: Vec<DialogWindow> = client_windows(utterances)
            .into_iter()
            .filter(|w| !w.is_empty())
            .collect();
        info!(
            windows = windows.len(),
            workers = self.config.classifier_workers,
            classifier = classifier.name(),
            "dispatching dialog windows"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.classifier_workers.max(1))
            .build()
            .map_err(|e| ExtractError::ClassifierCall {
                reason: format!("failed to build worker pool: {e}"),
            })?;

        let per_window: Vec<(Vec<Mention>, usize, bool)> = pool.install(|| {
            windows
                .par_iter()
                .map(|window| match classifier.classify(&window.client_text(), &self.taxonomy) {
                    Ok(candidates) => {
                        let batch =
                            schema::validate_batch(&window.dialog_id, &self.taxonomy, &candidates);
                        (batch.mentions, batch.dropped, false)
                    }
                    Err(e) => {
                        warn!(
                            dialog_id = %window.dialog_id,
                            error = %e,
                            "classifier gave up on window, emitting zero mentions"
                        );
                        (Vec::new(), 0, true)
                    }
                })
                .collect()
        });

        let mut outcome = ExtractOutcome::default();
        for (mentions, dropped, failed) in per_window {
            outcome.mentions.extend(mentions);
            outcome.candidates_dropped += dropped;
            outcome.windows_failed += usize::from(failed);
        }
        Ok(outcome)
    }
}
