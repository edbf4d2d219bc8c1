//! Per-run execution report.

use chrono::{DateTime, Utc};
use mention_core::{BatchId, QualityReport};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Extract,
    Normalize,
    Dedup,
    Consolidate,
    Aggregate,
    Quality,
}

impl Stage {
    pub const ORDER: [Stage; 6] = [
        Stage::Extract,
        Stage::Normalize,
        Stage::Dedup,
        Stage::Consolidate,
        Stage::Aggregate,
        Stage::Quality,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extract => write!(f, "extract"),
            Stage::Normalize => write!(f, "normalize"),
            Stage::Dedup => write!(f, "dedup"),
            Stage::Consolidate => write!(f, "consolidate"),
            Stage::Aggregate => write!(f, "aggregate"),
            Stage::Quality => write!(f, "quality"),
        }
    }
}

/// How one stage ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StageStatus {
    Completed,
    Failed { error: String },
    Skipped { reason: String },
}

impl StageStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, StageStatus::Completed)
    }
}

/// Everything one pipeline run produced, stage by stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub batch: BatchId,
    pub stages: Vec<(Stage, StageStatus)>,
    /// Per-kind consolidation errors (a missing map fails one kind, not the
    /// stage).
    pub kind_errors: Vec<(String, String)>,
    /// Present when the quality stage ran.
    pub quality: Option<QualityReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn status(&self, stage: Stage) -> Option<&StageStatus> {
        self.stages.iter().find(|(s, _)| *s == stage).map(|(_, st)| st)
    }

    /// True when every stage completed.
    pub fn all_completed(&self) -> bool {
        self.stages.len() == Stage::ORDER.len()
            && self.stages.iter().all(|(_, st)| st.is_completed())
    }
}
