use std::collections::{HashMap, HashSet};

use mention_core::canonical::{CanonicalMap, EntityKind};
use mention_core::constants::{OTHER_UNMAPPED_ID, OTHER_UNMAPPED_TITLE};
use mention_core::errors::PipelineResult;
use mention_core::{ConsolidatedMention, Mention};
use tracing::{info, warn};

use crate::keys::pair_key;

/// Advisory join diagnostics for taxonomy-map maintenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidationDiagnostics {
    /// Distinct normalized `(theme, subtheme)` pairs seen in the input.
    pub distinct_keys: usize,
    /// How many of those found a map entry.
    pub matched_keys: usize,
    /// `matched_keys / distinct_keys`, 1.0 for an empty input.
    pub match_rate: f64,
}

/// Result of consolidating one entity kind.
#[derive(Debug, Clone)]
pub struct KindOutcome {
    pub kind: EntityKind,
    pub rows: Vec<ConsolidatedMention>,
    pub diagnostics: ConsolidationDiagnostics,
}

/// One consolidator behind a single configuration — the normalized lookup
/// is built once per map and reused for every mention of the kind.
pub struct Consolidator {
    lookup: HashMap<(String, String), (String, String)>,
}

impl Consolidator {
    /// Flatten a canonical map's match lists into the normalized lookup.
    /// Earlier entries win on key collisions (maps are ordered documents).
    pub fn from_map(map: &CanonicalMap) -> Self {
        let mut lookup = HashMap::new();
        for entry in &map.entries {
            for m in &entry.matches {
                lookup
                    .entry(pair_key(&m.theme, &m.subtheme))
                    .or_insert_with(|| (entry.id.clone(), entry.title.clone()));
            }
        }
        Self { lookup }
    }

    /// Left join one mention against the lookup.
    pub fn resolve(&self, mention: &Mention) -> (String, String) {
        self.lookup
            .get(&pair_key(&mention.theme, &mention.subtheme))
            .cloned()
            .unwrap_or_else(|| {
                (
                    OTHER_UNMAPPED_ID.to_string(),
                    OTHER_UNMAPPED_TITLE.to_string(),
                )
            })
    }
}

/// Consolidate the mentions of one entity kind.
///
/// Mentions whose label type does not match the kind are ignored; the rest
/// are left-joined, defaulting to the `other_unmapped` bucket. The match
/// rate over distinct keys is logged and returned, advisory only.
pub fn consolidate_kind(
    kind: EntityKind,
    mentions: &[Mention],
    map: &CanonicalMap,
) -> PipelineResult<KindOutcome> {
    let consolidator = Consolidator::from_map(map);
    let label = kind.label_type();

    let mut rows = Vec::new();
    let mut seen_keys: HashSet<(String, String)> = HashSet::new();
    let mut matched_keys: HashSet<(String, String)> = HashSet::new();

    for mention in mentions.iter().filter(|m| m.label_type == label) {
        let key = pair_key(&mention.theme, &mention.subtheme);
        let (canonical_id, canonical_title) = consolidator.resolve(mention);
        if canonical_id != OTHER_UNMAPPED_ID {
            matched_keys.insert(key.clone());
        }
        seen_keys.insert(key);
        rows.push(ConsolidatedMention {
            mention: mention.clone(),
            canonical_id,
            canonical_title,
        });
    }

    let distinct = seen_keys.len();
    let matched = matched_keys.len();
    let match_rate = if distinct == 0 {
        1.0
    } else {
        matched as f64 / distinct as f64
    };

    info!(
        kind = %kind,
        rows = rows.len(),
        distinct_keys = distinct,
        matched_keys = matched,
        match_rate,
        "consolidation complete"
    );
    if match_rate < 1.0 {
        warn!(
            kind = %kind,
            unmatched = distinct - matched,
            "some (theme, subtheme) keys have no canonical map entry"
        );
    }

    Ok(KindOutcome {
        kind,
        rows,
        diagnostics: ConsolidationDiagnostics {
            distinct_keys: distinct,
            matched_keys: matched,
            match_rate,
        },
    })
}
