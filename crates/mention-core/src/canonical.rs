//! Canonical entity maps: declarative documents joining raw
//! `(theme, subtheme)` pairs onto business-meaningful entities.
//!
//! One map per entity kind (problems / ideas / signals); read-only input to
//! the Consolidator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::errors::{ConsolidateError, PipelineResult};
use crate::mention::LabelType;

/// Which canonical map a mention joins against, selected by its label type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Problems,
    Ideas,
    Signals,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Problems, EntityKind::Ideas, EntityKind::Signals];

    /// The label type this kind consolidates.
    pub fn label_type(self) -> LabelType {
        match self {
            EntityKind::Problems => LabelType::Barrier,
            EntityKind::Ideas => LabelType::Idea,
            EntityKind::Signals => LabelType::Signal,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Problems => write!(f, "problems"),
            EntityKind::Ideas => write!(f, "ideas"),
            EntityKind::Signals => write!(f, "signals"),
        }
    }
}

/// A raw `(theme, subtheme)` pair an entity matches on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchKey {
    pub theme: String,
    #[serde(default)]
    pub subtheme: String,
}

/// One canonical entity with its match list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalMapEntry {
    pub id: String,
    pub title: String,
    #[serde(rename = "match")]
    pub matches: Vec<MatchKey>,
}

/// The full map document for one entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalMap {
    #[serde(default)]
    pub entries: Vec<CanonicalMapEntry>,
}

impl CanonicalMap {
    /// Load from a TOML file. A missing or empty map is fatal for the kind
    /// that requested it.
    pub fn load(kind: EntityKind, path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|_| ConsolidateError::MapNotFound {
            kind: kind.to_string(),
            path: path.display().to_string(),
        })?;
        let map: CanonicalMap =
            toml::from_str(&raw).map_err(|e| ConsolidateError::MapParse {
                kind: kind.to_string(),
                reason: e.to_string(),
            })?;
        if map.entries.is_empty() {
            return Err(ConsolidateError::EmptyMap {
                kind: kind.to_string(),
            }
            .into());
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_selects_label_type() {
        assert_eq!(EntityKind::Problems.label_type(), LabelType::Barrier);
        assert_eq!(EntityKind::Ideas.label_type(), LabelType::Idea);
        assert_eq!(EntityKind::Signals.label_type(), LabelType::Signal);
    }

    #[test]
    fn map_parses_match_list() {
        let map: CanonicalMap = toml::from_str(
            r#"
            [[entries]]
            id = "delivery_selective"
            title = "Доставка работает выборочно"

            [[entries.match]]
            theme = "доставка"
            subtheme = "не работает выборочно"

            [[entries.match]]
            theme = "доставка"
            subtheme = "регион/покрытие"
            "#,
        )
        .unwrap();
        assert_eq!(map.entries.len(), 1);
        assert_eq!(map.entries[0].matches.len(), 2);
    }
}
