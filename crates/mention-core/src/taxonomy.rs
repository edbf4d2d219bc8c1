//! Two-level theme/subtheme taxonomy.
//!
//! Externally authored TOML document enumerating valid themes, their
//! subthemes, and limits. Required by the Extractor; the QualityGate uses it
//! for the coverage check.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{ExtractError, PipelineResult};

/// One theme with its subthemes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSpec {
    pub name: String,
    #[serde(default)]
    pub subthemes: Vec<String>,
}

/// The full taxonomy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(default)]
    pub themes: Vec<ThemeSpec>,
    /// Maximum number of subthemes allowed per theme.
    #[serde(default = "default_max_subthemes")]
    pub max_subthemes: usize,
}

fn default_max_subthemes() -> usize {
    12
}

impl Taxonomy {
    /// Load from a TOML file. Missing file or parse failure is fatal.
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|_| ExtractError::TaxonomyNotFound {
            path: path.display().to_string(),
        })?;
        let tax: Taxonomy = toml::from_str(&raw).map_err(|e| ExtractError::TaxonomyParse {
            reason: e.to_string(),
        })?;
        tax.validate()?;
        Ok(tax)
    }

    /// An empty taxonomy is fatal: the extractor has no vocabulary to
    /// classify into.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.themes.is_empty() {
            return Err(ExtractError::EmptyTaxonomy.into());
        }
        for theme in &self.themes {
            if theme.subthemes.len() > self.max_subthemes {
                return Err(ExtractError::TaxonomyParse {
                    reason: format!(
                        "theme `{}` has {} subthemes, limit is {}",
                        theme.name,
                        theme.subthemes.len(),
                        self.max_subthemes
                    ),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Case-insensitive theme membership check.
    pub fn contains_theme(&self, theme: &str) -> bool {
        let needle = theme.trim().to_lowercase();
        self.themes
            .iter()
            .any(|t| t.name.trim().to_lowercase() == needle)
    }

    /// Valid `(theme, subtheme)` pair check; an empty subtheme is accepted
    /// for any known theme.
    pub fn contains_pair(&self, theme: &str, subtheme: &str) -> bool {
        let theme_needle = theme.trim().to_lowercase();
        let sub_needle = subtheme.trim().to_lowercase();
        self.themes.iter().any(|t| {
            t.name.trim().to_lowercase() == theme_needle
                && (sub_needle.is_empty()
                    || t.subthemes
                        .iter()
                        .any(|s| s.trim().to_lowercase() == sub_needle))
        })
    }

    /// Theme names, lowercased, for prompt construction and coverage checks.
    pub fn theme_names(&self) -> Vec<String> {
        self.themes
            .iter()
            .map(|t| t.name.trim().to_lowercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Taxonomy {
        toml::from_str(
            r#"
            max_subthemes = 4

            [[themes]]
            name = "доставка"
            subthemes = ["не работает выборочно", "регион/покрытие"]

            [[themes]]
            name = "поддержка"
            subthemes = ["обращался — не помогло"]
            "#,
        )
        .unwrap()
    }

    #[test]
    fn empty_taxonomy_is_fatal() {
        let tax = Taxonomy {
            themes: vec![],
            max_subthemes: 12,
        };
        assert!(tax.validate().is_err());
    }

    #[test]
    fn subtheme_limit_enforced() {
        let mut tax = sample();
        tax.max_subthemes = 1;
        assert!(tax.validate().is_err());
    }

    #[test]
    fn membership_is_case_insensitive() {
        let tax = sample();
        assert!(tax.contains_theme("Доставка"));
        assert!(!tax.contains_theme("прочее"));
        assert!(tax.contains_pair("доставка", "регион/покрытие"));
        assert!(tax.contains_pair("доставка", ""));
        assert!(!tax.contains_pair("доставка", "нет такой"));
    }
}
