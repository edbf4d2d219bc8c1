//! Remediation hints derived from a quality report.

use mention_core::config::QualityConfig;
use mention_core::QualityReport;

/// Human-readable recommendations for the failing (or warning) metrics.
/// An empty list means nothing needs attention.
pub fn recommendations(report: &QualityReport, config: &QualityConfig) -> Vec<String> {
    let mut out = Vec::new();

    if !report.evidence_100 {
        out.push("fix mentions with empty quotes: every mention needs verbatim evidence".to_string());
    }
    if !report.client_only_100 {
        out.push("extraction is picking up non-client turns: restrict input to role=client".to_string());
    }
    if !report.schema_valid_100 {
        out.push("some mentions are missing required fields: check extractor output validation".to_string());
    }
    if report.dedup_rate > config.dedup_max {
        out.push(format!(
            "dedup rate {:.1}% exceeds the {:.1}% ceiling: extraction is producing near-duplicates",
            report.dedup_rate * 100.0,
            config.dedup_max * 100.0
        ));
    }
    if report.coverage_other_pct > config.coverage_other_max {
        out.push(format!(
            "{:.1}% of dialogs fall outside the taxonomy (limit {:.1}%): extend the canonical maps",
            report.coverage_other_pct, config.coverage_other_max
        ));
    }
    if report.ambiguity_pct > config.ambiguity_max {
        out.push(format!(
            "{:.1}% of mentions are low-confidence: tighten extraction rules or prompts",
            report.ambiguity_pct
        ));
    }

    out
}
