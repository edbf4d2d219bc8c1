//! # mention-extract
//!
//! Turns client utterances into candidate mentions. Two modes behind one
//! engine, selected by configuration:
//!
//! - rule mode: an ordered regex rule list, first match wins;
//! - classifier mode: per-dialog windows of client turns sent to an
//!   external LLM classifier, responses validated against the mention
//!   schema.
//!
//! Only `role = client` utterances ever produce mentions. A missing or
//! empty taxonomy is fatal; a single failed classifier call is not.

mod classifier;
mod engine;
pub mod rules;
pub mod schema;
pub mod windows;

pub use classifier::HttpClassifier;
pub use engine::{Extractor, ExtractOutcome};
pub use rules::{default_rules, ExtractionRule, RuleSet};
pub use windows::{client_windows, DialogWindow};
