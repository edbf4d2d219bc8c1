//! # mention-normalize
//!
//! Quote normalization: masks PII in `text_quote` before deduplication so
//! duplicate detection operates on redacted text. No other field is mutated.

mod engine;
pub mod patterns;

pub use engine::{normalize_batch, NormalizeStats, QuoteSanitizer};
