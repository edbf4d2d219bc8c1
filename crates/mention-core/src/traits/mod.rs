//! Seam traits implemented by the stage crates.
//!
//! External collaborators (embedding and classification services) are
//! specified here at their interface boundary only — the pipeline treats
//! their outputs as opaque.

mod classifier;
mod dedup;
mod embedding;
mod sanitizer;

pub use classifier::IClassifier;
pub use dedup::{DedupOutcome, IDedupStrategy};
pub use embedding::IEmbeddingProvider;
pub use sanitizer::{ISanitizer, Redaction, SanitizedText};
