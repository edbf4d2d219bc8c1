//! # mention-quality
//!
//! Computes the batch quality report and the single pass/fail verdict.
//! Failure never deletes or rolls back data — the report is the artifact
//! downstream release decisions consume.

mod gate;
mod recommendations;

pub use gate::{QualityGate, QualityInput};
pub use recommendations::recommendations;
