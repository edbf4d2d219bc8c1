//! # mention-consolidate
//!
//! Joins raw mentions onto canonical entities via the declarative maps.
//! One kind (problems / ideas / signals) is processed at a time; the
//! mention's label type selects which map applies. Unmatched mentions land
//! in the `other_unmapped` bucket — every mention ends up attributed.

mod engine;
mod keys;

pub use engine::{consolidate_kind, ConsolidationDiagnostics, Consolidator, KindOutcome};
pub use keys::normalize_key;
