//! Scope behavior of exact-hash dedup over the shared sample mentions.

use mention_core::config::DedupScope;
use mention_core::traits::IDedupStrategy;
use mention_dedup::ExactHashStrategy;
use test_fixtures::mention;

#[test]
fn strict_scope_keeps_identical_quotes_from_different_dialogs() {
    let mentions = vec![
        mention("d1").build(),
        mention("d2").build(), // same quote, different dialog
    ];
    let outcome = ExactHashStrategy::new(DedupScope::Strict)
        .dedup(mentions)
        .unwrap();
    assert_eq!(outcome.kept.len(), 2);
    assert_eq!(outcome.removed, 0);
}

#[test]
fn cross_dialog_scope_collapses_them() {
    let mentions = vec![mention("d1").build(), mention("d2").build()];
    let outcome = ExactHashStrategy::new(DedupScope::CrossDialog)
        .dedup(mentions)
        .unwrap();
    assert_eq!(outcome.kept.len(), 1);
    // first seen wins
    assert_eq!(outcome.kept[0].dialog_id, "d1");
}

#[test]
fn differing_subthemes_are_never_collapsed() {
    let mentions = vec![
        mention("d1").subtheme("не работает выборочно").build(),
        mention("d1").subtheme("регион/покрытие").build(),
    ];
    let outcome = ExactHashStrategy::new(DedupScope::CrossDialog)
        .dedup(mentions)
        .unwrap();
    assert_eq!(outcome.kept.len(), 2);
}
