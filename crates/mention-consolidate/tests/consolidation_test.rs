//! Consolidation over the shared canonical map fixtures.

use mention_core::{EntityKind, LabelType};
use mention_consolidate::consolidate_kind;
use test_fixtures::{mention, problems_map, signals_map};

#[test]
fn problems_join_onto_the_problems_map() {
    let mentions = vec![
        mention("d1").build(),
        mention("d2")
            .theme("продвижение")
            .subtheme("высокая стоимость")
            .quote("это дорого")
            .build(),
    ];
    let outcome = consolidate_kind(EntityKind::Problems, &mentions, &problems_map()).unwrap();

    assert_eq!(outcome.rows.len(), 2);
    assert_eq!(outcome.rows[0].canonical_id, "delivery_selective");
    assert_eq!(outcome.rows[1].canonical_id, "promo_cost");
    assert_eq!(outcome.diagnostics.matched_keys, outcome.diagnostics.distinct_keys);
}

#[test]
fn signals_ignore_barrier_mentions() {
    let mentions = vec![
        mention("d1").build(), // barrier
        mention("d1")
            .turn(2)
            .theme("поддержка")
            .subtheme("обращался — не помогло")
            .label_type(LabelType::Signal)
            .quote("писал в поддержку, всё без результата")
            .build(),
    ];
    let outcome = consolidate_kind(EntityKind::Signals, &mentions, &signals_map()).unwrap();

    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.rows[0].canonical_id, "support_unresolved");
}

#[test]
fn unknown_pairs_land_in_the_default_bucket() {
    let mentions = vec![mention("d1")
        .theme("цены")
        .subtheme("фиксированная цена")
        .quote("почему цена фиксированная")
        .build()];
    let outcome = consolidate_kind(EntityKind::Problems, &mentions, &problems_map()).unwrap();

    assert_eq!(outcome.rows.len(), 1);
    assert!(outcome.rows[0].is_unmapped());
    assert_eq!(outcome.diagnostics.matched_keys, 0);
}
