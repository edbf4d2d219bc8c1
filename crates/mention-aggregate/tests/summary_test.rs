//! Aggregation over shared consolidated-mention fixtures.

use mention_aggregate::{subtheme_breakdown, summarize};
use test_fixtures::mention;

#[test]
fn summary_over_a_mixed_batch() {
    let rows = vec![
        mention("d1").consolidated("delivery_selective", "Доставка работает выборочно"),
        mention("d2").consolidated("delivery_selective", "Доставка работает выборочно"),
        mention("d2")
            .turn(3)
            .consolidated("delivery_selective", "Доставка работает выборочно"),
        mention("d3")
            .theme("продвижение")
            .subtheme("высокая стоимость")
            .consolidated("promo_cost", "Продвижение дорого"),
    ];
    let summary = summarize(&rows, 4);

    assert_eq!(summary.len(), 2);
    let delivery = &summary[0];
    assert_eq!(delivery.canonical_id, "delivery_selective");
    assert_eq!(delivery.dialogs, 2);
    assert_eq!(delivery.mentions, 3);
    assert_eq!(delivery.share_dialogs_pct, 50.0);
    assert_eq!(delivery.freq_per_1k, 500.0);
    assert_eq!(delivery.intensity_mpd, 1.5);
}

#[test]
fn breakdown_groups_by_subtheme_within_an_entity() {
    let rows = vec![
        mention("d1").consolidated("delivery_selective", "Доставка работает выборочно"),
        mention("d2")
            .subtheme("регион/покрытие")
            .consolidated("delivery_selective", "Доставка работает выборочно"),
        mention("d3")
            .subtheme("регион/покрытие")
            .consolidated("delivery_selective", "Доставка работает выборочно"),
    ];
    let breakdown = subtheme_breakdown(&rows);

    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].subtheme, "регион/покрытие");
    assert_eq!(breakdown[0].dialogs, 2);
    assert_eq!(breakdown[1].subtheme, "не работает выборочно");
    assert_eq!(breakdown[1].dialogs, 1);
}
