use timeline_chart::core::{default_max_ticks, tick_indices, tick_stride};

#[test]
fn default_budget_depends_on_width() {
    assert_eq!(default_max_ticks(320.0), 6);
    assert_eq!(default_max_ticks(449.9), 6);
    assert_eq!(default_max_ticks(450.0), 8);
    assert_eq!(default_max_ticks(899.0), 8);
    assert_eq!(default_max_ticks(900.0), 12);
}

#[test]
fn thirty_points_at_460px_tick_every_fifth() {
    let stride = tick_stride(30, default_max_ticks(460.0));
    assert_eq!(stride, 5);
    assert_eq!(tick_indices(30, stride), vec![0, 5, 10, 15, 20, 25]);
}

#[test]
fn ninety_points_on_wide_chart() {
    // 90 / 9 = 10 < 12, and no smaller factor qualifies (90 / 6 = 15).
    assert_eq!(tick_stride(90, 12), 9);
}

#[test]
fn empty_dataset_has_unit_stride() {
    assert_eq!(tick_stride(0, 8), 1);
    assert!(tick_indices(0, 1).is_empty());
}
