use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use timeline_chart::core::{
    BandScale, Datum, TimeScale, XScale, nearest_index_by_date, resolve_nearest,
};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("base date")
}

fn daily(count: i64) -> Vec<Datum> {
    (0..count)
        .map(|i| Datum::new(base() + TimeDelta::days(i)).with_value("clicks", i as f64))
        .collect()
}

fn time_axis(data: &[Datum], width: f64) -> XScale {
    let first = data.first().expect("non-empty").date;
    let last = data.last().expect("non-empty").date;
    XScale::Time(TimeScale::new(first, last, width).expect("time scale"))
}

#[test]
fn candidate_two_and_three_days_away_picks_closer() {
    let data = vec![
        Datum::new(base()),
        Datum::new(base() + TimeDelta::days(5)),
    ];
    let candidate = base() + TimeDelta::days(2);
    assert_eq!(nearest_index_by_date(&data, candidate), Some(0));
    let candidate = base() + TimeDelta::days(3);
    assert_eq!(nearest_index_by_date(&data, candidate), Some(1));
}

#[test]
fn time_axis_pointer_snaps_to_nearest_day() {
    let data = daily(10);
    // Nine days across 900px: one day per 100px.
    let x_scale = time_axis(&data, 900.0);

    assert_eq!(resolve_nearest(&data, &x_scale, 420.0), Some(4));
    assert_eq!(resolve_nearest(&data, &x_scale, 460.0), Some(5));
    assert_eq!(resolve_nearest(&data, &x_scale, 0.0), Some(0));
    assert_eq!(resolve_nearest(&data, &x_scale, 900.0), Some(9));
}

#[test]
fn pointer_beyond_the_plot_clamps_to_edge_points() {
    let data = daily(10);
    let x_scale = time_axis(&data, 900.0);

    assert_eq!(resolve_nearest(&data, &x_scale, -100.0), Some(0));
    assert_eq!(resolve_nearest(&data, &x_scale, 2_000.0), Some(9));
}

#[test]
fn non_finite_pointer_resolves_to_nothing() {
    let data = daily(3);
    let x_scale = time_axis(&data, 300.0);
    assert_eq!(resolve_nearest(&data, &x_scale, f64::NAN), None);
}

#[test]
fn empty_dataset_resolves_to_nothing() {
    let data = daily(3);
    let x_scale = time_axis(&data, 300.0);
    assert_eq!(resolve_nearest(&[], &x_scale, 10.0), None);
}

#[test]
fn band_axis_resolves_by_slot() {
    let data = daily(4);
    let band = BandScale::new(data.iter().map(|d| d.date), 400.0, 0.0).expect("band scale");
    let x_scale = XScale::Band(band);

    assert_eq!(resolve_nearest(&data, &x_scale, 10.0), Some(0));
    assert_eq!(resolve_nearest(&data, &x_scale, 250.0), Some(2));
    assert_eq!(resolve_nearest(&data, &x_scale, 399.0), Some(3));
    assert_eq!(resolve_nearest(&data, &x_scale, -60.0), None);
    assert_eq!(resolve_nearest(&data, &x_scale, 460.0), None);
}

#[test]
fn band_left_edges_resolve_to_their_datum() {
    let data = daily(4);
    let padding = timeline_chart::core::band_padding_for(400.0, data.len());
    let band = BandScale::new(data.iter().map(|d| d.date), 400.0, padding).expect("band scale");
    let first_edge = band.position_at(0);
    let x_scale = XScale::Band(band);

    assert_eq!(resolve_nearest(&data, &x_scale, first_edge), Some(0));
    assert_eq!(resolve_nearest(&data, &x_scale, first_edge - 0.5), None);
}

#[test]
fn dense_band_axis_centres_match_slots() {
    let data = daily(10_000);
    let band = BandScale::new(data.iter().map(|d| d.date), 2_000.0, 0.0).expect("band scale");
    let expected = band.position_at(9_999) + band.bandwidth() / 2.0;
    let x_scale = XScale::Band(band);

    assert_eq!(x_scale.center_of(data[9_999].date), Some(expected));
    assert_eq!(resolve_nearest(&data, &x_scale, expected), Some(9_999));
}
