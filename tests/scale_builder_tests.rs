use approx::assert_abs_diff_eq;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use timeline_chart::ChartError;
use timeline_chart::core::{
    ChartKind, Datum, Padding, ScaleInput, Series, TimeScale, XScale, build_scales, date_extent,
};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).single().expect("base date") + TimeDelta::days(n)
}

fn dataset(values: &[f64]) -> Vec<Datum> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Datum::new(day(i as i64)).with_value("clicks", *v))
        .collect()
}

fn input<'a>(data: &'a [Datum], series: &'a [Series], kind: ChartKind) -> ScaleInput<'a> {
    ScaleInput {
        data,
        series,
        kind,
        width: 300.0,
        height: 200.0,
        padding: Padding::default(),
    }
}

#[test]
fn area_domain_pads_true_extent() {
    let data = dataset(&[10.0, 20.0, 30.0]);
    let series = vec![Series::from_key("clicks", "clicks")];
    let scales = build_scales(input(&data, &series, ChartKind::Area)).expect("scales");

    assert_eq!(scales.min_y, 10.0);
    assert_eq!(scales.max_y, 30.0);
    let (lo, hi) = scales.y.domain();
    assert_abs_diff_eq!(lo, 8.0, epsilon = 1e-9);
    assert_abs_diff_eq!(hi, 32.0, epsilon = 1e-9);
    assert_abs_diff_eq!(scales.y.map(hi), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(scales.y.map(lo), 200.0, epsilon = 1e-9);
    assert!(matches!(scales.x, XScale::Time(_)));
}

#[test]
fn bar_domain_anchors_at_zero() {
    let data = dataset(&[10.0, 20.0]);
    let series = vec![Series::from_key("clicks", "clicks")];
    let scales = build_scales(input(&data, &series, ChartKind::Bar)).expect("scales");

    assert_eq!(scales.min_y, 0.0);
    let (lo, hi) = scales.y.domain();
    assert_abs_diff_eq!(lo, -2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(hi, 22.0, epsilon = 1e-9);
    assert!(matches!(scales.x, XScale::Band(_)));
}

#[test]
fn single_point_produces_finite_scales() {
    let data = dataset(&[5.0]);
    let series = vec![Series::from_key("clicks", "clicks")];
    let scales = build_scales(input(&data, &series, ChartKind::Area)).expect("scales");

    let (lo, hi) = scales.y.domain();
    assert_abs_diff_eq!(lo, 4.5, epsilon = 1e-9);
    assert_abs_diff_eq!(hi, 5.5, epsilon = 1e-9);
    assert_abs_diff_eq!(scales.y.map(5.0), 100.0, epsilon = 1e-9);

    let x = scales.x.center_of(day(0)).expect("x");
    assert_abs_diff_eq!(x, 150.0, epsilon = 1e-9);
}

#[test]
fn missing_values_and_inactive_series_are_ignored() {
    let data = vec![
        Datum::new(day(0)).with_value("clicks", 1.0).with_value("leads", 500.0),
        Datum::new(day(1)).with_value("leads", 900.0),
        Datum::new(day(2)).with_value("clicks", 3.0).with_value("leads", 700.0),
    ];
    let series = vec![
        Series::from_key("clicks", "clicks"),
        Series::from_key("leads", "leads").with_active(false),
    ];
    let scales = build_scales(input(&data, &series, ChartKind::Area)).expect("scales");
    assert_eq!(scales.min_y, 1.0);
    assert_eq!(scales.max_y, 3.0);
}

#[test]
fn no_active_values_still_builds_a_domain() {
    let data = dataset(&[1.0, 2.0]);
    let series = vec![Series::from_key("clicks", "clicks").with_active(false)];
    let scales = build_scales(input(&data, &series, ChartKind::Area)).expect("scales");
    let (lo, hi) = scales.y.domain();
    assert!(lo.is_finite() && hi.is_finite() && lo < hi);
}

#[test]
fn date_extent_prefers_first_occurrence_on_ties() {
    let data = vec![
        Datum::new(day(1)).with_value("clicks", 1.0),
        Datum::new(day(1)).with_value("clicks", 2.0),
        Datum::new(day(3)).with_value("clicks", 3.0),
        Datum::new(day(3)).with_value("clicks", 4.0),
    ];
    let (start, end) = date_extent(&data).expect("extent");
    assert!(std::ptr::eq(start, &data[0]));
    assert!(std::ptr::eq(end, &data[2]));
}

#[test]
fn empty_dataset_is_rejected() {
    let series = vec![Series::from_key("clicks", "clicks")];
    let result = build_scales(input(&[], &series, ChartKind::Area));
    assert!(matches!(result, Err(ChartError::EmptyDataset)));
}

#[test]
fn band_padding_follows_point_density() {
    let values: Vec<f64> = (0..30).map(f64::from).collect();
    let data = dataset(&values);
    let series = vec![Series::from_key("clicks", "clicks")];
    let scales = build_scales(input(&data, &series, ChartKind::Bar)).expect("scales");

    let band = scales.x.as_band().expect("band scale");
    assert_abs_diff_eq!(band.padding(), 0.2, epsilon = 1e-12);
    assert_eq!(band.domain().len(), 30);
}

#[test]
fn scale_kind_mismatch_fails_fast() {
    let scale = XScale::Time(TimeScale::new(day(0), day(1), 100.0).expect("time scale"));
    let err = scale.as_band().expect_err("time scale is not a band scale");
    assert!(matches!(
        err,
        ChartError::ScaleKindMismatch {
            expected: "band",
            actual: "time"
        }
    ));
}

#[test]
fn time_scale_round_trips_dates() {
    let scale = TimeScale::new(day(0), day(10), 1000.0).expect("time scale");
    let px = scale.map(day(4));
    assert_abs_diff_eq!(px, 400.0, epsilon = 1e-6);
    assert_eq!(scale.invert(px), Some(day(4)));
    assert_eq!(scale.invert(f64::NAN), None);
}

#[test]
fn decimal_values_feed_the_value_domain() {
    use rust_decimal::Decimal;

    let data = vec![
        Datum::new(day(0))
            .with_decimal_value("revenue", Decimal::new(1_250, 2))
            .expect("decimal"),
        Datum::new(day(1))
            .with_decimal_value("revenue", Decimal::new(9_999, 2))
            .expect("decimal"),
    ];
    assert_eq!(data[0].value("revenue"), Some(12.5));

    let series = vec![Series::from_key("revenue", "revenue")];
    let scales = build_scales(input(&data, &series, ChartKind::Area)).expect("scales");
    assert_abs_diff_eq!(scales.max_y, 99.99, epsilon = 1e-9);
}
