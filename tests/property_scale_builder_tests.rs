use std::sync::Arc;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use timeline_chart::core::{
    ChartContext, ChartKind, ContextParams, Datum, Margin, Padding, ScaleInput, Series,
    SeriesSample, Viewport, build_scales, project_bars,
};

fn day(n: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single().expect("base date")
        + TimeDelta::days(n as i64)
}

fn dataset(values: &[f64]) -> Vec<Datum> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Datum::new(day(i)).with_value("a", *v).with_value("b", v * 1_000.0 + 5e6))
        .collect()
}

fn kind_strategy() -> impl Strategy<Value = ChartKind> {
    prop_oneof![Just(ChartKind::Area), Just(ChartKind::Bar)]
}

proptest! {
    #[test]
    fn padded_domain_contains_active_extent(
        values in prop::collection::vec(-1e6f64..1e6, 1..40),
        kind in kind_strategy(),
        top in 0.0f64..0.5,
        bottom in 0.0f64..0.5,
    ) {
        let data = dataset(&values);
        let series = vec![Series::from_key("a", "a")];
        let scales = build_scales(ScaleInput {
            data: &data,
            series: &series,
            kind,
            width: 400.0,
            height: 200.0,
            padding: Padding { top, bottom },
        })
        .expect("scales");

        let (lo, hi) = scales.y.domain();
        prop_assert!(lo.is_finite() && hi.is_finite());
        prop_assert!(lo < hi);
        prop_assert!(lo <= scales.min_y && hi >= scales.max_y);
        if kind == ChartKind::Bar {
            prop_assert!(scales.min_y <= 0.0);
            prop_assert!(lo <= 0.0);
        }
        for value in &values {
            prop_assert!(scales.y.map(*value).is_finite());
        }
    }

    #[test]
    fn inactive_series_never_widen_the_domain(
        values in prop::collection::vec(-1e3f64..1e3, 1..30),
    ) {
        let data = dataset(&values);
        let series = vec![
            Series::from_key("a", "a"),
            Series::from_key("b", "b").with_active(false),
        ];
        let scales = build_scales(ScaleInput {
            data: &data,
            series: &series,
            kind: ChartKind::Area,
            width: 400.0,
            height: 200.0,
            padding: Padding::default(),
        })
        .expect("scales");

        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        prop_assert_eq!(scales.max_y, max);
        prop_assert_eq!(scales.min_y, min);
    }

    #[test]
    fn bars_rise_from_the_zero_line(
        values in prop::collection::vec(prop_oneof![1.0f64..1e6, -1e6f64..-1.0], 1..40),
    ) {
        let data = dataset(&values);
        let ctx = ChartContext::build(
            Arc::from(data),
            Arc::from(vec![Series::from_key("a", "a")]),
            ContextParams {
                viewport: Viewport::new(800, 300),
                kind: ChartKind::Bar,
                margin: Margin::default(),
                padding: Padding::default(),
                max_ticks: None,
            },
        )
        .expect("context");

        let samples: Vec<SeriesSample> = ctx
            .data()
            .iter()
            .map(|d| SeriesSample { date: d.date, value: d.value("a") })
            .collect();
        let band = ctx.x_scale().as_band().expect("band scale");
        let bars = project_bars(&samples, band, ctx.y_scale());
        let zero_y = ctx.y_scale().map(0.0);

        let positive = values.iter().filter(|v| **v > 0.0).count();
        prop_assert_eq!(bars.len(), positive);
        for bar in &bars {
            prop_assert!(bar.height > 0.0);
            prop_assert!((bar.y + bar.height - zero_y).abs() < 1e-6);
            prop_assert!(values[bar.index] > 0.0);
        }
    }
}
