use std::sync::Arc;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use timeline_chart::api::{
    LeftAxisConfig, default_left_num_ticks, format_compact_number, format_date_label,
    layout_bottom_axis, layout_left_axis,
};
use timeline_chart::core::{
    ChartContext, ChartKind, ContextParams, Datum, Margin, Padding, Series, Viewport,
};
use timeline_chart::render::NullRenderer;
use timeline_chart::{ChartConfig, TimeSeriesChart};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).single().expect("base date") + TimeDelta::days(n)
}

fn bare_context(values: &[f64], width: u32, kind: ChartKind) -> ChartContext {
    let data: Vec<Datum> = values
        .iter()
        .enumerate()
        .map(|(i, v)| Datum::new(day(i as i64)).with_value("clicks", *v))
        .collect();
    ChartContext::build(
        Arc::from(data),
        Arc::from(vec![Series::from_key("clicks", "clicks")]),
        ContextParams {
            viewport: Viewport::new(width, 300),
            kind,
            margin: Margin {
                top: 0.0,
                right: 0.0,
                bottom: 0.0,
                left: 0.0,
            },
            padding: Padding {
                top: 0.0,
                bottom: 0.0,
            },
            max_ticks: None,
        },
    )
    .expect("context")
}

fn month_day(date: DateTime<Utc>) -> String {
    format_date_label(date, "%b %-d")
}

#[test]
fn bottom_axis_labels_every_stride_index() {
    let values: Vec<f64> = (0..30).map(f64::from).collect();
    let ctx = bare_context(&values, 460, ChartKind::Area);
    let axis = layout_bottom_axis(&ctx, None, &month_day);

    let indices: Vec<usize> = axis.ticks.iter().map(|t| t.index).collect();
    assert_eq!(indices, vec![0, 5, 10, 15, 20, 25]);
    assert_eq!(axis.ticks[0].label, "May 1");
    assert_eq!(axis.ticks[5].label, "May 26");
}

#[test]
fn most_recent_tick_is_highlighted_without_hover() {
    let values: Vec<f64> = (0..30).map(f64::from).collect();
    let ctx = bare_context(&values, 460, ChartKind::Area);

    let axis = layout_bottom_axis(&ctx, None, &month_day);
    assert_eq!(axis.highlighted().map(|t| t.index), Some(25));
    assert_eq!(axis.ticks.iter().filter(|t| t.highlighted).count(), 1);

    let axis = layout_bottom_axis(&ctx, Some(10), &month_day);
    assert_eq!(axis.highlighted().map(|t| t.index), Some(10));

    // A hovered datum between ticks highlights nothing.
    let axis = layout_bottom_axis(&ctx, Some(11), &month_day);
    assert!(axis.highlighted().is_none());
}

#[test]
fn bottom_ticks_sit_on_band_centres() {
    let ctx = bare_context(&[1.0, 2.0, 3.0], 300, ChartKind::Bar);
    let axis = layout_bottom_axis(&ctx, None, &|_| String::new());
    let band = ctx.x_scale().as_band().expect("band");
    for tick in &axis.ticks {
        let expected = band.position_at(tick.index) + band.bandwidth() / 2.0;
        assert!((tick.x - expected).abs() < 1e-9);
    }
}

#[test]
fn left_axis_tick_hint_depends_on_height() {
    assert_eq!(default_left_num_ticks(120.0), 3);
    assert_eq!(default_left_num_ticks(150.0), 4);
}

#[test]
fn integer_only_axis_drops_fractional_ticks() {
    let ctx = bare_context(&[0.0, 1.0, 2.0], 460, ChartKind::Area);

    let all = layout_left_axis(&ctx, &LeftAxisConfig::default(), 12.0, &format_compact_number);
    let values: Vec<f64> = all.ticks.iter().map(|t| t.value).collect();
    assert_eq!(values, vec![0.0, 0.5, 1.0, 1.5, 2.0]);

    let config = LeftAxisConfig {
        integer_ticks_only: true,
        ..LeftAxisConfig::default()
    };
    let integers = layout_left_axis(&ctx, &config, 12.0, &format_compact_number);
    let values: Vec<f64> = integers.ticks.iter().map(|t| t.value).collect();
    assert_eq!(values, vec![0.0, 1.0, 2.0]);
    let labels: Vec<&str> = integers.ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["0", "1", "2"]);
}

#[test]
fn left_axis_width_includes_gap() {
    let ctx = bare_context(&[0.0, 1_000_000.0], 460, ChartKind::Area);
    let narrow = layout_left_axis(&ctx, &LeftAxisConfig::default(), 12.0, &|_| "1".to_owned());
    let wide = layout_left_axis(&ctx, &LeftAxisConfig::default(), 12.0, &format_compact_number);
    assert!(wide.required_width > narrow.required_width);
    assert!(narrow.required_width >= 8.0 + 12.0);
}

fn values_chart(values: &[f64]) -> Vec<Datum> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Datum::new(day(i as i64)).with_value("clicks", *v))
        .collect()
}

#[test]
fn left_margin_grows_and_never_shrinks_within_a_session() {
    let config = ChartConfig::new(Viewport::new(600, 300), ChartKind::Area).with_animation_duration(0.0);
    let mut chart = TimeSeriesChart::new(NullRenderer::default(), config).expect("chart");
    chart
        .set_series(vec![Series::from_key("clicks", "clicks")])
        .expect("series");
    assert_eq!(chart.left_margin(), 4.0);

    chart
        .set_data(values_chart(&[200_000.0, 1_200_000.0]))
        .expect("large values");
    let grown = chart.left_margin();
    assert!(grown > 30.0);
    assert_eq!(chart.context().expect("context").margin().left, grown);
    let required = chart.left_axis().expect("left axis").required_width;
    assert!(required <= grown);

    chart.set_data(values_chart(&[1.0, 2.0, 3.0])).expect("small values");
    assert_eq!(chart.left_margin(), grown);

    chart.reset_left_margin().expect("reset");
    let reset = chart.left_margin();
    assert!(reset < grown);
    assert!(reset >= 4.0);
}

#[test]
fn custom_formatters_drive_labels() {
    let config = ChartConfig::new(Viewport::new(600, 300), ChartKind::Area).with_animation_duration(0.0);
    let mut chart = TimeSeriesChart::new(NullRenderer::default(), config)
        .expect("chart")
        .with_date_formatter(|date| date.format("%d/%m").to_string());
    chart
        .set_series(vec![Series::from_key("clicks", "clicks")])
        .expect("series");
    chart.set_data(values_chart(&[10.0, 20.0])).expect("data");
    chart
        .set_value_formatter(|value| format!("${value:.0}"))
        .expect("formatter");

    let bottom = chart.bottom_axis().expect("bottom axis");
    assert_eq!(bottom.ticks[0].label, "01/05");
    let left = chart.left_axis().expect("left axis");
    assert!(left.ticks.iter().all(|t| t.label.starts_with('$')));
}

#[test]
fn narrow_viewport_keeps_a_positive_plot_width() {
    let config = ChartConfig::new(Viewport::new(36, 300), ChartKind::Area).with_animation_duration(0.0);
    let mut chart = TimeSeriesChart::new(NullRenderer::default(), config).expect("chart");
    chart
        .set_series(vec![Series::from_key("clicks", "clicks")])
        .expect("series");

    chart
        .set_data(values_chart(&[200_000.0, 1_200_000.0]))
        .expect("large values on a narrow viewport");
    let context = chart.context().expect("context");
    assert!(context.width() >= 1.0);
    assert!(context.margin().left + context.margin().right + context.width() <= 36.0 + 1e-9);
    chart.render().expect("render");
}
