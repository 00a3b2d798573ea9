use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::ChartContext;

use super::LeftAxisConfig;
use super::layout_helpers::estimate_label_text_width_px;

/// Inner heights below this get a sparser left axis.
const SHORT_CHART_HEIGHT_PX: f64 = 150.0;

/// One bottom-axis label, in chart-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottomTick {
    pub index: usize,
    pub date: DateTime<Utc>,
    pub x: f64,
    pub label: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BottomAxisLayout {
    pub ticks: Vec<BottomTick>,
}

impl BottomAxisLayout {
    #[must_use]
    pub fn highlighted(&self) -> Option<&BottomTick> {
        self.ticks.iter().find(|tick| tick.highlighted)
    }
}

/// Lays out one label per tick-stride index.
///
/// The hovered datum's tick is highlighted when it carries one; with no hover
/// the most recent tick is highlighted.
pub fn layout_bottom_axis(
    context: &ChartContext,
    hovered_index: Option<usize>,
    format: &dyn Fn(DateTime<Utc>) -> String,
) -> BottomAxisLayout {
    let indices = context.tick_indices();
    let highlighted_index = match hovered_index {
        Some(index) => Some(index),
        None => indices.last().copied(),
    };

    let ticks = indices
        .into_iter()
        .filter_map(|index| {
            let datum = context.data().get(index)?;
            let x = context.x_scale().center_of(datum.date)?;
            Some(BottomTick {
                index,
                date: datum.date,
                x,
                label: format(datum.date),
                highlighted: highlighted_index == Some(index),
            })
        })
        .collect();

    BottomAxisLayout { ticks }
}

/// One left-axis label, in chart-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeftTick {
    pub value: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LeftAxisLayout {
    pub ticks: Vec<LeftTick>,
    /// Widest estimated label plus the configured gap.
    pub required_width: f64,
}

#[must_use]
pub fn default_left_num_ticks(inner_height: f64) -> usize {
    if inner_height < SHORT_CHART_HEIGHT_PX { 3 } else { 4 }
}

/// Lays out left-axis ticks from the value scale and measures the widest
/// label so the caller can grow the left margin.
pub fn layout_left_axis(
    context: &ChartContext,
    config: &LeftAxisConfig,
    font_size_px: f64,
    format: &dyn Fn(f64) -> String,
) -> LeftAxisLayout {
    let y_scale = context.y_scale();
    let num_ticks = config
        .num_ticks
        .unwrap_or_else(|| default_left_num_ticks(context.height()));

    let ticks: Vec<LeftTick> = y_scale
        .ticks(num_ticks)
        .into_iter()
        .filter(|value| !config.integer_ticks_only || value.fract() == 0.0)
        .map(|value| LeftTick {
            value,
            y: y_scale.map(value),
            label: format(value),
        })
        .collect();

    let widest = ticks
        .iter()
        .map(|tick| OrderedFloat(estimate_label_text_width_px(&tick.label, font_size_px)))
        .max()
        .map_or(0.0, |width| width.0);

    LeftAxisLayout {
        ticks,
        required_width: widest + config.label_gap_px,
    }
}
