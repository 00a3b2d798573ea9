use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::band_scale::band_padding_for;
use crate::core::{BandScale, ChartKind, Datum, LinearScale, Padding, Series, TimeScale, XScale};
use crate::error::{ChartError, ChartResult};

/// Minimum half-span used when the value range collapses to a single value.
const COLLAPSED_VALUE_HALF_SPAN: f64 = 0.5;
/// Relative half-span used for collapsed ranges far from zero.
const COLLAPSED_VALUE_RELATIVE_HALF_SPAN: f64 = 0.1;

/// Inputs to [`build_scales`]. `width`/`height` are the inner plotting size.
#[derive(Debug, Clone, Copy)]
pub struct ScaleInput<'a> {
    pub data: &'a [Datum],
    pub series: &'a [Series],
    pub kind: ChartKind,
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

/// Scales plus the extents they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub x: XScale,
    pub y: LinearScale,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Raw extent of active values (bar floor already clamped to <= 0).
    pub min_y: f64,
    pub max_y: f64,
}

/// Earliest and latest datum by date; ties keep the first occurrence.
#[must_use]
pub fn date_extent(data: &[Datum]) -> Option<(&Datum, &Datum)> {
    let first = data.first()?;
    let mut start = first;
    let mut end = first;
    for datum in &data[1..] {
        if datum.date < start.date {
            start = datum;
        }
        if datum.date > end.date {
            end = datum;
        }
    }
    Some((start, end))
}

/// Min/max over every active series value, skipping missing values.
#[must_use]
pub fn active_value_extent(data: &[Datum], series: &[Series]) -> Option<(f64, f64)> {
    series
        .iter()
        .filter(|s| s.is_active())
        .flat_map(|s| data.iter().filter_map(move |datum| s.value_of(datum)))
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        })
}

/// Y domain for the given extent: bars anchor at zero, then the range is
/// padded by `padding` ratios. A zero range widens symmetrically instead of
/// producing a degenerate domain.
#[must_use]
pub fn padded_value_domain(min_y: f64, max_y: f64, kind: ChartKind, padding: Padding) -> (f64, f64) {
    let floor = match kind {
        ChartKind::Area => min_y,
        ChartKind::Bar => min_y.min(0.0),
    };
    let range = max_y - floor;
    if range <= 0.0 {
        let half_span = (max_y.abs() * COLLAPSED_VALUE_RELATIVE_HALF_SPAN).max(COLLAPSED_VALUE_HALF_SPAN);
        return (floor - half_span, max_y + half_span);
    }
    (floor - range * padding.bottom, max_y + range * padding.top)
}

pub fn build_scales(input: ScaleInput<'_>) -> ChartResult<ChartScales> {
    let Some((start, end)) = date_extent(input.data) else {
        return Err(ChartError::EmptyDataset);
    };
    if !input.width.is_finite() || input.width <= 0.0 || !input.height.is_finite() || input.height <= 0.0 {
        return Err(ChartError::InvalidData(
            "inner chart size must be finite and > 0".to_owned(),
        ));
    }
    let padding = input.padding.validate()?;

    let (raw_min, raw_max) = active_value_extent(input.data, input.series).unwrap_or((0.0, 0.0));
    let min_y = match input.kind {
        ChartKind::Area => raw_min,
        ChartKind::Bar => raw_min.min(0.0),
    };
    let max_y = raw_max;

    let y_domain = padded_value_domain(min_y, max_y, input.kind, padding);
    let y = LinearScale::new(y_domain, (input.height, 0.0))?;

    let x = match input.kind {
        ChartKind::Area => XScale::Time(TimeScale::new(start.date, end.date, input.width)?),
        ChartKind::Bar => {
            let band_padding = band_padding_for(input.width, input.data.len());
            XScale::Band(BandScale::new(
                input.data.iter().map(|datum| datum.date),
                input.width,
                band_padding,
            )?)
        }
    };

    trace!(
        kind = input.kind.as_str(),
        points = input.data.len(),
        min_y,
        max_y,
        y_domain_start = y_domain.0,
        y_domain_end = y_domain.1,
        "built chart scales"
    );

    Ok(ChartScales {
        x,
        y,
        start_date: start.date,
        end_date: end.date,
        min_y,
        max_y,
    })
}
