use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{BandScale, LinearScale, SeriesSample};

/// One bar in chart-local pixel coordinates. `y` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    /// Dataset index of the sample.
    pub index: usize,
    pub date: DateTime<Utc>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Projects samples into bars anchored at the value `0`.
///
/// Samples must be sorted by date. Missing values and bars whose height is
/// not positive are omitted.
#[must_use]
pub fn project_bars(
    samples: &[SeriesSample],
    band_scale: &BandScale,
    value_scale: LinearScale,
) -> Vec<BarGeometry> {
    let zero_y = value_scale.map(0.0);
    let width = band_scale.bandwidth();

    let mut bars = Vec::with_capacity(samples.len());
    let mut slot = 0usize;
    let mut previous_date: Option<DateTime<Utc>> = None;
    for (index, sample) in samples.iter().enumerate() {
        if previous_date.is_some_and(|date| date != sample.date) {
            slot += 1;
        }
        previous_date = Some(sample.date);

        let Some(value) = sample.value else {
            continue;
        };
        let top_y = value_scale.map(value);
        let height = zero_y - top_y;
        if height <= 0.0 || width <= 0.0 {
            continue;
        }
        bars.push(BarGeometry {
            index,
            date: sample.date,
            x: band_scale.position_at(slot),
            y: top_y,
            width,
            height,
        });
    }
    bars
}
