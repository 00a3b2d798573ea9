use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, TimeScale};

/// One series value at one date, index-aligned with the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSample {
    pub date: DateTime<Utc>,
    pub value: Option<f64>,
}

/// Vertex in chart-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaVertex {
    pub x: f64,
    pub y: f64,
}

/// Contiguous run of defined samples.
///
/// `fill_polygon` is explicitly closed against the baseline:
/// `[baseline-start, line points..., baseline-end, baseline-start]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSegment {
    pub line_points: Vec<AreaVertex>,
    pub fill_polygon: Vec<AreaVertex>,
}

/// Area-series geometry; missing values split the area into segments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AreaGeometry {
    pub segments: Vec<AreaSegment>,
}

impl AreaGeometry {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.segments.iter().map(|s| s.line_points.len()).sum()
    }
}

/// Projects samples into area geometry anchored at the bottom of the value
/// scale's pixel range.
#[must_use]
pub fn project_area_geometry(
    samples: &[SeriesSample],
    time_scale: &TimeScale,
    value_scale: LinearScale,
) -> AreaGeometry {
    let (range_start, range_end) = value_scale.range();
    let baseline_y = range_start.max(range_end);

    let mut segments = Vec::new();
    let mut current: Vec<AreaVertex> = Vec::new();
    for sample in samples {
        match sample.value {
            Some(value) => current.push(AreaVertex {
                x: time_scale.map(sample.date),
                y: value_scale.map(value),
            }),
            None => {
                if !current.is_empty() {
                    segments.push(close_segment(std::mem::take(&mut current), baseline_y));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(close_segment(current, baseline_y));
    }

    AreaGeometry { segments }
}

fn close_segment(line_points: Vec<AreaVertex>, baseline_y: f64) -> AreaSegment {
    let first_x = line_points[0].x;
    let last_x = line_points[line_points.len() - 1].x;

    let mut fill_polygon = Vec::with_capacity(line_points.len() + 3);
    fill_polygon.push(AreaVertex {
        x: first_x,
        y: baseline_y,
    });
    fill_polygon.extend(line_points.iter().copied());
    fill_polygon.push(AreaVertex {
        x: last_x,
        y: baseline_y,
    });
    fill_polygon.push(AreaVertex {
        x: first_x,
        y: baseline_y,
    });

    AreaSegment {
        line_points,
        fill_polygon,
    }
}
