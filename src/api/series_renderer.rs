use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    AreaGeometry, BarGeometry, ChartContext, ChartKind, RetargetOutcome, Series, SeriesSample,
    SeriesTransition, TransitionKey, project_area_geometry, project_bars,
};
use crate::error::ChartResult;
use crate::render::Color;

use super::ChartStyle;

/// Animation takes for every active series, keyed by series id.
#[derive(Debug, Clone, Default)]
pub struct TransitionSet {
    duration_seconds: f64,
    transitions: IndexMap<String, SeriesTransition>,
}

impl TransitionSet {
    #[must_use]
    pub fn new(duration_seconds: f64) -> Self {
        Self {
            duration_seconds,
            transitions: IndexMap::new(),
        }
    }

    /// Points every active series at its current values.
    ///
    /// A series seen for the first time, or whose visible window changed,
    /// restarts from the zeroed baseline. Inactive series are dropped so a
    /// re-activated series enters again.
    pub fn sync(&mut self, context: &ChartContext) {
        let (start_date, end_date) = (context.start_date(), context.end_date());
        self.transitions
            .retain(|id, _| context.active_series().any(|series| series.id() == id));

        for series in context.active_series() {
            let key = TransitionKey::new(series.id(), start_date, end_date);
            let target = series.values(context.data());
            match self.transitions.get_mut(series.id()) {
                Some(transition) => {
                    if transition.retarget(key, target) == RetargetOutcome::Restarted {
                        debug!(series = series.id(), "series animation restarted");
                    }
                }
                None => {
                    debug!(series = series.id(), "series animation entering");
                    self.transitions.insert(
                        series.id().to_owned(),
                        SeriesTransition::enter(key, target, self.duration_seconds),
                    );
                }
            }
        }
    }

    /// Duration used by takes started from now on.
    pub fn set_duration(&mut self, duration_seconds: f64) {
        self.duration_seconds = duration_seconds;
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    pub fn advance(&mut self, delta_seconds: f64) {
        for transition in self.transitions.values_mut() {
            transition.advance(delta_seconds);
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transitions.values().any(|t| !t.is_finished())
    }

    #[must_use]
    pub fn get(&self, series_id: &str) -> Option<&SeriesTransition> {
        self.transitions.get(series_id)
    }

    /// Values to draw for `series`; falls back to the raw values when the
    /// series has no take yet.
    #[must_use]
    pub fn displayed_values(&self, series: &Series, context: &ChartContext) -> Vec<Option<f64>> {
        match self.transitions.get(series.id()) {
            Some(transition) => transition.current_values(),
            None => series.values(context.data()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesGeometry {
    Area(AreaGeometry),
    Bars(Vec<BarGeometry>),
}

/// Highlight dot in chart-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesMarker {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// Everything drawn for one active series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLayer {
    pub series_id: String,
    pub color: Color,
    pub geometry: SeriesGeometry,
    pub marker: Option<SeriesMarker>,
}

/// Projects every active series at its animated values.
///
/// Area charts get a marker at the hovered datum, or at the most recent
/// defined value when nothing is hovered.
pub fn project_series_layers(
    context: &ChartContext,
    transitions: &TransitionSet,
    hovered_index: Option<usize>,
    style: &ChartStyle,
) -> ChartResult<Vec<SeriesLayer>> {
    let active: Vec<(usize, &Series)> = context
        .series()
        .iter()
        .enumerate()
        .filter(|(_, series)| series.is_active())
        .collect();

    let project = |(position, series): &(usize, &Series)| {
        project_layer(context, transitions, hovered_index, style.series_color(*position), series)
    };

    #[cfg(feature = "parallel-projection")]
    {
        use rayon::prelude::*;
        active.par_iter().map(project).collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        active.iter().map(project).collect()
    }
}

fn project_layer(
    context: &ChartContext,
    transitions: &TransitionSet,
    hovered_index: Option<usize>,
    color: Color,
    series: &Series,
) -> ChartResult<SeriesLayer> {
    let values = transitions.displayed_values(series, context);
    let samples: Vec<SeriesSample> = context
        .data()
        .iter()
        .zip(values)
        .map(|(datum, value)| SeriesSample {
            date: datum.date,
            value,
        })
        .collect();
    let y_scale = context.y_scale();

    let (geometry, marker) = match context.kind() {
        ChartKind::Area => {
            let time_scale = context.x_scale().as_time()?;
            let geometry = project_area_geometry(&samples, time_scale, y_scale);
            let marker_index = match hovered_index {
                Some(index) => samples
                    .get(index)
                    .filter(|sample| sample.value.is_some())
                    .map(|_| index),
                None => samples.iter().rposition(|sample| sample.value.is_some()),
            };
            let marker = marker_index.and_then(|index| {
                let sample = samples[index];
                sample.value.map(|value| SeriesMarker {
                    index,
                    x: time_scale.map(sample.date),
                    y: y_scale.map(value),
                })
            });
            (SeriesGeometry::Area(geometry), marker)
        }
        ChartKind::Bar => {
            let band_scale = context.x_scale().as_band()?;
            (SeriesGeometry::Bars(project_bars(&samples, band_scale, y_scale)), None)
        }
    };

    Ok(SeriesLayer {
        series_id: series.id().to_owned(),
        color,
        geometry,
        marker,
    })
}
