use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::scale_builder::{ChartScales, ScaleInput, build_scales};
use crate::core::ticks::{default_max_ticks, tick_indices, tick_stride};
use crate::core::types::ensure_sorted_by_date;
use crate::core::{
    ChartKind, Datum, LinearScale, Margin, Padding, Series, Viewport, XScale, validate_series_ids,
};
use crate::error::{ChartError, ChartResult};

/// Layout parameters a context is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextParams {
    pub viewport: Viewport,
    pub kind: ChartKind,
    pub margin: Margin,
    pub padding: Padding,
    /// Overrides the width-based tick budget.
    pub max_ticks: Option<usize>,
}

/// Derived state shared by every chart consumer for one render pass.
///
/// A context is immutable: any change to data, series activity or layout
/// builds a new one.
#[derive(Debug, Clone)]
pub struct ChartContext {
    data: Arc<[Datum]>,
    series: Arc<[Series]>,
    params: ContextParams,
    width: f64,
    height: f64,
    scales: ChartScales,
    max_ticks: usize,
    tick_stride: usize,
}

impl ChartContext {
    pub fn build(data: Arc<[Datum]>, series: Arc<[Series]>, params: ContextParams) -> ChartResult<Self> {
        if !params.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: params.viewport.width,
                height: params.viewport.height,
            });
        }
        let margin = params.margin.validate()?;
        validate_series_ids(&series)?;
        ensure_sorted_by_date(&data)?;

        let width = f64::from(params.viewport.width) - margin.left - margin.right;
        let height = f64::from(params.viewport.height) - margin.top - margin.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: params.viewport.width,
                height: params.viewport.height,
            });
        }

        let scales = build_scales(ScaleInput {
            data: &data,
            series: &series,
            kind: params.kind,
            width,
            height,
            padding: params.padding,
        })?;

        let max_ticks = params.max_ticks.unwrap_or_else(|| default_max_ticks(width));
        let tick_stride = tick_stride(data.len(), max_ticks);

        debug!(
            points = data.len(),
            series = series.len(),
            width,
            height,
            max_ticks,
            tick_stride,
            "built chart context"
        );

        Ok(Self {
            data,
            series,
            params,
            width,
            height,
            scales,
            max_ticks,
            tick_stride,
        })
    }

    #[must_use]
    pub fn data(&self) -> &[Datum] {
        &self.data
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn active_series(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(|s| s.is_active())
    }

    pub fn series_by_id(&self, id: &str) -> ChartResult<&Series> {
        self.series
            .iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| ChartError::UnknownSeries(id.to_owned()))
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.params.kind
    }

    #[must_use]
    pub fn params(&self) -> ContextParams {
        self.params
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.params.viewport
    }

    #[must_use]
    pub fn margin(&self) -> Margin {
        self.params.margin
    }

    #[must_use]
    pub fn padding(&self) -> Padding {
        self.params.padding
    }

    /// Inner plotting width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Inner plotting height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn scales(&self) -> &ChartScales {
        &self.scales
    }

    #[must_use]
    pub fn x_scale(&self) -> &XScale {
        &self.scales.x
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.scales.y
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.scales.min_y
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.scales.max_y
    }

    #[must_use]
    pub fn start_date(&self) -> DateTime<Utc> {
        self.scales.start_date
    }

    #[must_use]
    pub fn end_date(&self) -> DateTime<Utc> {
        self.scales.end_date
    }

    #[must_use]
    pub fn max_ticks(&self) -> usize {
        self.max_ticks
    }

    #[must_use]
    pub fn tick_stride(&self) -> usize {
        self.tick_stride
    }

    #[must_use]
    pub fn tick_indices(&self) -> Vec<usize> {
        tick_indices(self.data.len(), self.tick_stride)
    }

    /// Converts a viewport-space pointer to chart-local coordinates.
    #[must_use]
    pub fn to_local(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.params.margin.left, y - self.params.margin.top)
    }
}
