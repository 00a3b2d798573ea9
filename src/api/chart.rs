use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{ChartContext, Datum, Series, Viewport, ensure_sorted_by_date, validate_series_ids};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{PointerEvent, TooltipController, TooltipState};
use crate::render::{RenderFrame, Renderer};

use super::axis::{BottomAxisLayout, LeftAxisLayout, layout_bottom_axis};
use super::axis_label_format::{
    DateLabelFormatter, ValueLabelFormatter, format_compact_number, format_date_label,
};
use super::layout::{ResolvedLayout, resolve_layout};
use super::layout_helpers::LeftMarginState;
use super::render_frame_builder::{FrameInputs, build_frame};
use super::series_renderer::{SeriesLayer, TransitionSet, project_series_layers};
use super::{ChartConfig, ChartSnapshot};

/// Time-series chart: owns the dataset, series list, derived context,
/// tooltip and animation state, and hands finished frames to a renderer.
///
/// Every data, series or layout change rebuilds the context; pointer input
/// only touches tooltip state.
pub struct TimeSeriesChart<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    data: Arc<[Datum]>,
    series: Arc<[Series]>,
    layout: Option<ResolvedLayout>,
    left_margin: LeftMarginState,
    tooltip: TooltipController,
    /// Last pointer position in viewport coordinates.
    last_pointer: Option<(f64, f64)>,
    transitions: TransitionSet,
    date_formatter: Option<DateLabelFormatter>,
    value_formatter: Option<ValueLabelFormatter>,
}

impl<R: Renderer> TimeSeriesChart<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            left_margin: LeftMarginState::new(config.margin.left),
            tooltip: TooltipController::new(config.tooltip_anchor.clone()),
            transitions: TransitionSet::new(config.animation.duration_seconds),
            config,
            data: Arc::from(Vec::<Datum>::new()),
            series: Arc::from(Vec::<Series>::new()),
            layout: None,
            last_pointer: None,
            date_formatter: None,
            value_formatter: None,
        })
    }

    #[must_use]
    pub fn with_date_formatter<F>(mut self, format: F) -> Self
    where
        F: Fn(DateTime<Utc>) -> String + Send + Sync + 'static,
    {
        self.date_formatter = Some(Arc::new(format));
        self
    }

    pub fn set_date_formatter<F>(&mut self, format: F)
    where
        F: Fn(DateTime<Utc>) -> String + Send + Sync + 'static,
    {
        self.date_formatter = Some(Arc::new(format));
    }

    /// Replaces the left-axis formatter; label widths change, so the layout
    /// is resolved again.
    pub fn set_value_formatter<F>(&mut self, format: F) -> ChartResult<()>
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        let previous = self.value_formatter.replace(Arc::new(format));
        let result = self.apply(
            Arc::clone(&self.data),
            Arc::clone(&self.series),
            self.config.clone(),
        );
        if result.is_err() {
            self.value_formatter = previous;
        }
        result
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ChartConfig) -> ChartResult<()> {
        config.validate()?;
        let duration_changed =
            config.animation.duration_seconds != self.config.animation.duration_seconds;
        self.apply(Arc::clone(&self.data), Arc::clone(&self.series), config)?;
        if duration_changed {
            self.transitions
                .set_duration(self.config.animation.duration_seconds);
        }
        Ok(())
    }

    /// Replaces the dataset. Data must be sorted ascending by date.
    pub fn set_data(&mut self, data: Vec<Datum>) -> ChartResult<()> {
        ensure_sorted_by_date(&data)?;
        debug!(points = data.len(), "set chart data");
        self.apply(Arc::from(data), Arc::clone(&self.series), self.config.clone())
    }

    #[must_use]
    pub fn data(&self) -> &[Datum] {
        &self.data
    }

    pub fn set_series(&mut self, series: Vec<Series>) -> ChartResult<()> {
        validate_series_ids(&series)?;
        debug!(series = series.len(), "set chart series");
        self.apply(Arc::clone(&self.data), Arc::from(series), self.config.clone())
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Toggles one series; inactive series leave the value domain, the
    /// drawn layers and the animation set.
    pub fn set_series_active(&mut self, id: &str, is_active: bool) -> ChartResult<()> {
        let mut series = self.series.to_vec();
        let target = series
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| ChartError::UnknownSeries(id.to_owned()))?;
        target.set_active(is_active);
        debug!(series = id, is_active, "toggled series");
        self.apply(Arc::clone(&self.data), Arc::from(series), self.config.clone())
    }

    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        let mut config = self.config.clone();
        config.viewport = viewport;
        config.validate()?;
        self.apply(Arc::clone(&self.data), Arc::clone(&self.series), config)
    }

    /// Current left margin, including label-width growth.
    #[must_use]
    pub fn left_margin(&self) -> f64 {
        self.left_margin.current()
    }

    /// Ends the margin session: the left margin may shrink back to fit the
    /// current labels.
    pub fn reset_left_margin(&mut self) -> ChartResult<()> {
        self.left_margin.reset(self.config.margin.left);
        self.apply(
            Arc::clone(&self.data),
            Arc::clone(&self.series),
            self.config.clone(),
        )
    }

    #[must_use]
    pub fn context(&self) -> Option<&ChartContext> {
        self.layout.as_ref().map(|layout| &layout.context)
    }

    #[must_use]
    pub fn left_axis(&self) -> Option<&LeftAxisLayout> {
        self.layout.as_ref().map(|layout| &layout.left_axis)
    }

    #[must_use]
    pub fn bottom_axis(&self) -> Option<BottomAxisLayout> {
        let context = self.context()?;
        let pattern = self.config.bottom_axis.date_format.as_str();
        let format = |date: DateTime<Utc>| match &self.date_formatter {
            Some(format) => format(date),
            None => format_date_label(date, pattern),
        };
        Some(layout_bottom_axis(
            context,
            self.tooltip.hovered_index(),
            &format,
        ))
    }

    /// Pointer moved over the hit region, in viewport coordinates.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<&TooltipState> {
        self.handle_pointer_event(PointerEvent::Move { x, y })
    }

    pub fn pointer_leave(&mut self) {
        self.last_pointer = None;
        self.tooltip.on_pointer_leave();
    }

    pub fn touch_move(&mut self, x: f64, y: f64) -> ChartResult<&TooltipState> {
        self.handle_pointer_event(PointerEvent::TouchMove { x, y })
    }

    pub fn touch_end(&mut self) {
        self.last_pointer = None;
        self.tooltip.on_touch_end();
    }

    /// Routes one input event with viewport coordinates to the tooltip.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> ChartResult<&TooltipState> {
        let Some(layout) = self.layout.as_ref() else {
            self.tooltip.on_pointer_leave();
            return Ok(self.tooltip.state());
        };
        let local_event = match event {
            PointerEvent::Move { x, y } => {
                self.last_pointer = Some((x, y));
                let (x, y) = layout.context.to_local(x, y);
                PointerEvent::Move { x, y }
            }
            PointerEvent::TouchMove { x, y } => {
                self.last_pointer = Some((x, y));
                let (x, y) = layout.context.to_local(x, y);
                PointerEvent::TouchMove { x, y }
            }
            PointerEvent::Leave | PointerEvent::TouchEnd => {
                self.last_pointer = None;
                event
            }
        };
        self.tooltip.handle(&layout.context, local_event)
    }

    #[must_use]
    pub fn tooltip_state(&self) -> &TooltipState {
        self.tooltip.state()
    }

    /// Runs `render` with the highlighted datum when the tooltip is showing.
    pub fn tooltip_content<T>(&self, render: impl FnOnce(&Datum) -> T) -> Option<T> {
        self.tooltip.tooltip_content(render)
    }

    /// Advances every series animation. Returns `true` while any is running.
    pub fn advance_animation(&mut self, delta_seconds: f64) -> bool {
        self.transitions.advance(delta_seconds);
        self.transitions.is_animating()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transitions.is_animating()
    }

    #[must_use]
    pub fn transitions(&self) -> &TransitionSet {
        &self.transitions
    }

    pub fn series_layers(&self) -> ChartResult<Vec<SeriesLayer>> {
        match self.context() {
            Some(context) => project_series_layers(
                context,
                &self.transitions,
                self.tooltip.hovered_index(),
                &self.config.style,
            ),
            None => Ok(Vec::new()),
        }
    }

    /// Builds the full frame. An empty dataset yields an empty frame.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let Some(layout) = self.layout.as_ref() else {
            return Ok(RenderFrame::new(self.config.viewport));
        };
        let layers = self.series_layers()?;
        let bottom_axis = self.bottom_axis().unwrap_or_default();
        Ok(build_frame(FrameInputs {
            context: &layout.context,
            config: &self.config,
            left_axis: &layout.left_axis,
            bottom_axis: &bottom_axis,
            layers: &layers,
            tooltip: self.tooltip.state(),
        }))
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<ChartSnapshot> {
        let context = self.context()?;
        Some(ChartSnapshot {
            viewport: context.viewport(),
            kind: context.kind(),
            margin: context.margin(),
            inner_width: context.width(),
            inner_height: context.height(),
            point_count: context.data().len(),
            active_series: context
                .active_series()
                .map(|series| series.id().to_owned())
                .collect(),
            start_date: context.start_date(),
            end_date: context.end_date(),
            min_y: context.min_y(),
            max_y: context.max_y(),
            y_domain: context.y_scale().domain(),
            tick_stride: context.tick_stride(),
            tick_indices: context.tick_indices(),
            tooltip: self.tooltip.state().clone(),
            animating: self.transitions.is_animating(),
        })
    }

    /// Resolves a new layout for the given inputs and commits everything only
    /// when it succeeds.
    fn apply(
        &mut self,
        data: Arc<[Datum]>,
        series: Arc<[Series]>,
        config: ChartConfig,
    ) -> ChartResult<()> {
        let mut left_margin = if config.margin.left == self.config.margin.left {
            self.left_margin
        } else {
            LeftMarginState::new(config.margin.left)
        };

        let layout = if data.is_empty() {
            None
        } else {
            let value_formatter = self.value_formatter.clone();
            let format_value = move |value: f64| match &value_formatter {
                Some(format) => format(value),
                None => format_compact_number(value),
            };
            Some(resolve_layout(
                &data,
                &series,
                &config,
                &mut left_margin,
                &format_value,
            )?)
        };

        let mut tooltip = self.tooltip.clone();
        tooltip.set_anchor(config.tooltip_anchor.clone());
        match (&layout, self.last_pointer) {
            (Some(layout), Some((x, y))) if tooltip.state().is_showing() => {
                let (x, y) = layout.context.to_local(x, y);
                tooltip.on_pointer_move(&layout.context, x, y)?;
            }
            (Some(_), _) if tooltip.state().is_showing() => tooltip.on_pointer_leave(),
            (None, _) => tooltip.on_pointer_leave(),
            _ => {}
        }

        match &layout {
            Some(layout) => self.transitions.sync(&layout.context),
            None => self.transitions.clear(),
        }
        self.data = data;
        self.series = series;
        self.config = config;
        self.left_margin = left_margin;
        self.tooltip = tooltip;
        self.layout = layout;
        Ok(())
    }
}
