use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::{ChartKind, Margin, Padding, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipAnchor;
use crate::render::Color;

/// Left (value) axis options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeftAxisConfig {
    /// Tick-count hint; `None` picks 3 below 150px inner height, else 4.
    pub num_ticks: Option<usize>,
    pub integer_ticks_only: bool,
    pub show_grid: bool,
    /// Space between the widest label and the plotting area.
    pub label_gap_px: f64,
}

impl Default for LeftAxisConfig {
    fn default() -> Self {
        Self {
            num_ticks: None,
            integer_ticks_only: false,
            show_grid: true,
            label_gap_px: 8.0,
        }
    }
}

/// Bottom (date) axis options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BottomAxisConfig {
    /// `chrono` strftime pattern used when no formatter closure is set.
    pub date_format: String,
    pub show_grid: bool,
}

impl Default for BottomAxisConfig {
    fn default() -> Self {
        Self {
            date_format: "%b %-d".to_owned(),
            show_grid: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Length of one transition take; `0` disables animation.
    pub duration_seconds: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Series colors, assigned by series position and cycled.
    pub series_palette: Vec<Color>,
    pub area_fill_alpha: f64,
    pub line_width: f64,
    pub marker_radius: f64,
    pub font_size_px: f64,
    pub label_color: Color,
    pub highlighted_label_color: Color,
    pub grid_color: Color,
    pub guide_line_color: Color,
    pub background_color: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            series_palette: vec![
                Color::rgb(0.231, 0.510, 0.965),
                Color::rgb(0.063, 0.725, 0.506),
                Color::rgb(0.961, 0.620, 0.043),
                Color::rgb(0.937, 0.267, 0.267),
                Color::rgb(0.545, 0.361, 0.965),
            ],
            area_fill_alpha: 0.2,
            line_width: 2.0,
            marker_radius: 4.0,
            font_size_px: 12.0,
            label_color: Color::rgb(0.612, 0.639, 0.686),
            highlighted_label_color: Color::rgb(0.090, 0.090, 0.090),
            grid_color: Color::rgba(0.0, 0.0, 0.0, 0.08),
            guide_line_color: Color::rgba(0.0, 0.0, 0.0, 0.25),
            background_color: Color::rgb(1.0, 1.0, 1.0),
        }
    }
}

impl ChartStyle {
    fn validate(&self) -> ChartResult<()> {
        if self.series_palette.is_empty() {
            return Err(ChartError::InvalidConfig(
                "series palette must not be empty".to_owned(),
            ));
        }
        for color in &self.series_palette {
            color.validate()?;
        }
        for color in [
            self.label_color,
            self.highlighted_label_color,
            self.grid_color,
            self.guide_line_color,
            self.background_color,
        ] {
            color.validate()?;
        }
        if !self.area_fill_alpha.is_finite() || !(0.0..=1.0).contains(&self.area_fill_alpha) {
            return Err(ChartError::InvalidConfig(
                "area fill alpha must be in [0, 1]".to_owned(),
            ));
        }
        for (name, value) in [
            ("line width", self.line_width),
            ("marker radius", self.marker_radius),
            ("font size", self.font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    /// Palette color for the series at `position` in the chart's series list.
    #[must_use]
    pub fn series_color(&self, position: usize) -> Color {
        self.series_palette[position % self.series_palette.len()]
    }
}

/// Chart bootstrap configuration.
///
/// Serializable so hosts can persist chart setup as JSON; every field has a
/// default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChartConfig {
    pub viewport: Viewport,
    pub kind: ChartKind,
    pub margin: Margin,
    pub padding: Padding,
    /// Overrides the width-based bottom-axis tick budget.
    pub max_ticks: Option<usize>,
    pub tooltip_anchor: TooltipAnchor,
    pub left_axis: LeftAxisConfig,
    pub bottom_axis: BottomAxisConfig,
    pub animation: AnimationConfig,
    pub style: ChartStyle,
}

impl ChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport, kind: ChartKind) -> Self {
        Self {
            viewport,
            kind,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    #[must_use]
    pub fn with_tooltip_anchor(mut self, anchor: TooltipAnchor) -> Self {
        self.tooltip_anchor = anchor;
        self
    }

    #[must_use]
    pub fn with_left_axis(mut self, left_axis: LeftAxisConfig) -> Self {
        self.left_axis = left_axis;
        self
    }

    #[must_use]
    pub fn with_bottom_axis(mut self, bottom_axis: BottomAxisConfig) -> Self {
        self.bottom_axis = bottom_axis;
        self
    }

    #[must_use]
    pub fn with_animation_duration(mut self, duration_seconds: f64) -> Self {
        self.animation.duration_seconds = duration_seconds;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.margin.validate()?;
        self.padding.validate()?;
        if self.max_ticks == Some(0) {
            return Err(ChartError::InvalidConfig(
                "max ticks must be > 0".to_owned(),
            ));
        }
        if self.left_axis.num_ticks == Some(0) {
            return Err(ChartError::InvalidConfig(
                "left axis tick count must be > 0".to_owned(),
            ));
        }
        if !self.left_axis.label_gap_px.is_finite() || self.left_axis.label_gap_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "left axis label gap must be finite and >= 0".to_owned(),
            ));
        }
        validate_date_format(&self.bottom_axis.date_format)?;
        if !self.animation.duration_seconds.is_finite() || self.animation.duration_seconds < 0.0 {
            return Err(ChartError::InvalidConfig(
                "animation duration must be finite and >= 0".to_owned(),
            ));
        }
        self.style.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize chart config: {e}")))
    }
}

fn validate_date_format(pattern: &str) -> ChartResult<()> {
    if pattern.is_empty() {
        return Err(ChartError::InvalidConfig(
            "date format must not be empty".to_owned(),
        ));
    }
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ChartError::InvalidConfig(format!(
            "invalid date format pattern: {pattern}"
        )));
    }
    Ok(())
}
