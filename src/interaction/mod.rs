//! Tooltip state driven by pointer and touch input.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{ChartContext, Datum, resolve_nearest};
use crate::error::ChartResult;

/// Vertical placement of the tooltip.
///
/// Horizontal placement is always keyed to the resolved date so several
/// series can share one tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "mode", content = "series_id")]
pub enum TooltipAnchor {
    /// Snap to the named series' value at the resolved datum.
    Series(String),
    /// Follow the pointer's chart-local y.
    Pointer,
    /// Pin to the top of the plotting area.
    #[default]
    Fixed,
}

/// Discrete input delivered by the host's hit region.
///
/// Coordinates are chart-local (margins already removed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Move { x: f64, y: f64 },
    Leave,
    TouchMove { x: f64, y: f64 },
    TouchEnd,
}

/// Tooltip payload while showing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipPosition {
    /// Dataset index of the highlighted datum.
    pub index: usize,
    pub datum: Datum,
    /// Chart-local x of the datum's date.
    pub left: f64,
    /// Chart-local y chosen by the [`TooltipAnchor`].
    pub top: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum TooltipState {
    #[default]
    Hidden,
    Showing(TooltipPosition),
}

impl TooltipState {
    #[must_use]
    pub fn is_showing(&self) -> bool {
        matches!(self, Self::Showing(_))
    }

    #[must_use]
    pub fn position(&self) -> Option<&TooltipPosition> {
        match self {
            Self::Hidden => None,
            Self::Showing(position) => Some(position),
        }
    }
}

/// Owns transient hover/focus state. Purely reactive: no timers, each
/// event fully recomputes the state from the current pointer position.
#[derive(Debug, Clone, Default)]
pub struct TooltipController {
    anchor: TooltipAnchor,
    state: TooltipState,
}

impl TooltipController {
    #[must_use]
    pub fn new(anchor: TooltipAnchor) -> Self {
        Self {
            anchor,
            state: TooltipState::Hidden,
        }
    }

    #[must_use]
    pub fn anchor(&self) -> &TooltipAnchor {
        &self.anchor
    }

    pub fn set_anchor(&mut self, anchor: TooltipAnchor) {
        self.anchor = anchor;
    }

    #[must_use]
    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    #[must_use]
    pub fn hovered_index(&self) -> Option<usize> {
        self.state.position().map(|position| position.index)
    }

    pub fn handle(&mut self, context: &ChartContext, event: PointerEvent) -> ChartResult<&TooltipState> {
        match event {
            PointerEvent::Move { x, y } | PointerEvent::TouchMove { x, y } => self.on_pointer_move(context, x, y),
            PointerEvent::Leave | PointerEvent::TouchEnd => {
                self.on_pointer_leave();
                Ok(&self.state)
            }
        }
    }

    /// Resolves the datum nearest to chart-local `x` and shows it.
    ///
    /// Hides the tooltip when no datum resolves. A series anchor that is
    /// unknown, inactive or has no value at the datum pins `top` to `0`.
    pub fn on_pointer_move(&mut self, context: &ChartContext, x: f64, y: f64) -> ChartResult<&TooltipState> {
        let resolved = resolve_nearest(context.data(), context.x_scale(), x);
        let Some(index) = resolved else {
            trace!(x, "pointer resolved to no datum");
            self.state = TooltipState::Hidden;
            return Ok(&self.state);
        };

        let datum = &context.data()[index];
        let left = context.x_scale().center_of(datum.date).unwrap_or(x);
        let top = match &self.anchor {
            TooltipAnchor::Series(id) => context
                .active_series()
                .find(|series| series.id() == id)
                .and_then(|series| series.value_of(datum))
                .map_or(0.0, |value| context.y_scale().map(value)),
            TooltipAnchor::Pointer => y,
            TooltipAnchor::Fixed => 0.0,
        };

        trace!(index, left, top, "tooltip showing");
        self.state = TooltipState::Showing(TooltipPosition {
            index,
            datum: datum.clone(),
            left,
            top,
        });
        Ok(&self.state)
    }

    pub fn on_pointer_leave(&mut self) {
        if self.state.is_showing() {
            trace!("tooltip hidden");
        }
        self.state = TooltipState::Hidden;
    }

    pub fn on_touch_move(&mut self, context: &ChartContext, x: f64, y: f64) -> ChartResult<&TooltipState> {
        self.on_pointer_move(context, x, y)
    }

    pub fn on_touch_end(&mut self) {
        self.on_pointer_leave();
    }

    /// Invokes `render` with the highlighted datum, if any.
    pub fn tooltip_content<T>(&self, render: impl FnOnce(&Datum) -> T) -> Option<T> {
        self.state.position().map(|position| render(&position.datum))
    }
}
