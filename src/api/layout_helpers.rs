use tracing::debug;

pub(super) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    // Deterministic and backend-independent; no text shaping available here.
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' | '$' => 0.42,
            'K' | 'M' | 'B' => 0.68,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Left margin fed back from the measured left-axis labels.
///
/// Only grows, so labels never make the plotting area jitter back and forth
/// within one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeftMarginState {
    floor: f64,
    current: f64,
}

impl LeftMarginState {
    #[must_use]
    pub fn new(floor: f64) -> Self {
        let floor = if floor.is_finite() { floor.max(0.0) } else { 0.0 };
        Self {
            floor,
            current: floor,
        }
    }

    #[must_use]
    pub fn current(self) -> f64 {
        self.current
    }

    /// Raises the margin to `required` if larger. Returns `true` on growth.
    pub fn grow_to(&mut self, required: f64) -> bool {
        if !required.is_finite() || required <= self.current {
            return false;
        }
        debug!(from = self.current, to = required, "left margin grew");
        self.current = required;
        true
    }

    /// Starts a new session at the configured floor.
    pub fn reset(&mut self, floor: f64) {
        *self = Self::new(floor);
    }
}
