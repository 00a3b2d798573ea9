use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::error::{ChartError, ChartResult};

/// Half-width applied around a single timestamp so a one-point domain still
/// has a non-zero span.
const COLLAPSED_DOMAIN_HALF_SPAN: TimeDelta = TimeDelta::seconds(1);

/// Continuous, invertible mapping from `[start, end]` to `[0, width]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, width: f64) -> ChartResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ChartError::InvalidData(
                "time scale width must be finite and > 0".to_owned(),
            ));
        }

        let (start, end) = if start == end {
            (
                start - COLLAPSED_DOMAIN_HALF_SPAN,
                end + COLLAPSED_DOMAIN_HALF_SPAN,
            )
        } else {
            (start.min(end), start.max(end))
        };

        let linear = LinearScale::new(
            (datetime_to_unix_millis(start), datetime_to_unix_millis(end)),
            (0.0, width),
        )?;
        Ok(Self { start, end, linear })
    }

    #[must_use]
    pub fn domain(self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.linear.range().1
    }

    #[must_use]
    pub fn map(self, date: DateTime<Utc>) -> f64 {
        self.linear.map(datetime_to_unix_millis(date))
    }

    /// Pixel to date. Positions outside `[0, width]` extrapolate linearly.
    #[must_use]
    pub fn invert(self, pixel: f64) -> Option<DateTime<Utc>> {
        self.linear.invert(pixel).and_then(unix_millis_to_datetime)
    }
}
