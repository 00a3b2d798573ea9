use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{BandScale, TimeScale};
use crate::error::{ChartError, ChartResult};

/// Horizontal scale of a chart: continuous time for area charts, bands for
/// bar charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XScale {
    Time(TimeScale),
    Band(BandScale),
}

impl XScale {
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Time(_) => "time",
            Self::Band(_) => "band",
        }
    }

    pub fn as_time(&self) -> ChartResult<&TimeScale> {
        match self {
            Self::Time(scale) => Ok(scale),
            Self::Band(_) => Err(ChartError::ScaleKindMismatch {
                expected: "time",
                actual: self.kind_name(),
            }),
        }
    }

    pub fn as_band(&self) -> ChartResult<&BandScale> {
        match self {
            Self::Band(scale) => Ok(scale),
            Self::Time(_) => Err(ChartError::ScaleKindMismatch {
                expected: "band",
                actual: self.kind_name(),
            }),
        }
    }

    /// Pixel position of `date`: the mapped instant for time scales, the
    /// band centre for band scales.
    #[must_use]
    pub fn center_of(&self, date: DateTime<Utc>) -> Option<f64> {
        match self {
            Self::Time(scale) => Some(scale.map(date)),
            Self::Band(scale) => scale.map(date).map(|left| left + scale.bandwidth() * 0.5),
        }
    }

    /// Candidate date under a chart-local pointer position.
    #[must_use]
    pub fn date_at(&self, pixel: f64) -> Option<DateTime<Utc>> {
        match self {
            Self::Time(scale) => scale.invert(pixel),
            Self::Band(scale) => scale.date_at(pixel),
        }
    }
}
