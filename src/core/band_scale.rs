use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Upper bound on band padding so bars never collapse on dense datasets.
pub const MAX_BAND_PADDING: f64 = 0.75;

/// Padding ratio between bands: `min(0.75, (width / point_count) * 0.02)`.
#[must_use]
pub fn band_padding_for(width: f64, point_count: usize) -> f64 {
    if point_count == 0 || !width.is_finite() || width <= 0.0 {
        return 0.0;
    }
    (width / point_count as f64 * 0.02).min(MAX_BAND_PADDING)
}

/// Discrete scale assigning each distinct date an evenly spaced slot.
///
/// Padding is applied both between bands and at the outer edges, with the
/// bands centred in `[0, width]`. There is no inverse; pointer positions are
/// resolved to slots by index arithmetic in [`BandScale::slot_at`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: Vec<DateTime<Utc>>,
    width: f64,
    padding: f64,
    offset: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Builds a band scale over `dates`, which must be sorted ascending.
    /// Repeated dates share one band.
    pub fn new(dates: impl IntoIterator<Item = DateTime<Utc>>, width: f64, padding: f64) -> ChartResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ChartError::InvalidData(
                "band scale width must be finite and > 0".to_owned(),
            ));
        }
        if !padding.is_finite() || !(0.0..=1.0).contains(&padding) {
            return Err(ChartError::InvalidData(
                "band padding must be finite and in [0, 1]".to_owned(),
            ));
        }

        let mut domain: Vec<DateTime<Utc>> = dates.into_iter().collect();
        if domain.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(ChartError::InvalidData(
                "band scale dates must be sorted ascending".to_owned(),
            ));
        }
        domain.dedup();

        let n = domain.len() as f64;
        let step = width / (n - padding + padding * 2.0).max(1.0);
        let offset = (width - step * (n - padding)) * 0.5;
        let bandwidth = step * (1.0 - padding);

        Ok(Self {
            domain,
            width,
            padding,
            offset,
            step,
            bandwidth,
        })
    }

    #[must_use]
    pub fn domain(&self) -> &[DateTime<Utc>] {
        &self.domain
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn index_of(&self, date: DateTime<Utc>) -> Option<usize> {
        self.domain.binary_search(&date).ok()
    }

    /// Left edge of the band for `date`.
    #[must_use]
    pub fn map(&self, date: DateTime<Utc>) -> Option<f64> {
        self.index_of(date).map(|index| self.position_at(index))
    }

    #[must_use]
    pub fn position_at(&self, index: usize) -> f64 {
        self.offset + self.step * index as f64
    }

    /// Slot index under a pointer, or `None` outside the banded area.
    #[must_use]
    pub fn slot_at(&self, pixel: f64) -> Option<usize> {
        if !pixel.is_finite() || self.step <= 0.0 || self.domain.is_empty() {
            return None;
        }
        // round((x - step / 2) / step) with halves rounded up, so a band's
        // left edge belongs to that band.
        let slot = ((pixel - self.offset) / self.step).floor();
        if slot < 0.0 || slot >= self.domain.len() as f64 {
            return None;
        }
        Some(slot as usize)
    }

    /// Date under a pointer, or `None` outside the banded area.
    #[must_use]
    pub fn date_at(&self, pixel: f64) -> Option<DateTime<Utc>> {
        self.slot_at(pixel).map(|slot| self.domain[slot])
    }
}
