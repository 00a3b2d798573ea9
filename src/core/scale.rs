use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Linear mapping from a numeric domain to a pixel range.
///
/// The range may be reversed (`[height, 0]`) so larger values sit higher on
/// screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a domain value to a pixel coordinate. Not clamped.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps a pixel coordinate back into the domain.
    ///
    /// Returns `None` for non-finite input or a collapsed range.
    #[must_use]
    pub fn invert(self, pixel: f64) -> Option<f64> {
        let span = self.range_end - self.range_start;
        if !pixel.is_finite() || span == 0.0 {
            return None;
        }
        let normalized = (pixel - self.range_start) / span;
        Some(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Evenly spaced "nice" values (1, 2 or 5 times a power of ten) inside
    /// the domain, approximately `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }
        let lo = self.domain_start.min(self.domain_end);
        let hi = self.domain_start.max(self.domain_end);

        let raw_step = (hi - lo) / count as f64;
        let power = raw_step.log10().floor();
        let error = raw_step / 10f64.powf(power);
        let factor = if error >= 50f64.sqrt() {
            10.0
        } else if error >= 10f64.sqrt() {
            5.0
        } else if error >= 2f64.sqrt() {
            2.0
        } else {
            1.0
        };

        // Negative powers divide by an integral inverse to keep ticks like
        // 0.3 exact instead of 0.30000000000000004.
        if power >= 0.0 {
            let step = factor * 10f64.powf(power);
            integer_steps((lo / step).ceil(), (hi / step).floor())
                .map(|i| i * step)
                .collect()
        } else {
            let inverse = 10f64.powf(-power) / factor;
            integer_steps((lo * inverse).ceil(), (hi * inverse).floor())
                .map(|i| i / inverse)
                .collect()
        }
    }
}

fn integer_steps(first: f64, last: f64) -> impl Iterator<Item = f64> {
    let count = if first.is_finite() && last.is_finite() && last >= first {
        (last - first) as usize + 1
    } else {
        0
    };
    (0..count).map(move |i| first + i as f64)
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn ticks_use_one_two_five_steps() {
        let scale = LinearScale::new((0.0, 100.0), (300.0, 0.0)).expect("scale");
        assert_eq!(scale.ticks(4), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(scale.ticks(10), vec![
            0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0
        ]);
    }

    #[test]
    fn fractional_ticks_stay_exact() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0)).expect("scale");
        let ticks = scale.ticks(5);
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn reversed_range_maps_max_to_top() {
        let scale = LinearScale::new((10.0, 20.0), (200.0, 0.0)).expect("scale");
        assert_eq!(scale.map(20.0), 0.0);
        assert_eq!(scale.map(10.0), 200.0);
        assert_eq!(scale.invert(100.0), Some(15.0));
    }
}
