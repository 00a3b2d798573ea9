//! Frame-clock driven series transitions.
//!
//! Each active series owns one [`SeriesTransition`]. A transition is keyed by
//! the series id and the visible date window; a new key starts a fresh take
//! from a zeroed baseline instead of tweening across windows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of one animation take.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionKey {
    pub series_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl TransitionKey {
    #[must_use]
    pub fn new(series_id: impl Into<String>, start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self {
            series_id: series_id.into(),
            start_date,
            end_date,
        }
    }
}

/// How a call to [`SeriesTransition::retarget`] affected the take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetargetOutcome {
    /// Same key, same values.
    Unchanged,
    /// Same key, new values: animates from what is currently displayed.
    Retargeted,
    /// New key or new point count: restarted from the zeroed baseline.
    Restarted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesTransition {
    key: TransitionKey,
    from: Vec<Option<f64>>,
    to: Vec<Option<f64>>,
    elapsed_seconds: f64,
    duration_seconds: f64,
}

impl SeriesTransition {
    /// Starts an entrance take from every value mapped to `0`.
    #[must_use]
    pub fn enter(key: TransitionKey, target: Vec<Option<f64>>, duration_seconds: f64) -> Self {
        Self {
            key,
            from: zeroed_baseline(&target),
            to: target,
            elapsed_seconds: 0.0,
            duration_seconds: sanitize_duration(duration_seconds),
        }
    }

    #[must_use]
    pub fn key(&self) -> &TransitionKey {
        &self.key
    }

    pub fn retarget(&mut self, key: TransitionKey, target: Vec<Option<f64>>) -> RetargetOutcome {
        if key != self.key || target.len() != self.to.len() {
            *self = Self::enter(key, target, self.duration_seconds);
            return RetargetOutcome::Restarted;
        }
        if target == self.to {
            return RetargetOutcome::Unchanged;
        }
        self.from = self.current_values();
        self.to = target;
        self.elapsed_seconds = 0.0;
        RetargetOutcome::Retargeted
    }

    /// Advances the frame clock by `delta_seconds` (negative deltas ignored).
    pub fn advance(&mut self, delta_seconds: f64) {
        if delta_seconds.is_finite() && delta_seconds > 0.0 {
            self.elapsed_seconds = (self.elapsed_seconds + delta_seconds).min(self.duration_seconds);
        }
    }

    /// Linear progress `t` in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration_seconds <= 0.0 {
            return 1.0;
        }
        (self.elapsed_seconds / self.duration_seconds).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Values to draw at the current progress.
    #[must_use]
    pub fn current_values(&self) -> Vec<Option<f64>> {
        let eased = ease_out_cubic(self.progress());
        self.from
            .iter()
            .zip(&self.to)
            .map(|(from, to)| match (from, to) {
                (Some(from), Some(to)) => Some(from + (to - from) * eased),
                (None, Some(to)) => Some(to * eased),
                (_, None) => None,
            })
            .collect()
    }
}

/// Same shape as `values` with every defined value replaced by `0`.
#[must_use]
pub fn zeroed_baseline(values: &[Option<f64>]) -> Vec<Option<f64>> {
    values.iter().map(|value| value.map(|_| 0.0)).collect()
}

#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

fn sanitize_duration(duration_seconds: f64) -> f64 {
    if duration_seconds.is_finite() && duration_seconds > 0.0 {
        duration_seconds
    } else {
        0.0
    }
}
