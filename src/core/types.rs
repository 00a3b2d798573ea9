use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::{ChartError, ChartResult};

/// Outer pixel size of a chart, margins included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(600, 300)
    }
}

/// Whether the X axis is a continuous time axis or a discrete band axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Area,
    Bar,
}

impl ChartKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Bar => "bar",
        }
    }
}

/// Pixel space reserved around the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 12.0,
            right: 4.0,
            bottom: 32.0,
            left: 4.0,
        }
    }
}

impl Margin {
    pub fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Fractions of the value range added below and above the data extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 0.1,
            bottom: 0.1,
        }
    }
}

impl Padding {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.top.is_finite() || !self.bottom.is_finite() || self.top < 0.0 || self.bottom < 0.0
        {
            return Err(ChartError::InvalidConfig(
                "padding ratios must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// One timestamped observation with a map of named values.
///
/// Value keys keep insertion order so serialized datasets stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub values: IndexMap<String, f64>,
}

impl Datum {
    #[must_use]
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            date,
            values: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Adds a value sourced from an exact decimal (e.g. revenue amounts).
    pub fn with_decimal_value(self, key: impl Into<String>, value: Decimal) -> ChartResult<Self> {
        let key = key.into();
        let value = decimal_to_f64(value, &key)?;
        Ok(self.with_value(key, value))
    }

    /// Returns the finite value stored under `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied().filter(|v| v.is_finite())
    }
}

/// Returns an error when `data` is not sorted ascending by date.
///
/// Datasets are never re-sorted; the check only guards the bisection paths.
pub fn ensure_sorted_by_date(data: &[Datum]) -> ChartResult<()> {
    if let Some(position) = data.windows(2).position(|pair| pair[1].date < pair[0].date) {
        return Err(ChartError::InvalidData(format!(
            "data must be sorted ascending by date (out of order at index {})",
            position + 1
        )));
    }
    Ok(())
}
