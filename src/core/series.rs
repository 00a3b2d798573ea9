use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::core::Datum;
use crate::error::{ChartError, ChartResult};

/// Extracts one numeric value from a datum. `None` means "no value here".
pub type ValueAccessor = Arc<dyn Fn(&Datum) -> Option<f64> + Send + Sync>;

/// A named value accessor applied uniformly across a dataset.
#[derive(Clone)]
pub struct Series {
    id: String,
    accessor: ValueAccessor,
    is_active: bool,
}

impl Series {
    pub fn new<F>(id: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&Datum) -> Option<f64> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            accessor: Arc::new(accessor),
            is_active: true,
        }
    }

    /// Series reading `datum.values[key]`.
    pub fn from_key(id: impl Into<String>, key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(id, move |datum: &Datum| datum.value(&key))
    }

    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    /// Applies the accessor, discarding non-finite results.
    #[must_use]
    pub fn value_of(&self, datum: &Datum) -> Option<f64> {
        (self.accessor)(datum).filter(|v| v.is_finite())
    }

    /// Values of this series across `data`, index-aligned with the dataset.
    #[must_use]
    pub fn values(&self, data: &[Datum]) -> Vec<Option<f64>> {
        data.iter().map(|datum| self.value_of(datum)).collect()
    }
}

impl fmt::Debug for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Series")
            .field("id", &self.id)
            .field("is_active", &self.is_active)
            .finish_non_exhaustive()
    }
}

pub fn validate_series_ids(series: &[Series]) -> ChartResult<()> {
    let mut seen = HashSet::with_capacity(series.len());
    for item in series {
        if item.id.is_empty() {
            return Err(ChartError::InvalidData(
                "series id must not be empty".to_owned(),
            ));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(ChartError::DuplicateSeries(item.id.clone()));
        }
    }
    Ok(())
}
