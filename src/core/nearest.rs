//! Pointer-to-datum resolution by date bisection.

use chrono::{DateTime, Utc};
use smallvec::SmallVec;

use crate::core::primitives::abs_millis_between;
use crate::core::{Datum, XScale};

/// First index in `data[lo..]` whose date is `>= date`, as an absolute index.
///
/// `data` must be sorted ascending by date.
#[must_use]
pub fn bisect_date_left(data: &[Datum], date: DateTime<Utc>, lo: usize) -> usize {
    let lo = lo.min(data.len());
    lo + data[lo..].partition_point(|datum| datum.date < date)
}

/// Index of the datum closest in time to `date`; ties go to the earlier one.
#[must_use]
pub fn nearest_index_by_date(data: &[Datum], date: DateTime<Utc>) -> Option<usize> {
    if data.is_empty() {
        return None;
    }
    let index = bisect_date_left(data, date, 1);

    let mut candidates: SmallVec<[(i64, usize); 2]> = SmallVec::new();
    candidates.push((abs_millis_between(date, data[index - 1].date), index - 1));
    if let Some(next) = data.get(index) {
        candidates.push((abs_millis_between(next.date, date), index));
    }

    // `min_by_key` keeps the first minimum, so ties resolve to `index - 1`.
    candidates
        .into_iter()
        .min_by_key(|(delta, _)| *delta)
        .map(|(_, idx)| idx)
}

/// Resolves a chart-local pointer x to the nearest datum index.
///
/// `None` means the pointer maps to no data (empty dataset or a position
/// the scale cannot invert); callers hide the tooltip in that case.
#[must_use]
pub fn resolve_nearest(data: &[Datum], x_scale: &XScale, pointer_x: f64) -> Option<usize> {
    let candidate = x_scale.date_at(pointer_x)?;
    nearest_index_by_date(data, candidate)
}
