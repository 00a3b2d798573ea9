//! Bottom-axis tick stride selection.
//!
//! Ticks are placed on real data indices, evenly spaced in index space.

/// Default tick budget for an inner chart width.
#[must_use]
pub fn default_max_ticks(width: f64) -> usize {
    if width < 450.0 {
        6
    } else if width < 900.0 {
        8
    } else {
        12
    }
}

/// Smallest factor `f` of `point_count` (ascending from 1, `point_count`
/// itself included) with `point_count / f < max_ticks`.
///
/// Falls back to 1 when no factor qualifies, which includes large prime
/// lengths; that fallback yields one tick per point.
#[must_use]
pub fn tick_stride(point_count: usize, max_ticks: usize) -> usize {
    if point_count == 0 {
        return 1;
    }
    (1..=point_count)
        .find(|factor| point_count % factor == 0 && point_count / factor < max_ticks)
        .unwrap_or(1)
}

/// Data indices that receive a tick: `0, stride, 2 * stride, ...`.
#[must_use]
pub fn tick_indices(point_count: usize, stride: usize) -> Vec<usize> {
    (0..point_count).step_by(stride.max(1)).collect()
}
