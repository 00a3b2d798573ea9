pub mod area_series;
pub mod band_scale;
pub mod bar_series;
pub mod context;
pub mod nearest;
pub mod primitives;
pub mod scale;
pub mod scale_builder;
pub mod series;
pub mod ticks;
pub mod time_scale;
pub mod transition;
pub mod types;
pub mod x_scale;

pub use area_series::{AreaGeometry, AreaSegment, AreaVertex, SeriesSample, project_area_geometry};
pub use band_scale::{BandScale, band_padding_for};
pub use bar_series::{BarGeometry, project_bars};
pub use context::{ChartContext, ContextParams};
pub use nearest::{bisect_date_left, nearest_index_by_date, resolve_nearest};
pub use scale::LinearScale;
pub use scale_builder::{
    ChartScales, ScaleInput, active_value_extent, build_scales, date_extent, padded_value_domain,
};
pub use series::{Series, ValueAccessor, validate_series_ids};
pub use ticks::{default_max_ticks, tick_indices, tick_stride};
pub use time_scale::TimeScale;
pub use transition::{RetargetOutcome, SeriesTransition, TransitionKey, zeroed_baseline};
pub use types::{ChartKind, Datum, Margin, Padding, Viewport, ensure_sorted_by_date};
pub use x_scale::XScale;
