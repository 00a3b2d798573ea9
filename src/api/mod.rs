mod axis;
mod axis_label_format;
mod chart;
mod config;
mod layout;
mod layout_helpers;
mod render_frame_builder;
mod series_renderer;
mod snapshot;

pub use axis::{
    BottomAxisLayout, BottomTick, LeftAxisLayout, LeftTick, default_left_num_ticks,
    layout_bottom_axis, layout_left_axis,
};
pub use axis_label_format::{
    DateLabelFormatter, ValueLabelFormatter, format_compact_number, format_date_label,
};
pub use chart::TimeSeriesChart;
pub use config::{AnimationConfig, BottomAxisConfig, ChartConfig, ChartStyle, LeftAxisConfig};
pub use layout::{ResolvedLayout, resolve_layout};
pub use layout_helpers::LeftMarginState;
pub use series_renderer::{
    SeriesGeometry, SeriesLayer, SeriesMarker, TransitionSet, project_series_layers,
};
pub use snapshot::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1};
