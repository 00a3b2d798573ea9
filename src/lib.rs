//! timeline-chart: headless time-series chart core.
//!
//! Builds scales from a dataset and a list of series accessors, picks
//! bottom-axis tick strides, resolves pointer positions to the nearest datum
//! for tooltips, and projects series into area/bar geometry. Drawing is left
//! to any [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, TimeSeriesChart};
pub use error::{ChartError, ChartResult};
