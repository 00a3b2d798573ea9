use std::sync::Arc;

use tracing::trace;

use crate::core::{ChartContext, ContextParams, Datum, Series};
use crate::error::ChartResult;

use super::axis::{LeftAxisLayout, layout_left_axis};
use super::layout_helpers::LeftMarginState;
use super::ChartConfig;

const MIN_INNER_WIDTH_PX: f64 = 1.0;

/// Context plus the left axis measured against it.
#[derive(Debug, Clone)]
pub struct ResolvedLayout {
    pub context: ChartContext,
    pub left_axis: LeftAxisLayout,
}

/// One layout pass with label-width feedback into the left margin.
///
/// Left-axis labels depend only on the value domain and inner height, and
/// neither changes with the left margin, so a single rebuild reaches the
/// fixed point.
pub fn resolve_layout(
    data: &Arc<[Datum]>,
    series: &Arc<[Series]>,
    config: &ChartConfig,
    margin_state: &mut LeftMarginState,
    format_value: &dyn Fn(f64) -> String,
) -> ChartResult<ResolvedLayout> {
    let build = |left: f64| {
        let mut margin = config.margin;
        margin.left = left;
        ChartContext::build(
            Arc::clone(data),
            Arc::clone(series),
            ContextParams {
                viewport: config.viewport,
                kind: config.kind,
                margin,
                padding: config.padding,
                max_ticks: config.max_ticks,
            },
        )
    };
    let measure = |context: &ChartContext| {
        layout_left_axis(
            context,
            &config.left_axis,
            config.style.font_size_px,
            format_value,
        )
    };

    // The grown margin never takes the inner width below MIN_INNER_WIDTH_PX.
    let cap = (f64::from(config.viewport.width) - config.margin.right - MIN_INNER_WIDTH_PX)
        .max(config.margin.left);

    let mut context = build(margin_state.current().min(cap))?;
    let mut left_axis = measure(&context);
    if margin_state.grow_to(left_axis.required_width.min(cap)) {
        context = build(margin_state.current().min(cap))?;
        left_axis = measure(&context);
    }
    trace!(
        left_margin = margin_state.current(),
        left_ticks = left_axis.ticks.len(),
        "resolved layout"
    );

    Ok(ResolvedLayout { context, left_axis })
}
