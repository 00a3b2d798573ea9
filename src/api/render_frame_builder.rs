use crate::core::ChartContext;
use crate::interaction::TooltipState;
use crate::render::{
    CirclePrimitive, FontWeight, LinePrimitive, PolygonPrimitive, PolylinePrimitive,
    RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::axis::{BottomAxisLayout, LeftAxisLayout};
use super::series_renderer::{SeriesGeometry, SeriesLayer};
use super::ChartConfig;

const GRID_STROKE_PX: f64 = 1.0;
const BOTTOM_LABEL_OFFSET_PX: f64 = 6.0;

/// Inputs for one draw pass. Geometry in the layouts is chart-local.
pub(super) struct FrameInputs<'a> {
    pub context: &'a ChartContext,
    pub config: &'a ChartConfig,
    pub left_axis: &'a LeftAxisLayout,
    pub bottom_axis: &'a BottomAxisLayout,
    pub layers: &'a [SeriesLayer],
    pub tooltip: &'a TooltipState,
}

/// Translates chart-local layouts into a viewport-space frame.
pub(super) fn build_frame(inputs: FrameInputs<'_>) -> RenderFrame {
    let FrameInputs {
        context,
        config,
        left_axis,
        bottom_axis,
        layers,
        tooltip,
    } = inputs;
    let style = &config.style;
    let margin = context.margin();
    let (ox, oy) = (margin.left, margin.top);
    let (width, height) = (context.width(), context.height());

    let mut frame = RenderFrame::new(context.viewport());

    if config.left_axis.show_grid {
        for tick in &left_axis.ticks {
            frame.lines.push(LinePrimitive::new(
                ox,
                oy + tick.y,
                ox + width,
                oy + tick.y,
                GRID_STROKE_PX,
                style.grid_color,
            ));
        }
    }
    if config.bottom_axis.show_grid {
        for tick in &bottom_axis.ticks {
            frame.lines.push(LinePrimitive::new(
                ox + tick.x,
                oy,
                ox + tick.x,
                oy + height,
                GRID_STROKE_PX,
                style.grid_color,
            ));
        }
    }

    for layer in layers {
        match &layer.geometry {
            SeriesGeometry::Area(area) => {
                for segment in &area.segments {
                    frame.polygons.push(PolygonPrimitive {
                        points: segment
                            .fill_polygon
                            .iter()
                            .map(|v| (ox + v.x, oy + v.y))
                            .collect(),
                        fill_color: layer.color.with_alpha(style.area_fill_alpha),
                    });
                    frame.polylines.push(PolylinePrimitive {
                        points: segment
                            .line_points
                            .iter()
                            .map(|v| (ox + v.x, oy + v.y))
                            .collect(),
                        stroke_width: style.line_width,
                        color: layer.color,
                    });
                }
            }
            SeriesGeometry::Bars(bars) => {
                frame.rects.extend(bars.iter().map(|bar| {
                    RectPrimitive::new(ox + bar.x, oy + bar.y, bar.width, bar.height, layer.color)
                }));
            }
        }
        if let Some(marker) = layer.marker {
            frame.circles.push(CirclePrimitive {
                cx: ox + marker.x,
                cy: oy + marker.y,
                radius: style.marker_radius,
                fill_color: layer.color,
                stroke_color: style.background_color,
                stroke_width: GRID_STROKE_PX,
            });
        }
    }

    if let Some(position) = tooltip.position() {
        frame.lines.push(LinePrimitive::new(
            ox + position.left,
            oy,
            ox + position.left,
            oy + height,
            GRID_STROKE_PX,
            style.guide_line_color,
        ));
    }

    let label_x = ox - config.left_axis.label_gap_px * 0.5;
    // Empty labels are suppressed by the formatter.
    for tick in left_axis.ticks.iter().filter(|tick| !tick.label.is_empty()) {
        frame.texts.push(TextPrimitive::new(
            tick.label.clone(),
            label_x,
            oy + tick.y,
            style.font_size_px,
            style.label_color,
            TextHAlign::Right,
        ));
    }

    let label_y = oy + height + style.font_size_px + BOTTOM_LABEL_OFFSET_PX;
    for tick in bottom_axis.ticks.iter().filter(|tick| !tick.label.is_empty()) {
        let (color, weight) = if tick.highlighted {
            (style.highlighted_label_color, FontWeight::Bold)
        } else {
            (style.label_color, FontWeight::Normal)
        };
        frame.texts.push(
            TextPrimitive::new(
                tick.label.clone(),
                ox + tick.x,
                label_y,
                style.font_size_px,
                color,
                TextHAlign::Center,
            )
            .with_weight(weight),
        );
    }

    frame
}
