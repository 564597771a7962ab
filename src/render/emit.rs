use tracing::{trace, warn};

use crate::core::Rect;
use crate::data::SelectionId;
use crate::layout::{
    AxisGeometry, BulletGeometry, MarkerGeometry, PointGeometry, RectMark, TextAnchor, TextMark,
};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};
use crate::settings::Orientation;

/// Opacity of bullets outside the current selection.
pub const UNSELECTED_OPACITY: f64 = 0.3;
const AXIS_STROKE_WIDTH: f64 = 1.0;
const AXIS_TICK_PADDING: f64 = 3.0;

/// Translation from chart-local geometry into viewport pixels.
#[derive(Debug, Clone, Copy)]
struct Emitter {
    dx: f64,
    dy: f64,
}

impl Emitter {
    fn color(self, hex: &str, opacity: f64) -> Color {
        Color::from_hex(hex, opacity).unwrap_or_else(|err| {
            warn!(color = hex, error = %err, "unparsable mark color; using black");
            Color::BLACK.with_alpha(opacity.clamp(0.0, 1.0))
        })
    }

    fn rect(self, rect: Rect, fill: Color) -> RectPrimitive {
        let rect = rect.translated(self.dx, self.dy);
        RectPrimitive::new(rect.x, rect.y, rect.width, rect.height, fill)
    }

    fn rect_mark(self, mark: &RectMark, dim: Option<f64>) -> RectPrimitive {
        self.rect(mark.rect, self.color(&mark.color, dim.unwrap_or(mark.opacity)))
    }

    fn text(self, mark: &TextMark) -> TextPrimitive {
        let h_align = match mark.anchor {
            TextAnchor::Start => TextHAlign::Left,
            TextAnchor::Middle => TextHAlign::Center,
            TextAnchor::End => TextHAlign::Right,
        };
        TextPrimitive::new(
            mark.text.clone(),
            mark.position.x + self.dx,
            mark.position.y + self.dy,
            mark.font.size_px,
            self.color(&mark.color, 1.0),
            h_align,
        )
        .with_font_family(mark.font.family.clone())
        .rotated(
            mark.rotation,
            mark.rotation_origin.x + self.dx,
            mark.rotation_origin.y + self.dy,
        )
        .offset(mark.offset.x, mark.offset.y)
    }

    fn point(self, frame: &mut RenderFrame, point: &PointGeometry, dim: Option<f64>) {
        for band in &point.bands {
            let fill = self.color(&band.color, dim.unwrap_or(band.opacity));
            frame.rects.push(self.rect(band.rect, fill));
        }
        for bar in [&point.comparison, &point.measure].into_iter().flatten() {
            frame.rects.push(self.rect_mark(bar, dim));
        }
        // The highlight overlay and the data label never dim with the selection.
        if let Some(highlight) = &point.highlight {
            frame.rects.push(self.rect_mark(highlight, None));
        }

        for marker in &point.markers {
            let color = self.color(&marker.color, dim.unwrap_or(marker.opacity));
            let stroke = marker.stroke_width;
            match marker.geometry {
                MarkerGeometry::Line { from, to } => frame.lines.push(LinePrimitive::new(
                    from.x + self.dx,
                    from.y + self.dy,
                    to.x + self.dx,
                    to.y + self.dy,
                    stroke,
                    color,
                )),
                MarkerGeometry::Cross { first, second } => {
                    for (from, to) in [first, second] {
                        frame.lines.push(LinePrimitive::new(
                            from.x + self.dx,
                            from.y + self.dy,
                            to.x + self.dx,
                            to.y + self.dy,
                            stroke,
                            color,
                        ));
                    }
                }
                MarkerGeometry::Circle { center, radius } => frame.circles.push(
                    CirclePrimitive::new(center.x + self.dx, center.y + self.dy, radius, color),
                ),
                MarkerGeometry::Square { rect } => frame.rects.push(self.rect(rect, color)),
            }
        }

        if let Some(label) = point.label.as_ref().filter(|label| !label.text.is_empty()) {
            frame.texts.push(self.text(label));
        }
        if let Some(label) = point.data_label.as_ref().filter(|label| !label.text.is_empty()) {
            frame.texts.push(self.text(label));
        }
    }

    fn axis(self, frame: &mut RenderFrame, axis: &AxisGeometry) {
        let color = self.color(&axis.color, 1.0);
        let h_align = match axis.orientation {
            Orientation::Vertical => TextHAlign::Right,
            Orientation::Horizontal => TextHAlign::Center,
        };
        for tick in &axis.ticks {
            let (line, anchor) = match axis.orientation {
                // Left axis: grid lines run from the container's left edge to the origin.
                Orientation::Vertical => {
                    let y = axis.origin.y + tick.position + self.dy;
                    let x2 = axis.origin.x + self.dx;
                    let x1 = x2 - axis.tick_size;
                    (
                        LinePrimitive::new(x1, y, x2, y, AXIS_STROKE_WIDTH, color),
                        (x1 - AXIS_TICK_PADDING, y),
                    )
                }
                Orientation::Horizontal => {
                    let x = axis.origin.x + tick.position + self.dx;
                    let y1 = axis.origin.y + self.dy;
                    let y2 = y1 + axis.tick_size;
                    (
                        LinePrimitive::new(x, y1, x, y2, AXIS_STROKE_WIDTH, color),
                        (x, y2 + AXIS_TICK_PADDING + axis.font.size_px),
                    )
                }
            };
            frame.lines.push(line);
            if !tick.label.is_empty() {
                frame.texts.push(
                    TextPrimitive::new(
                        tick.label.clone(),
                        anchor.0,
                        anchor.1,
                        axis.font.size_px,
                        color,
                        h_align,
                    )
                    .with_font_family(axis.font.family.clone()),
                );
            }
        }
    }
}

/// Turns laid-out geometry into draw primitives in viewport coordinates.
///
/// While `selection` is non-empty, the bands, bars and markers of every bullet
/// whose handle is not in it are emitted at [`UNSELECTED_OPACITY`].
#[must_use]
pub fn emit_frame(geometry: &BulletGeometry, selection: &[SelectionId]) -> RenderFrame {
    let mut frame = RenderFrame::new(geometry.viewport);
    frame.vision = geometry.vision;
    if geometry.is_empty() {
        return frame;
    }

    let emitter = Emitter {
        dx: geometry.margin.left,
        dy: geometry.margin.top,
    };
    if let Some(axis) = &geometry.axis {
        emitter.axis(&mut frame, axis);
    }
    for point in &geometry.points {
        let selected = selection.is_empty()
            || point
                .selection
                .as_ref()
                .is_some_and(|handle| selection.contains(handle));
        let dim = (!selected).then_some(UNSELECTED_OPACITY);
        emitter.point(&mut frame, point, dim);
    }

    trace!(
        rects = frame.rects.len(),
        circles = frame.circles.len(),
        lines = frame.lines.len(),
        texts = frame.texts.len(),
        "emitted frame"
    );
    frame
}
