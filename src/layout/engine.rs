use tracing::{debug, trace};

use crate::core::format::{DISPLAY_UNIT_SYSTEM_DATA_LABELS, DISPLAY_UNIT_SYSTEM_DEFAULT};
use crate::core::text::{pt_to_px, tailor_text};
use crate::core::types::non_negative;
use crate::core::{
    Domain, FontSpec, FormatCache, FormatSpec, LinearScale, Margin, Point, Rect, Size,
    TextMeasurer, Viewport,
};
use crate::data::MarkerShape;
use crate::model::{DataPoint, ViewModel};
use crate::settings::{ComparisonOperator, LegendPosition, Orientation, VisualSettings};

use super::bands::resolve_state_bands;
use super::geometry::{
    AxisGeometry, AxisTick, BandMark, BulletGeometry, LegendFootprint, MarkerGeometry,
    MarkerMark, PointGeometry, RectMark, TextAnchor, TextMark,
};

/// Space between the chart and the viewport edges before legend and axis.
const BASE_MARGIN: Margin = Margin {
    top: 10.0,
    left: 2.0,
    bottom: 0.0,
    right: 0.0,
};
const BULLET_PADDING: f64 = 1.0;
const LABEL_PADDING: f64 = 8.0;
const AXIS_HEIGHT: f64 = 20.0;
const AXIS_GAP: f64 = 10.0;
const SCROLLBAR_ALLOWANCE: f64 = 25.0;
const HORIZONTAL_STACK_SPACING: f64 = 5.0;
const DEFAULT_MIN_SLOT: f64 = 16.0;
const LEGEND_ICON: f64 = 10.0;
const LEGEND_ICON_GAP: f64 = 5.0;
const LEGEND_PADDING: f64 = 10.0;
const LABEL_MEASURE_FAMILY: &str = "sans-serif";
const COMPARISON_DIVIDER: f64 = 10.0;
const MEASURE_DIVIDER: f64 = 5.0;
const NESTED_MEASURE_DIVIDER: f64 = 3.0;
const DIMMED_OPACITY: f64 = 0.3;
const BLANK_LABEL: &str = "(Blank)";
const DATA_LABEL_INVERTED_FILL: &str = "#fff";

/// Turns a [`ViewModel`] and a viewport into [`BulletGeometry`].
///
/// Pure apart from the formatter cache: identical inputs always produce
/// identical geometry.
pub struct LayoutEngine<'m> {
    measurer: &'m dyn TextMeasurer,
}

impl std::fmt::Debug for LayoutEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine").finish_non_exhaustive()
    }
}

/// Sizes shared by every bullet of one pass.
#[derive(Debug, Clone, Copy)]
struct Frame {
    vertical: bool,
    slot: Size,
    bullet: Size,
    label: Size,
    label_rotation: f64,
    domain: Domain,
    scale: LinearScale,
    has_highlights: bool,
}

impl Frame {
    /// Top-left corner of slot `index`.
    fn slot_origin(&self, index: usize) -> Point {
        if self.vertical {
            Point::new(index as f64 * self.slot.width, 0.0)
        } else {
            Point::new(0.0, index as f64 * self.slot.height)
        }
    }

    /// Left edge of the value axis for horizontal bullets.
    fn value_origin_x(&self, slot: Point) -> f64 {
        slot.x + self.label.width + LABEL_PADDING
    }

    fn cross_extent(&self) -> f64 {
        if self.vertical {
            self.bullet.width
        } else {
            self.bullet.height
        }
    }

    /// Bar between two scaled positions, inset by `cross / divider` on both sides.
    fn bar_rect(&self, slot: Point, from_px: f64, to_px: f64, divider: f64) -> Rect {
        if self.vertical {
            let inset = self.bullet.width / divider;
            Rect::new(
                slot.x + inset,
                slot.y + self.bullet.height - to_px,
                self.bullet.width - inset * 2.0,
                to_px - from_px,
            )
        } else {
            let inset = self.bullet.height / divider;
            Rect::new(
                self.value_origin_x(slot) + from_px,
                slot.y + inset,
                to_px - from_px,
                self.bullet.height - inset * 2.0,
            )
        }
    }

    /// Scaled `(from, to)` of a bar anchored at zero (or the domain start when above zero).
    fn bar_extent(&self, value: f64) -> (f64, f64) {
        let (from, to) = if value < 0.0 {
            (value, 0.0)
        } else {
            (self.domain.start.max(0.0), self.domain.end.min(value))
        };
        (
            self.scale.map(self.domain.clamp(from)),
            self.scale.map(self.domain.clamp(to)),
        )
    }
}

impl<'m> LayoutEngine<'m> {
    #[must_use]
    pub fn new(measurer: &'m dyn TextMeasurer) -> Self {
        Self { measurer }
    }

    #[must_use]
    pub fn layout(
        &self,
        model: &ViewModel,
        viewport: Viewport,
        cache: &mut FormatCache,
    ) -> BulletGeometry {
        let settings = &model.settings;
        let orientation = settings.general.orientation;
        let vertical = orientation.is_vertical();
        let count = model.data_points.len();
        if count == 0 {
            debug!("no data points; nothing to lay out");
            return BulletGeometry::empty(viewport, orientation, settings.color_blind.vision);
        }

        let viewport_size = Size::new(viewport.width, viewport.height).non_negative();
        let mut margin = BASE_MARGIN;
        let legend = self.reserve_legend(model, viewport_size, &mut margin);

        let axis_spec = FormatSpec {
            format: model.data_points[0].format.clone(),
            value: Some(if settings.axis.unit == 0.0 {
                model.domain.end
            } else {
                settings.axis.unit
            }),
            precision: settings.axis.precision,
            display_unit_system: DISPLAY_UNIT_SYSTEM_DEFAULT,
            culture: Some(settings.axis.locale.clone()),
            ..FormatSpec::default()
        };
        let axis_font = FontSpec::from_points(&settings.axis.font_family, settings.axis.font_size);
        if settings.axis.show {
            if vertical {
                let end_label = cache.format(model.domain.end, &axis_spec);
                margin.left += self.measurer.measure(&end_label, &axis_font).width + AXIS_GAP;
            } else {
                margin.bottom += AXIS_HEIGHT;
            }
        }

        let container = Size::new(
            viewport_size.width - margin.left - margin.right,
            viewport_size.height - margin.top - margin.bottom,
        )
        .non_negative();

        let label_font_px = pt_to_px(settings.label.font_size);
        let measure_font = FontSpec::new(LABEL_MEASURE_FAMILY, label_font_px);
        let max_label_width = model
            .data_points
            .iter()
            .map(|point| {
                let text = label_text(settings, point, count);
                self.measurer.measure(text, &measure_font).width
            })
            .fold(0.0, f64::max)
            + 2.0;

        let slot = slot_size(settings, container, count);
        let (label, label_rotation) = label_size(settings, slot, max_label_width);
        let bullet = if vertical {
            Size::new(
                slot.width - BULLET_PADDING * 2.0,
                slot.height
                    - LABEL_PADDING
                    - if label_rotation == 0.0 {
                        label.height
                    } else {
                        label.width
                    },
            )
        } else {
            Size::new(
                slot.width - label.width - LABEL_PADDING,
                slot.height - BULLET_PADDING * 2.0,
            )
        }
        .non_negative();

        let packed_extent = if vertical { bullet.height } else { bullet.width };
        let scale =
            LinearScale::new((model.domain.start, model.domain.end), (0.0, packed_extent)).nice();
        let axis_scale = if vertical {
            LinearScale::new((model.domain.start, model.domain.end), (packed_extent, 0.0)).nice()
        } else {
            scale
        };
        let (nice_start, nice_end) = axis_scale.domain();
        let domain = Domain {
            start: nice_start,
            end: nice_end,
            ..model.domain
        };

        let frame = Frame {
            vertical,
            slot,
            bullet,
            label,
            label_rotation,
            domain,
            scale,
            has_highlights: model.has_highlights,
        };

        let points = model
            .data_points
            .iter()
            .enumerate()
            .map(|(index, point)| self.layout_point(index, point, count, settings, &frame, cache))
            .collect();

        let axis = settings.axis.show.then(|| {
            let divisor = if vertical { 30.0 } else { 80.0 };
            let tick_count = ((packed_extent / divisor).floor() as usize).max(2);
            let formatter = cache.formatter(&axis_spec);
            let ticks = axis_scale
                .ticks(tick_count)
                .into_iter()
                .map(|value| AxisTick {
                    value,
                    position: axis_scale.map(value),
                    label: formatter.format(value),
                })
                .collect();
            AxisGeometry {
                orientation,
                origin: if vertical {
                    Point::new(container.width, 0.0)
                } else {
                    Point::new(label.width + LABEL_PADDING, 0.0)
                },
                ticks,
                tick_size: if vertical {
                    container.width
                } else {
                    (slot.height * count as f64).min(container.height) + LABEL_PADDING
                },
                font: axis_font.clone(),
                color: settings.axis.fill.clone(),
            }
        });

        let content = if vertical {
            Size::new(slot.width * count as f64, container.height)
        } else {
            Size::new(slot.width, slot.height * count as f64)
        };

        debug!(
            points = count,
            vertical,
            domain_start = domain.start,
            domain_end = domain.end,
            slot_width = slot.width,
            slot_height = slot.height,
            label_rotation,
            "laid out bullets"
        );

        BulletGeometry {
            viewport,
            orientation,
            margin,
            container,
            content,
            slot,
            bullet,
            label_size: label,
            label_rotation,
            max_label_width,
            domain,
            scale,
            axis_scale,
            axis,
            legend,
            points,
            has_highlights: model.has_highlights,
            vision: settings.color_blind.vision,
        }
    }

    fn reserve_legend(
        &self,
        model: &ViewModel,
        viewport: Size,
        margin: &mut Margin,
    ) -> Option<LegendFootprint> {
        let settings = &model.settings.legend;
        if !settings.show || model.legend.is_empty() {
            return None;
        }
        let font = FontSpec::from_points(LABEL_MEASURE_FAMILY, settings.font_size);
        let title = settings.show_title.then_some(settings.title_text.as_str());
        let texts = model
            .legend
            .iter()
            .map(|entry| entry.label.as_str())
            .chain(title);

        let position = settings.position;
        let area = if position.is_horizontal() {
            let line_height = texts
                .map(|text| self.measurer.measure(text, &font).height)
                .fold(0.0, f64::max);
            let reserved = line_height + LEGEND_PADDING;
            if matches!(
                position,
                LegendPosition::Top | LegendPosition::TopCenter
            ) {
                margin.top += reserved;
                Rect::new(0.0, 0.0, viewport.width, reserved)
            } else {
                margin.bottom += reserved;
                Rect::new(0.0, viewport.height - reserved, viewport.width, reserved)
            }
        } else {
            let widest = texts
                .map(|text| self.measurer.measure(text, &font).width)
                .fold(0.0, f64::max);
            let reserved = LEGEND_ICON + LEGEND_ICON_GAP + widest + LEGEND_PADDING;
            if matches!(
                position,
                LegendPosition::Left | LegendPosition::LeftCenter
            ) {
                margin.left += reserved;
                Rect::new(0.0, 0.0, reserved, viewport.height)
            } else {
                margin.right += reserved;
                Rect::new(viewport.width - reserved, 0.0, reserved, viewport.height)
            }
        };
        trace!(?position, width = area.width, height = area.height, "reserved legend footprint");
        Some(LegendFootprint { position, area })
    }

    fn layout_point(
        &self,
        index: usize,
        point: &DataPoint,
        count: usize,
        settings: &VisualSettings,
        frame: &Frame,
        cache: &mut FormatCache,
    ) -> PointGeometry {
        let origin = frame.slot_origin(index);
        let operator = settings.targets.comparison;
        let active_target = active_target_of(point, point.value, operator);
        let highlighted_active_target = active_target_of(point, point.highlight_value, operator);
        let dimmed = frame.has_highlights && !is_drawable(point.highlight_value);
        let mark_opacity = if dimmed { DIMMED_OPACITY } else { 1.0 };

        let label = settings
            .label
            .show
            .then(|| self.layout_label(point, count, settings, frame, origin));

        let bands = if settings.states.show {
            resolve_state_bands(&point.states, &settings.states, frame.domain)
                .into_iter()
                .map(|band| {
                    let from_px = frame.scale.map(band.from);
                    let to_px = frame.scale.map(band.to);
                    let rect = if frame.vertical {
                        Rect::new(
                            origin.x,
                            origin.y + frame.bullet.height - to_px,
                            frame.bullet.width,
                            to_px - from_px,
                        )
                    } else {
                        Rect::new(
                            frame.value_origin_x(origin) + from_px,
                            origin.y,
                            to_px - from_px,
                            frame.bullet.height,
                        )
                    };
                    BandMark {
                        from: band.from,
                        to: band.to,
                        rect,
                        color: band.color,
                        opacity: mark_opacity,
                        display_name: band.display_name,
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let comparison_value = point.comparison_value.filter(|value| is_drawable(Some(*value)));
        let comparison = comparison_value.map(|value| {
            let (from_px, to_px) = frame.bar_extent(value);
            RectMark {
                rect: frame.bar_rect(origin, from_px, to_px, COMPARISON_DIVIDER),
                color: point
                    .comparison_color
                    .clone()
                    .unwrap_or_else(|| point.color.clone()),
                opacity: mark_opacity,
            }
        });

        let divider = if comparison_value.is_some() {
            NESTED_MEASURE_DIVIDER
        } else {
            MEASURE_DIVIDER
        };
        let measure = point.value.filter(|value| is_drawable(Some(*value))).map(|value| {
            let (from_px, to_px) = frame.bar_extent(value);
            RectMark {
                rect: frame.bar_rect(origin, from_px, to_px, divider),
                color: bar_color(point, active_target),
                opacity: if frame.has_highlights {
                    DIMMED_OPACITY
                } else {
                    1.0
                },
            }
        });
        let highlight = point
            .highlight_value
            .filter(|value| is_drawable(Some(*value)))
            .map(|value| {
                let (from_px, to_px) = frame.bar_extent(value);
                RectMark {
                    rect: frame.bar_rect(origin, from_px, to_px, divider),
                    color: bar_color(point, highlighted_active_target),
                    opacity: 1.0,
                }
            });

        let markers = self.layout_markers(point, settings, frame, origin, mark_opacity);

        let bar_origin = highlight
            .as_ref()
            .or(measure.as_ref())
            .map_or_else(Point::default, |bar| Point::new(bar.rect.x, bar.rect.y));
        let data_label =
            self.layout_data_label(point, settings, frame, origin, divider, bar_origin, cache);

        trace!(
            index,
            bands = bands.len(),
            markers = markers.len(),
            has_data_label = data_label.is_some(),
            "laid out bullet"
        );

        PointGeometry {
            index,
            slot: Rect::new(origin.x, origin.y, frame.slot.width, frame.slot.height),
            label,
            bands,
            comparison,
            measure,
            highlight,
            markers,
            data_label,
            active_target,
            highlighted_active_target,
            selection: point.selection.clone(),
        }
    }

    fn layout_label(
        &self,
        point: &DataPoint,
        count: usize,
        settings: &VisualSettings,
        frame: &Frame,
        origin: Point,
    ) -> TextMark {
        let label = frame.label;
        let rotation = frame.label_rotation;
        let font = FontSpec::from_points(&settings.label.font_family, settings.label.font_size);
        let text = match label_text(settings, point, count) {
            "" => BLANK_LABEL,
            text => text,
        };

        let position = if frame.vertical {
            let x_shift = if rotation == -90.0 {
                (label.width - label.height) / 2.0
            } else if rotation == -35.0 {
                label.height * 2.0
            } else {
                0.0
            };
            let y_shift = if rotation == 0.0 {
                0.0
            } else if rotation == -90.0 {
                label.width + label.width / 2.0
            } else {
                label.width + label.height + LABEL_PADDING
            };
            Point::new(
                origin.x + frame.slot.width / 2.0 - x_shift,
                origin.y + frame.slot.height - y_shift,
            )
        } else {
            Point::new(
                origin.x + label.width,
                origin.y + frame.slot.height / 2.0 + BULLET_PADDING,
            )
        };

        let max_width = if frame.vertical && rotation == 0.0 {
            frame.bullet.width
        } else {
            label.width
        };
        let anchor = if frame.vertical && rotation == 0.0 {
            TextAnchor::Middle
        } else {
            TextAnchor::End
        };
        let offset = if rotation == -35.0 {
            Point::new(font.size_px, font.size_px)
        } else {
            Point::default()
        };

        TextMark {
            text: tailor_text(self.measurer, text, &font, max_width),
            position,
            rotation,
            rotation_origin: Point::new(
                position.x + label.width / 2.0,
                position.y + label.height / 2.0,
            ),
            offset,
            font,
            color: settings.label.fill.clone(),
            anchor,
        }
    }

    fn layout_markers(
        &self,
        point: &DataPoint,
        settings: &VisualSettings,
        frame: &Frame,
        origin: Point,
        opacity: f64,
    ) -> Vec<MarkerMark> {
        let stroke = (frame.cross_extent() / 15.0).max(2.0);
        let bullet = frame.bullet;

        point
            .targets
            .iter()
            .enumerate()
            .filter(|(_, target)| frame.domain.contains(target.value))
            .filter_map(|(target_index, target)| {
                let scaled = frame.scale.map(target.value);
                // Center of the marker along the value axis.
                let along = if frame.vertical {
                    origin.y + bullet.height - scaled - stroke / 2.0
                } else {
                    frame.value_origin_x(origin) + scaled - stroke / 2.0
                };

                let geometry = match target.marker {
                    MarkerShape::Line => {
                        let inset = BULLET_PADDING * 2.0;
                        if frame.vertical {
                            MarkerGeometry::Line {
                                from: Point::new(origin.x + inset, along),
                                to: Point::new(origin.x + bullet.width - inset, along),
                            }
                        } else {
                            MarkerGeometry::Line {
                                from: Point::new(along, origin.y + inset),
                                to: Point::new(along, origin.y + bullet.height - inset),
                            }
                        }
                    }
                    MarkerShape::Cross => {
                        let margin = BULLET_PADDING * 5.0;
                        let size = frame.cross_extent() / 5.0;
                        let (x1, x2, y1, y2) = if frame.vertical {
                            (
                                origin.x + margin,
                                origin.x + bullet.width - margin,
                                along - size,
                                along + size,
                            )
                        } else {
                            (
                                along - size,
                                along + size,
                                origin.y + margin,
                                origin.y + bullet.height - margin,
                            )
                        };
                        MarkerGeometry::Cross {
                            first: (Point::new(x1, y1), Point::new(x2, y2)),
                            second: (Point::new(x2, y1), Point::new(x1, y2)),
                        }
                    }
                    MarkerShape::Circle => MarkerGeometry::Circle {
                        center: if frame.vertical {
                            Point::new(origin.x + bullet.width / 2.0, along)
                        } else {
                            Point::new(along, origin.y + bullet.height / 2.0)
                        },
                        radius: stroke * 2.0,
                    },
                    MarkerShape::Square => {
                        let half = stroke * 2.0;
                        let center = if frame.vertical {
                            Point::new(origin.x + bullet.width / 2.0, along)
                        } else {
                            Point::new(along, origin.y + bullet.height / 2.0)
                        };
                        MarkerGeometry::Square {
                            rect: Rect::new(center.x - half, center.y - half, half * 2.0, half * 2.0),
                        }
                    }
                    MarkerShape::Hidden => return None,
                };

                Some(MarkerMark {
                    target_index,
                    shape: target.marker,
                    geometry,
                    stroke_width: stroke,
                    color: settings.targets.marker_fill.clone(),
                    opacity,
                })
            })
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn layout_data_label(
        &self,
        point: &DataPoint,
        settings: &VisualSettings,
        frame: &Frame,
        origin: Point,
        divider: f64,
        bar_origin: Point,
        cache: &mut FormatCache,
    ) -> Option<TextMark> {
        let value = point.value.filter(|value| is_drawable(Some(*value)))?;
        if !settings.data_labels.show {
            return None;
        }
        let labelled = if frame.has_highlights {
            point.highlight_value.filter(|highlight| *highlight > 0.0)?
        } else {
            value
        };
        let negative = value < 0.0;

        let (from_px, to_px) = if negative {
            (
                frame.scale.map(frame.domain.clamp(labelled)),
                frame.scale.map(frame.domain.clamp(0.0)),
            )
        } else {
            (
                frame.scale.map(frame.domain.clamp(frame.domain.start.max(0.0))),
                frame.scale.map(frame.domain.clamp(frame.domain.end.min(labelled))),
            )
        };

        let spec = FormatSpec {
            format: point.format.clone(),
            value: Some(if settings.data_labels.unit == 0.0 {
                frame.domain.end
            } else {
                settings.data_labels.unit
            }),
            precision: settings.data_labels.precision,
            display_unit_system: DISPLAY_UNIT_SYSTEM_DATA_LABELS,
            allow_format_beautification: true,
            culture: Some(settings.data_labels.locale.clone()),
            ..FormatSpec::default()
        };
        let mut text = cache.format(labelled, &spec);
        let font = FontSpec::from_points(
            &settings.data_labels.font_family,
            settings.data_labels.font_size,
        );
        let size = Size::new(
            self.measurer.measure(&text, &font).width,
            font.size_px * 1.2,
        );
        let mut fill = settings.data_labels.fill.clone();
        let bullet = frame.bullet;

        let (position, anchor) = if frame.vertical {
            if bullet.height < LABEL_PADDING + size.height {
                return None;
            }
            let min = origin.y;
            let max = origin.y + bullet.height - LABEL_PADDING + size.height;
            let mut y = clamp_into(origin.y + bullet.height - to_px - LABEL_PADDING, min, max)?;
            if size.height > bar_origin.y {
                y = bar_origin.y + LABEL_PADDING * 2.0;
                if settings.data_labels.uses_default_fill() {
                    fill = DATA_LABEL_INVERTED_FILL.to_owned();
                    let room = bullet.width - (bullet.width / divider) * 2.0 - LABEL_PADDING;
                    text = tailor_text(self.measurer, &text, &font, room);
                }
            }
            (
                Point::new(origin.x + frame.slot.width / 2.0, y),
                TextAnchor::Middle,
            )
        } else {
            if bullet.width < LABEL_PADDING + size.width {
                return None;
            }
            let value_origin = frame.value_origin_x(origin);
            let min = value_origin
                + if negative {
                    size.width + LABEL_PADDING
                } else {
                    0.0
                };
            let max = value_origin + bullet.width
                - if negative {
                    0.0
                } else {
                    size.width + LABEL_PADDING
                };
            let candidate = if negative {
                value_origin + from_px - LABEL_PADDING
            } else {
                value_origin + to_px + LABEL_PADDING
            };
            let mut x = clamp_into(candidate, min, max)?;
            let bar_length = to_px - from_px;
            if x > bar_origin.x && x < bar_origin.x + bar_length {
                if settings.data_labels.uses_default_fill() {
                    fill = DATA_LABEL_INVERTED_FILL.to_owned();
                    text = tailor_text(self.measurer, &text, &font, bar_length - LABEL_PADDING);
                }
                // Right-align the (possibly shortened) text inside the bar end.
                let width = self.measurer.measure(&text, &font).width;
                x = bar_origin.x + bar_length - width - LABEL_PADDING;
            }
            (
                Point::new(x, origin.y + frame.slot.height / 2.0),
                if negative {
                    TextAnchor::End
                } else {
                    TextAnchor::Start
                },
            )
        };

        if text.is_empty() {
            return None;
        }
        Some(TextMark::unrotated(text, position, font, fill, anchor))
    }
}

fn label_text<'a>(settings: &'a VisualSettings, point: &'a DataPoint, count: usize) -> &'a str {
    if !settings.label.text.is_empty() && count <= 1 {
        &settings.label.text
    } else {
        &point.display_name
    }
}

/// Values that produce a bar: present, finite and non-zero.
fn is_drawable(value: Option<f64>) -> bool {
    value.is_some_and(|value| value.is_finite() && value != 0.0)
}

fn clamp_into(value: f64, min: f64, max: f64) -> Option<f64> {
    (min <= max).then(|| value.max(min).min(max))
}

/// First target, in series order, that `value` satisfies under `operator`.
fn active_target_of(
    point: &DataPoint,
    value: Option<f64>,
    operator: ComparisonOperator,
) -> Option<usize> {
    let value = value?;
    point
        .targets
        .iter()
        .position(|target| operator.satisfied(value, target.value))
}

fn bar_color(point: &DataPoint, active_target: Option<usize>) -> String {
    active_target
        .and_then(|index| point.targets.get(index))
        .and_then(|target| target.color.clone())
        .unwrap_or_else(|| point.color.clone())
}

fn slot_size(settings: &VisualSettings, container: Size, count: usize) -> Size {
    let positive = |value: Option<f64>| value.filter(|value| *value > 0.0);
    let min = positive(settings.general.min_height).unwrap_or(DEFAULT_MIN_SLOT);
    let max = positive(settings.general.max_height).unwrap_or(container.height);
    let packed = |available: f64| (available / count as f64).max(min).min(max);

    let slot = match settings.general.orientation {
        Orientation::Vertical => Size::new(
            packed(container.width),
            container.height - SCROLLBAR_ALLOWANCE,
        ),
        Orientation::Horizontal => {
            let spacing = if count > 1 {
                HORIZONTAL_STACK_SPACING
            } else {
                0.0
            };
            Size::new(
                container.width - SCROLLBAR_ALLOWANCE,
                packed(container.height - spacing),
            )
        }
    };
    Size::new(non_negative(slot.width), non_negative(slot.height))
}

/// Label box and rotation (degrees) for the slot.
fn label_size(settings: &VisualSettings, slot: Size, max_label_width: f64) -> (Size, f64) {
    let label = &settings.label;
    if !label.show {
        return (Size::default(), 0.0);
    }
    let height = label.font_size * 1.2;

    match settings.general.orientation {
        Orientation::Vertical => {
            let usable = slot.width - BULLET_PADDING * 2.0;
            if slot.width > max_label_width * 0.6
                && (!label.auto_size || max_label_width <= usable)
            {
                (Size::new(usable, height), 0.0)
            } else if slot.width < 20.0 || label.auto_size {
                let width = if label.auto_size {
                    max_label_width
                } else {
                    max_label_width.min(slot.height * 0.25)
                };
                (Size::new(width, height), -90.0)
            } else if slot.width < 45.0 {
                (
                    Size::new(max_label_width.min(slot.height * 0.25), height),
                    -35.0,
                )
            } else {
                (Size::new(0.0, height), 0.0)
            }
        }
        Orientation::Horizontal => {
            let width = if label.auto_size {
                max_label_width
            } else {
                max_label_width.min(slot.width * 0.25)
            };
            (Size::new(width, height), 0.0)
        }
    }
}
