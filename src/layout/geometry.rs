//! Output of the layout engine: plain data, one value per mark, no drawing.
//!
//! Coordinates are chart-local: the origin is the top-left corner of the
//! bullet container, i.e. the viewport offset by the left and top margins.

use serde::{Deserialize, Serialize};

use crate::core::{Domain, FontSpec, LinearScale, Margin, Point, Rect, Size, Viewport};
use crate::data::{MarkerShape, SelectionId};
use crate::settings::{LegendPosition, Orientation, VisionMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Filled rectangle with its style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectMark {
    pub rect: Rect,
    pub color: String,
    pub opacity: f64,
}

/// One resolved state band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandMark {
    pub from: f64,
    pub to: f64,
    pub rect: Rect,
    pub color: String,
    pub opacity: f64,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MarkerGeometry {
    Line { from: Point, to: Point },
    Cross { first: (Point, Point), second: (Point, Point) },
    Circle { center: Point, radius: f64 },
    Square { rect: Rect },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerMark {
    pub target_index: usize,
    pub shape: MarkerShape,
    pub geometry: MarkerGeometry,
    pub stroke_width: f64,
    pub color: String,
    pub opacity: f64,
}

/// Positioned text. `rotation` is in degrees around `rotation_origin`;
/// `offset` is applied after rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMark {
    pub text: String,
    pub position: Point,
    pub font: FontSpec,
    pub color: String,
    pub anchor: TextAnchor,
    pub rotation: f64,
    pub rotation_origin: Point,
    pub offset: Point,
}

impl TextMark {
    #[must_use]
    pub fn unrotated(
        text: String,
        position: Point,
        font: FontSpec,
        color: String,
        anchor: TextAnchor,
    ) -> Self {
        Self {
            text,
            position,
            font,
            color,
            anchor,
            rotation: 0.0,
            rotation_origin: position,
            offset: Point::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisTick {
    pub value: f64,
    /// Pixel along the axis, relative to [`AxisGeometry::origin`].
    pub position: f64,
    pub label: String,
}

/// Axis drawn behind the bullets: left of them (vertical) or below (horizontal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisGeometry {
    pub orientation: Orientation,
    pub origin: Point,
    pub ticks: Vec<AxisTick>,
    /// Grid line length, drawn from the origin across the bullets.
    pub tick_size: f64,
    pub font: FontSpec,
    pub color: String,
}

/// Space reserved for the host legend, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendFootprint {
    pub position: LegendPosition,
    pub area: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointGeometry {
    pub index: usize,
    pub slot: Rect,
    pub label: Option<TextMark>,
    pub bands: Vec<BandMark>,
    pub comparison: Option<RectMark>,
    pub measure: Option<RectMark>,
    pub highlight: Option<RectMark>,
    pub markers: Vec<MarkerMark>,
    pub data_label: Option<TextMark>,
    pub active_target: Option<usize>,
    pub highlighted_active_target: Option<usize>,
    pub selection: Option<SelectionId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletGeometry {
    pub viewport: Viewport,
    pub orientation: Orientation,
    pub margin: Margin,
    pub container: Size,
    /// Scrollable content size: every slot laid end to end.
    pub content: Size,
    pub slot: Size,
    pub bullet: Size,
    pub label_size: Size,
    pub label_rotation: f64,
    pub max_label_width: f64,
    /// Niced domain shared by every bullet.
    pub domain: Domain,
    /// Domain value → distance from the bullet's value origin along its packed axis.
    pub scale: LinearScale,
    pub axis_scale: LinearScale,
    pub axis: Option<AxisGeometry>,
    pub legend: Option<LegendFootprint>,
    pub points: Vec<PointGeometry>,
    pub has_highlights: bool,
    pub vision: VisionMode,
}

impl BulletGeometry {
    /// Geometry of a pass with nothing to draw.
    #[must_use]
    pub fn empty(viewport: Viewport, orientation: Orientation, vision: VisionMode) -> Self {
        Self {
            viewport,
            orientation,
            margin: Margin::default(),
            container: Size::default(),
            content: Size::default(),
            slot: Size::default(),
            bullet: Size::default(),
            label_size: Size::default(),
            label_rotation: 0.0,
            max_label_width: 0.0,
            domain: Domain::default(),
            scale: LinearScale::new((0.0, 0.0), (0.0, 0.0)),
            axis_scale: LinearScale::new((0.0, 0.0), (0.0, 0.0)),
            axis: None,
            legend: None,
            points: Vec::new(),
            has_highlights: false,
            vision,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
