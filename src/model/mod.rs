//! Presentation model: the fully resolved, immutable view of one update.

mod builder;
mod enumeration;
mod legend;

pub use builder::{HostServices, ViewModelBuilder};
pub use enumeration::{NumberRange, ObjectInstance, ObjectName, enumerate_objects};
pub use legend::{LegendData, legend_data};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Domain;
use crate::data::{MarkerShape, SelectionId};
use crate::settings::VisualSettings;

/// Threshold marker on a bullet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub value: f64,
    pub marker: MarkerShape,
    /// Bar color once the value crosses this target.
    pub color: Option<String>,
    pub display_name: String,
    pub selection: SelectionId,
}

/// Qualitative background band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateBand {
    /// Absolute value, or a domain fraction when [`StateBand::is_percentage`].
    pub value: Option<f64>,
    pub color: String,
    pub display_name: Option<String>,
    pub format: String,
    pub selection: Option<SelectionId>,
}

impl StateBand {
    #[must_use]
    pub fn is_percentage(&self) -> bool {
        self.format.contains('%')
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipRow {
    pub header: Option<String>,
    pub display_name: String,
    pub color: String,
    pub value: String,
}

pub type Targets = SmallVec<[Target; 4]>;
pub type StateBands = SmallVec<[StateBand; 5]>;

/// One bullet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub display_name: String,
    /// Kept even when null; a null value renders as an empty bullet.
    pub value: Option<f64>,
    pub highlight_value: Option<f64>,
    pub comparison_value: Option<f64>,
    pub color: String,
    pub comparison_color: Option<String>,
    pub format: Option<String>,
    pub targets: Targets,
    pub states: StateBands,
    pub tooltips: Vec<TooltipRow>,
    pub selection: Option<SelectionId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "shape", rename_all = "camelCase")]
pub enum LegendIcon {
    Circle,
    Marker(MarkerShape),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub icon: LegendIcon,
    pub selection: Option<SelectionId>,
}

/// Marker glyph drawn in place of the default legend icon for a target series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendCustomIcon {
    pub icon: MarkerShape,
    pub color: String,
    pub selection: SelectionId,
}

/// Per-series or per-category color exposed to the host's configuration surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumerationEntry {
    pub display_name: String,
    pub color: String,
    /// Listed only while "show all" is on.
    pub show_on_demand: bool,
    pub selection: SelectionId,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub data_points: Vec<DataPoint>,
    pub enumeration: Vec<EnumerationEntry>,
    pub legend: Vec<LegendEntry>,
    pub legend_custom_icons: Vec<LegendCustomIcon>,
    pub domain: Domain,
    pub settings: VisualSettings,
    pub has_highlights: bool,
    pub has_categories: bool,
}

impl ViewModel {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data_points.is_empty()
    }
}
