//! User-authored settings as they arrive from the host. Every leaf is optional.

use serde::{Deserialize, Serialize};

use super::{ComparisonOperator, LegendPosition, Orientation, StatesCalculation, VisionMode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidColor {
    pub color: String,
}

/// Fill as authored by the host: either a bare `"#rrggbb"` or `{"solid": {"color": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fill {
    Hex(String),
    Solid { solid: SolidColor },
}

impl Fill {
    #[must_use]
    pub fn solid(color: impl Into<String>) -> Self {
        Self::Solid {
            solid: SolidColor {
                color: color.into(),
            },
        }
    }

    #[must_use]
    pub fn color(&self) -> &str {
        match self {
            Self::Hex(color) => color,
            Self::Solid { solid } => &solid.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralInput {
    pub orientation: Option<Orientation>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataPointInput {
    pub default_fill: Option<Fill>,
    pub show_all: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelInput {
    pub show: Option<bool>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub fill: Option<Fill>,
    pub auto_size: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataLabelsInput {
    pub show: Option<bool>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub fill: Option<Fill>,
    pub unit: Option<f64>,
    pub precision: Option<i32>,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetsInput {
    pub marker_fill: Option<Fill>,
    pub comparison: Option<ComparisonOperator>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatesInput {
    pub show: Option<bool>,
    pub calculate: Option<StatesCalculation>,
    pub state1: Option<f64>,
    pub state1_fill: Option<Fill>,
    pub state2: Option<f64>,
    pub state2_fill: Option<Fill>,
    pub state3: Option<f64>,
    pub state3_fill: Option<Fill>,
    pub state4: Option<f64>,
    pub state4_fill: Option<Fill>,
    pub state5: Option<f64>,
    pub state5_fill: Option<Fill>,
}

impl StatesInput {
    pub(super) fn values(&self) -> [Option<f64>; 5] {
        [self.state1, self.state2, self.state3, self.state4, self.state5]
    }

    pub(super) fn fills(&self) -> [Option<&Fill>; 5] {
        [
            self.state1_fill.as_ref(),
            self.state2_fill.as_ref(),
            self.state3_fill.as_ref(),
            self.state4_fill.as_ref(),
            self.state5_fill.as_ref(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AxisInput {
    pub show: Option<bool>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub fill: Option<Fill>,
    pub unit: Option<f64>,
    pub precision: Option<i32>,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegendInput {
    pub show: Option<bool>,
    pub position: Option<LegendPosition>,
    pub show_title: Option<bool>,
    pub title_text: Option<String>,
    pub label_color: Option<Fill>,
    pub font_size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorBlindInput {
    pub vision: Option<VisionMode>,
}

/// Settings object keyed by group, as persisted by the host.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsInput {
    pub general: GeneralInput,
    pub data_point: DataPointInput,
    pub label: LabelInput,
    pub data_labels: DataLabelsInput,
    pub targets: TargetsInput,
    pub states: StatesInput,
    pub axis: AxisInput,
    pub legend: LegendInput,
    pub color_blind: ColorBlindInput,
}
