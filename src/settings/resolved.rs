//! Effective settings: every field present, resolved field by field from the
//! user group with the default group as fallback.

use serde::{Deserialize, Serialize};

use super::input::{
    AxisInput, ColorBlindInput, DataLabelsInput, DataPointInput, Fill, GeneralInput, LabelInput,
    LegendInput, StatesInput, TargetsInput,
};
use super::{ComparisonOperator, LegendPosition, Orientation, StatesCalculation, VisionMode};

pub const SEGOE_FONT_FAMILY: &str = "\"Segoe UI\", wf_segoe-ui_normal, helvetica, arial, sans-serif";
pub const STANDARD_FONT_FAMILY: &str = "wf_standard-font,helvetica,arial,sans-serif";
/// Label and data-label fill; data labels only switch to white over a bar while this is in use.
pub const DEFAULT_TEXT_FILL: &str = "#777";
pub const MAX_PRECISION: i32 = 15;

fn fill_or(user: Option<&Fill>, default: &str) -> String {
    user.map_or_else(|| default.to_owned(), |fill| fill.color().to_owned())
}

fn precision_or(user: Option<i32>, default: Option<u8>) -> Option<u8> {
    user.map_or(default, |precision| {
        Some(precision.clamp(0, MAX_PRECISION) as u8)
    })
}

fn locale_or(user: Option<&str>, default: &str) -> String {
    user.filter(|locale| !locale.trim().is_empty())
        .unwrap_or(default)
        .to_owned()
}

fn finite_or(user: Option<f64>, default: f64) -> f64 {
    user.filter(|value| value.is_finite()).unwrap_or(default)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    pub orientation: Orientation,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
}

impl GeneralSettings {
    #[must_use]
    pub fn resolve(user: &GeneralInput, default: &Self) -> Self {
        let positive = |value: Option<f64>| value.filter(|value| value.is_finite() && *value >= 0.0);
        Self {
            orientation: user.orientation.unwrap_or(default.orientation),
            min_height: positive(user.min_height).or(default.min_height),
            max_height: positive(user.max_height).or(default.max_height),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPointSettings {
    pub default_fill: String,
    pub show_all: bool,
}

impl Default for DataPointSettings {
    fn default() -> Self {
        Self {
            default_fill: "#00b8aa".to_owned(),
            show_all: false,
        }
    }
}

impl DataPointSettings {
    #[must_use]
    pub fn resolve(user: &DataPointInput, default: &Self) -> Self {
        Self {
            default_fill: fill_or(user.default_fill.as_ref(), &default.default_fill),
            show_all: user.show_all.unwrap_or(default.show_all),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSettings {
    pub show: bool,
    pub text: String,
    /// Points.
    pub font_size: f64,
    pub font_family: String,
    pub fill: String,
    pub auto_size: bool,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            show: true,
            text: String::new(),
            font_size: 9.0,
            font_family: SEGOE_FONT_FAMILY.to_owned(),
            fill: DEFAULT_TEXT_FILL.to_owned(),
            auto_size: true,
        }
    }
}

impl LabelSettings {
    #[must_use]
    pub fn resolve(user: &LabelInput, default: &Self) -> Self {
        Self {
            show: user.show.unwrap_or(default.show),
            text: user.text.clone().unwrap_or_else(|| default.text.clone()),
            font_size: finite_or(user.font_size, default.font_size),
            font_family: user
                .font_family
                .clone()
                .unwrap_or_else(|| default.font_family.clone()),
            fill: fill_or(user.fill.as_ref(), &default.fill),
            auto_size: user.auto_size.unwrap_or(default.auto_size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLabelSettings {
    pub show: bool,
    pub font_family: String,
    pub font_size: f64,
    pub fill: String,
    /// Display unit; `0` picks one from the domain end.
    pub unit: f64,
    pub precision: Option<u8>,
    pub locale: String,
}

impl DataLabelSettings {
    #[must_use]
    pub fn with_locale(locale: &str) -> Self {
        Self {
            show: false,
            font_family: STANDARD_FONT_FAMILY.to_owned(),
            font_size: 9.0,
            fill: DEFAULT_TEXT_FILL.to_owned(),
            unit: 0.0,
            precision: None,
            locale: locale.to_owned(),
        }
    }

    #[must_use]
    pub fn resolve(user: &DataLabelsInput, default: &Self) -> Self {
        Self {
            show: user.show.unwrap_or(default.show),
            font_family: user
                .font_family
                .clone()
                .unwrap_or_else(|| default.font_family.clone()),
            font_size: finite_or(user.font_size, default.font_size),
            fill: fill_or(user.fill.as_ref(), &default.fill),
            unit: finite_or(user.unit, default.unit),
            precision: precision_or(user.precision, default.precision),
            locale: locale_or(user.locale.as_deref(), &default.locale),
        }
    }

    #[must_use]
    pub fn uses_default_fill(&self) -> bool {
        self.fill.eq_ignore_ascii_case(DEFAULT_TEXT_FILL)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSettings {
    pub marker_fill: String,
    pub comparison: ComparisonOperator,
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self {
            marker_fill: "#333".to_owned(),
            comparison: ComparisonOperator::Less,
        }
    }
}

impl TargetSettings {
    #[must_use]
    pub fn resolve(user: &TargetsInput, default: &Self) -> Self {
        Self {
            marker_fill: fill_or(user.marker_fill.as_ref(), &default.marker_fill),
            comparison: user.comparison.unwrap_or(default.comparison),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSettings {
    pub show: bool,
    pub calculate: StatesCalculation,
    pub values: [Option<f64>; 5],
    pub fills: [String; 5],
}

impl Default for StateSettings {
    fn default() -> Self {
        Self {
            show: true,
            calculate: StatesCalculation::Percentage,
            values: [None; 5],
            fills: ["#bbb", "#ccc", "#ddd", "#eee", "#f2f2f2"].map(str::to_owned),
        }
    }
}

impl StateSettings {
    #[must_use]
    pub fn resolve(user: &StatesInput, default: &Self) -> Self {
        let user_values = user.values();
        let user_fills = user.fills();
        Self {
            show: user.show.unwrap_or(default.show),
            calculate: user.calculate.unwrap_or(default.calculate),
            values: std::array::from_fn(|index| {
                user_values[index]
                    .filter(|value| value.is_finite())
                    .or(default.values[index])
            }),
            fills: std::array::from_fn(|index| fill_or(user_fills[index], &default.fills[index])),
        }
    }

    /// Configured band color for a zero-based ordinal, wrapping after five.
    #[must_use]
    pub fn fill_for_ordinal(&self, ordinal: usize) -> &str {
        &self.fills[ordinal % self.fills.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSettings {
    pub show: bool,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub font_family: String,
    pub font_size: f64,
    pub fill: String,
    pub unit: f64,
    pub precision: Option<u8>,
    pub locale: String,
}

impl AxisSettings {
    #[must_use]
    pub fn with_locale(locale: &str) -> Self {
        Self {
            show: true,
            start: None,
            end: None,
            font_family: SEGOE_FONT_FAMILY.to_owned(),
            font_size: 8.0,
            fill: DEFAULT_TEXT_FILL.to_owned(),
            unit: 0.0,
            precision: None,
            locale: locale.to_owned(),
        }
    }

    #[must_use]
    pub fn resolve(user: &AxisInput, default: &Self) -> Self {
        Self {
            show: user.show.unwrap_or(default.show),
            start: user.start.filter(|value| value.is_finite()).or(default.start),
            end: user.end.filter(|value| value.is_finite()).or(default.end),
            font_family: user
                .font_family
                .clone()
                .unwrap_or_else(|| default.font_family.clone()),
            font_size: finite_or(user.font_size, default.font_size),
            fill: fill_or(user.fill.as_ref(), &default.fill),
            unit: finite_or(user.unit, default.unit),
            precision: precision_or(user.precision, default.precision),
            locale: locale_or(user.locale.as_deref(), &default.locale),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendSettings {
    pub show: bool,
    pub position: LegendPosition,
    pub show_title: bool,
    pub title_text: String,
    pub label_color: String,
    pub font_size: f64,
}

impl Default for LegendSettings {
    fn default() -> Self {
        Self {
            show: false,
            position: LegendPosition::Top,
            show_title: false,
            title_text: String::new(),
            label_color: "#666".to_owned(),
            font_size: 8.0,
        }
    }
}

impl LegendSettings {
    #[must_use]
    pub fn resolve(user: &LegendInput, default: &Self) -> Self {
        Self {
            show: user.show.unwrap_or(default.show),
            position: user.position.unwrap_or(default.position),
            show_title: user.show_title.unwrap_or(default.show_title),
            title_text: user
                .title_text
                .clone()
                .unwrap_or_else(|| default.title_text.clone()),
            label_color: fill_or(user.label_color.as_ref(), &default.label_color),
            font_size: finite_or(user.font_size, default.font_size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorBlindSettings {
    pub vision: VisionMode,
}

impl ColorBlindSettings {
    #[must_use]
    pub fn resolve(user: &ColorBlindInput, default: &Self) -> Self {
        Self {
            vision: user.vision.unwrap_or(default.vision),
        }
    }
}
