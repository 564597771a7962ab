mod enums;
mod input;
mod resolved;

pub use enums::{ComparisonOperator, LegendPosition, Orientation, StatesCalculation, VisionMode};
pub use input::{
    AxisInput, ColorBlindInput, DataLabelsInput, DataPointInput, Fill, GeneralInput, LabelInput,
    LegendInput, SettingsInput, SolidColor, StatesInput, TargetsInput,
};
pub use resolved::{
    AxisSettings, ColorBlindSettings, DEFAULT_TEXT_FILL, DataLabelSettings, DataPointSettings,
    GeneralSettings, LabelSettings, LegendSettings, MAX_PRECISION, SEGOE_FONT_FAMILY,
    STANDARD_FONT_FAMILY, StateSettings, TargetSettings,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BulletError, BulletResult};

/// Locale used when the host does not report one.
pub const FALLBACK_LOCALE: &str = "en-US";

/// Fully resolved settings consumed by the builder and the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualSettings {
    pub general: GeneralSettings,
    pub data_point: DataPointSettings,
    pub label: LabelSettings,
    pub data_labels: DataLabelSettings,
    pub targets: TargetSettings,
    pub states: StateSettings,
    pub axis: AxisSettings,
    pub legend: LegendSettings,
    pub color_blind: ColorBlindSettings,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self::defaults(FALLBACK_LOCALE)
    }
}

impl VisualSettings {
    /// Documented defaults; locale fields take the host locale.
    #[must_use]
    pub fn defaults(host_locale: &str) -> Self {
        let host_locale = if host_locale.trim().is_empty() {
            FALLBACK_LOCALE
        } else {
            host_locale
        };
        Self {
            general: GeneralSettings::default(),
            data_point: DataPointSettings::default(),
            label: LabelSettings::default(),
            data_labels: DataLabelSettings::with_locale(host_locale),
            targets: TargetSettings::default(),
            states: StateSettings::default(),
            axis: AxisSettings::with_locale(host_locale),
            legend: LegendSettings::default(),
            color_blind: ColorBlindSettings::default(),
        }
    }

    /// Resolves every group against the defaults, field by field.
    #[must_use]
    pub fn resolve(user: &SettingsInput, host_locale: &str) -> Self {
        let defaults = Self::defaults(host_locale);
        Self {
            general: GeneralSettings::resolve(&user.general, &defaults.general),
            data_point: DataPointSettings::resolve(&user.data_point, &defaults.data_point),
            label: LabelSettings::resolve(&user.label, &defaults.label),
            data_labels: DataLabelSettings::resolve(&user.data_labels, &defaults.data_labels),
            targets: TargetSettings::resolve(&user.targets, &defaults.targets),
            states: StateSettings::resolve(&user.states, &defaults.states),
            axis: AxisSettings::resolve(&user.axis, &defaults.axis),
            legend: LegendSettings::resolve(&user.legend, &defaults.legend),
            color_blind: ColorBlindSettings::resolve(&user.color_blind, &defaults.color_blind),
        }
    }

    pub fn to_json_pretty(&self) -> BulletResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BulletError::InvalidSettings(format!("failed to serialize settings: {e}")))
    }
}

impl SettingsInput {
    pub fn from_json_str(input: &str) -> BulletResult<Self> {
        let parsed: Self = serde_json::from_str(input)
            .map_err(|e| BulletError::InvalidSettings(format!("failed to parse settings: {e}")))?;
        debug!(bytes = input.len(), "parsed settings input");
        Ok(parsed)
    }

    pub fn to_json_pretty(&self) -> BulletResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BulletError::InvalidSettings(format!("failed to serialize settings: {e}")))
    }
}
