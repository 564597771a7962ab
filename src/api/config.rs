use serde::{Deserialize, Serialize};

use crate::error::{BulletError, BulletResult};
use crate::settings::FALLBACK_LOCALE;

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can persist the chart setup next to their own state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletChartConfig {
    /// Locale reported by the host; locale settings left empty fall back to it.
    #[serde(default = "default_host_locale")]
    pub host_locale: String,
}

fn default_host_locale() -> String {
    FALLBACK_LOCALE.to_owned()
}

impl Default for BulletChartConfig {
    fn default() -> Self {
        Self {
            host_locale: default_host_locale(),
        }
    }
}

impl BulletChartConfig {
    #[must_use]
    pub fn with_host_locale(mut self, locale: impl Into<String>) -> Self {
        self.host_locale = locale.into();
        self
    }

    pub fn to_json_pretty(&self) -> BulletResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            BulletError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> BulletResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| BulletError::InvalidData(format!("failed to parse chart config: {e}")))
    }
}
