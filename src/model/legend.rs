use serde::{Deserialize, Serialize};

use super::{LegendCustomIcon, LegendEntry, ViewModel};
use crate::settings::LegendPosition;

/// Payload handed to the host legend component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendData {
    pub title: Option<String>,
    pub position: LegendPosition,
    pub entries: Vec<LegendEntry>,
    pub custom_icons: Vec<LegendCustomIcon>,
    pub label_color: String,
    /// Points.
    pub font_size: f64,
}

impl LegendData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Legend for `model`; `None` while the legend is hidden or has nothing to show.
#[must_use]
pub fn legend_data(model: &ViewModel) -> Option<LegendData> {
    let settings = &model.settings.legend;
    if !settings.show || model.legend.is_empty() {
        return None;
    }
    Some(LegendData {
        title: settings
            .show_title
            .then(|| settings.title_text.clone())
            .filter(|title| !title.is_empty()),
        position: settings.position,
        entries: model.legend.clone(),
        custom_icons: model.legend_custom_icons.clone(),
        label_color: settings.label_color.clone(),
        font_size: settings.font_size,
    })
}
