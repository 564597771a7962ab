use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Semantic role of a value series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesRole {
    Value,
    ComparisonValue,
    Target,
    State,
    Tooltip,
}

impl SeriesRole {
    /// Resolves a host role name, accepting the legacy lowercase names too.
    #[must_use]
    pub fn from_role_name(name: &str) -> Option<Self> {
        match name {
            "Value" | "value" => Some(Self::Value),
            "ComparisonValue" | "comparison" => Some(Self::ComparisonValue),
            "targets" | "Targets" => Some(Self::Target),
            "states" | "States" => Some(Self::State),
            "tooltips" | "Tooltips" => Some(Self::Tooltip),
            _ => None,
        }
    }

    #[must_use]
    pub fn role_name(self) -> &'static str {
        match self {
            Self::Value => "Value",
            Self::ComparisonValue => "ComparisonValue",
            Self::Target => "targets",
            Self::State => "states",
            Self::Tooltip => "tooltips",
        }
    }
}

/// Target marker shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Line,
    Cross,
    Circle,
    Square,
    Hidden,
}

impl MarkerShape {
    /// Default shapes, assigned to targets by position within a bullet.
    pub const CYCLE: [Self; 5] = [
        Self::Line,
        Self::Cross,
        Self::Circle,
        Self::Square,
        Self::Hidden,
    ];

    #[must_use]
    pub fn for_position(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Cross => "cross",
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Hidden => "hidden",
        }
    }
}

/// Per-series objects configured in the host's formatting pane.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeriesOverrides {
    /// `dataPoint.fill`: primary (no categories) or comparison bar color.
    pub fill: Option<String>,
    /// `targets.fill`: bar color once the primary value crosses this target.
    pub target_fill: Option<String>,
    pub target_marker: Option<MarkerShape>,
    /// `states.fill`: band color for an explicit state series.
    pub state_fill: Option<String>,
}

/// One measure column of the query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSeries {
    pub display_name: String,
    #[serde(default)]
    pub query_name: String,
    /// Host role name; resolved through [`SeriesRole::from_role_name`].
    pub role: String,
    #[serde(default)]
    pub format: Option<String>,
    pub values: Vec<Option<f64>>,
    #[serde(default)]
    pub highlights: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub overrides: SeriesOverrides,
}

impl ValueSeries {
    #[must_use]
    pub fn new(display_name: impl Into<String>, role: SeriesRole, values: Vec<Option<f64>>) -> Self {
        let display_name = display_name.into();
        Self {
            query_name: display_name.clone(),
            display_name,
            role: role.role_name().to_owned(),
            format: None,
            values,
            highlights: None,
            overrides: SeriesOverrides::default(),
        }
    }

    /// Date measure, stored as milliseconds since the Unix epoch.
    #[must_use]
    pub fn from_dates(
        display_name: impl Into<String>,
        role: SeriesRole,
        values: &[Option<DateTime<Utc>>],
    ) -> Self {
        let values = values
            .iter()
            .map(|value| value.map(|date| date.timestamp_millis() as f64))
            .collect();
        Self::new(display_name, role, values)
    }

    #[must_use]
    pub fn with_role_name(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    #[must_use]
    pub fn with_query_name(mut self, query_name: impl Into<String>) -> Self {
        self.query_name = query_name.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_highlights(mut self, highlights: Vec<Option<f64>>) -> Self {
        self.highlights = Some(highlights);
        self
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: SeriesOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    #[must_use]
    pub fn resolved_role(&self) -> Option<SeriesRole> {
        SeriesRole::from_role_name(&self.role)
    }

    /// Scalar at `index`; missing trailing cells read as null.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    #[must_use]
    pub fn highlight_at(&self, index: usize) -> Option<f64> {
        self.highlights
            .as_ref()
            .and_then(|highlights| highlights.get(index).copied().flatten())
    }
}
