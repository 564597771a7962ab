use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryValue {
    Date(DateTime<Utc>),
    Number(f64),
    Text(String),
    Null,
}

impl From<&str> for CategoryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<f64> for CategoryValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for CategoryValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

/// Category column of the query result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySeries {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub format: Option<String>,
    pub values: Vec<CategoryValue>,
    /// Per-category `dataPoint.fill` overrides, parallel to `values`.
    #[serde(default)]
    pub fill_overrides: Vec<Option<String>>,
}

impl CategorySeries {
    #[must_use]
    pub fn new(display_name: impl Into<String>, values: Vec<CategoryValue>) -> Self {
        Self {
            display_name: display_name.into(),
            format: None,
            values,
            fill_overrides: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_fill_override(mut self, index: usize, color: impl Into<String>) -> Self {
        if self.fill_overrides.len() <= index {
            self.fill_overrides.resize(index + 1, None);
        }
        self.fill_overrides[index] = Some(color.into());
        self
    }

    #[must_use]
    pub fn fill_override(&self, index: usize) -> Option<&str> {
        self.fill_overrides
            .get(index)
            .and_then(|fill| fill.as_deref())
    }
}
