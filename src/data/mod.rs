//! Host tabular input: an optional category column plus role-tagged value series.

mod category;
mod series;

pub use category::{CategorySeries, CategoryValue};
pub use series::{MarkerShape, SeriesOverrides, SeriesRole, ValueSeries};

use serde::{Deserialize, Serialize};

/// Opaque handle the host uses to cross-filter on a clicked bullet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectionId {
    Category {
        index: usize,
    },
    #[serde(rename_all = "camelCase")]
    Measure {
        query_name: String,
    },
}

/// Categorical query result handed over by the host on every update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTable {
    #[serde(default)]
    pub categories: Option<CategorySeries>,
    #[serde(default)]
    pub values: Vec<ValueSeries>,
}

impl DataTable {
    #[must_use]
    pub fn new(categories: Option<CategorySeries>, values: Vec<ValueSeries>) -> Self {
        Self { categories, values }
    }

    /// Single implicit category, one bullet per table.
    #[must_use]
    pub fn without_categories(values: Vec<ValueSeries>) -> Self {
        Self::new(None, values)
    }

    /// Number of bullets this table produces: one per category, or one when
    /// there is no category column.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories
            .as_ref()
            .map_or(1, |categories| categories.values.len())
    }

    pub fn from_json_str(input: &str) -> crate::error::BulletResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            crate::error::BulletError::InvalidData(format!("failed to parse data table: {e}"))
        })
    }
}
