use serde::{Deserialize, Serialize};

use crate::error::{BulletError, BulletResult};
use crate::layout::BulletGeometry;
use crate::model::ViewModel;
use crate::render::Renderer;

use super::BulletChart;

pub const BULLET_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Versioned dump of one pass, used for regression fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub model: ViewModel,
    pub geometry: BulletGeometry,
}

impl BulletSnapshotJsonContractV1 {
    pub fn to_json_pretty(&self) -> BulletResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            BulletError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> BulletResult<Self> {
        let payload: Self = serde_json::from_str(input).map_err(|e| {
            BulletError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != BULLET_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(BulletError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload)
    }
}

impl<R: Renderer> BulletChart<R> {
    #[must_use]
    pub fn snapshot(&self) -> BulletSnapshotJsonContractV1 {
        BulletSnapshotJsonContractV1 {
            schema_version: BULLET_SNAPSHOT_JSON_SCHEMA_V1,
            model: self.model().clone(),
            geometry: self.geometry().clone(),
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> BulletResult<String> {
        self.snapshot().to_json_pretty()
    }
}
