//! Host-facing facade: one full pass per update.

mod chart;
mod config;
mod json_contract;

pub use chart::BulletChart;
pub use config::BulletChartConfig;
pub use json_contract::{BULLET_SNAPSHOT_JSON_SCHEMA_V1, BulletSnapshotJsonContractV1};
