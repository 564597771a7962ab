//! bullet-chart-rs: bullet chart engine for dashboard hosts.
//!
//! Role-tagged tabular input and cascading settings go through a view-model
//! builder and a layout engine; the result is backend-agnostic geometry that
//! any drawing surface can consume through the [`render::Renderer`] trait.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod settings;
pub mod telemetry;

pub use api::{BulletChart, BulletChartConfig};
pub use error::{BulletError, BulletResult};
