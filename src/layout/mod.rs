//! Layout: view model plus viewport in, positioned marks out.

mod bands;
mod engine;
mod geometry;

pub use bands::{EFFECTIVE_BAND_COUNT, ResolvedBand, resolve_state_bands};
pub use engine::LayoutEngine;
pub use geometry::{
    AxisGeometry, AxisTick, BandMark, BulletGeometry, LegendFootprint, MarkerGeometry,
    MarkerMark, PointGeometry, RectMark, TextAnchor, TextMark,
};
