mod emit;
mod frame;
mod null_renderer;
mod primitives;

pub use emit::{UNSELECTED_OPACITY, emit_frame};
pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::error::BulletResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from data binding and layout.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> BulletResult<()>;
}
