mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, LineStrokeStyle, PolygonPrimitive, RectPrimitive, TextHAlign,
    TextPrimitive,
};

use crate::error::DashResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a complete `RenderFrame` and clear their surface before
/// drawing it, so every call fully replaces the previous picture.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> DashResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
