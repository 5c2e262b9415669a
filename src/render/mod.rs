mod frame;
mod null_renderer;
mod primitives;

pub use frame::{RasterLayer, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, FrameTransform, GlowPrimitive, LinePrimitive, PolygonPrimitive, RectPrimitive, Stroke,
    TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from layout, color and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
