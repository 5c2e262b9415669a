use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless chart usage.
///
/// It still validates frame content so tests catch invalid geometry without
/// a drawing backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_raster_generation: u64,
    pub last_segment_count: usize,
    pub last_delimiter_count: usize,
    pub last_overlay_count: usize,
    pub last_glow: bool,
    pub last_rect_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_raster_generation = frame.raster_generation;
        self.last_segment_count = frame.raster.polygons.len();
        self.last_delimiter_count = frame.raster.delimiters.len();
        self.last_overlay_count = frame.overlay_polygons.len();
        self.last_glow = frame.glow.is_some();
        self.last_rect_count = frame.rects.len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
