use std::sync::Arc;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    FrameTransform, GlowPrimitive, LinePrimitive, PolygonPrimitive, RectPrimitive, TextPrimitive,
};

/// Cached chart body: every segment polygon plus delimiter lines, in the
/// layout-local frame placed by `transform`.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterLayer {
    pub transform: FrameTransform,
    pub polygons: Vec<PolygonPrimitive>,
    pub delimiters: Vec<LinePrimitive>,
}

impl RasterLayer {
    #[must_use]
    pub fn new(transform: FrameTransform) -> Self {
        Self {
            transform,
            polygons: Vec::new(),
            delimiters: Vec::new(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.transform.validate()?;
        for polygon in &self.polygons {
            polygon.validate()?;
        }
        for line in &self.delimiters {
            line.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.delimiters.is_empty()
    }
}

/// Backend-agnostic scene for one draw pass.
///
/// Draw order: raster layer, overlay polygons (pick highlight), glow, then
/// the pixel-space legend rects and texts. The raster is shared with the
/// chart's cache; `raster_generation` changes only when it is rebuilt, so
/// backends may keep their own rasterized copy keyed by it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub raster: Arc<RasterLayer>,
    pub raster_generation: u64,
    pub overlay_transform: FrameTransform,
    pub overlay_polygons: Vec<PolygonPrimitive>,
    pub glow: Option<GlowPrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(
        viewport: Viewport,
        raster: Arc<RasterLayer>,
        raster_generation: u64,
        overlay_transform: FrameTransform,
    ) -> Self {
        Self {
            viewport,
            raster,
            raster_generation,
            overlay_transform,
            overlay_polygons: Vec::new(),
            glow: None,
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_overlay_polygon(mut self, polygon: PolygonPrimitive) -> Self {
        self.overlay_polygons.push(polygon);
        self
    }

    #[must_use]
    pub fn with_glow(mut self, glow: GlowPrimitive) -> Self {
        self.glow = Some(glow);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        self.raster.validate()?;
        self.overlay_transform.validate()?;
        for polygon in &self.overlay_polygons {
            polygon.validate()?;
        }
        if let Some(glow) = &self.glow {
            glow.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raster.is_empty()
            && self.overlay_polygons.is_empty()
            && self.glow.is_none()
            && self.rects.is_empty()
            && self.texts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{RasterLayer, RenderFrame};
    use crate::core::{Point, Viewport};
    use crate::render::{Color, FrameTransform, PolygonPrimitive};

    #[test]
    fn validation_rejects_non_finite_overlay() {
        let raster = Arc::new(RasterLayer::new(FrameTransform::new(0.5, 0.5, 0.0)));
        let frame = RenderFrame::new(
            Viewport::new(10, 10),
            raster,
            1,
            FrameTransform::new(0.0, 0.0, 0.0),
        );
        assert!(frame.is_empty());
        assert!(frame.validate().is_ok());

        let bad = frame.with_overlay_polygon(PolygonPrimitive::filled(
            vec![Point::new(f64::NAN, 0.0)],
            Color::WHITE,
        ));
        assert!(bad.validate().is_err());
    }

    #[test]
    fn validation_rejects_invalid_viewport() {
        let raster = Arc::new(RasterLayer::new(FrameTransform::new(0.0, 0.0, 0.0)));
        let frame = RenderFrame::new(
            Viewport::new(0, 10),
            raster,
            0,
            FrameTransform::new(0.0, 0.0, 0.0),
        );
        assert!(frame.validate().is_err());
    }
}
