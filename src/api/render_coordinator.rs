use std::sync::Arc;

use smallvec::SmallVec;
use tracing::debug;

#[cfg(feature = "parallel-geometry")]
use rayon::prelude::*;

use crate::color::SegmentFill;
use crate::error::ChartResult;
use crate::geometry::{LayoutGeometry, SegmentGeometry, overlay_transform, raster_transform};
use crate::render::{
    Color, GlowPrimitive, LinePrimitive, PolygonPrimitive, RasterLayer, RenderFrame, Renderer,
    Stroke,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::{ParameterId, PluginEvent, SpiralChart};

const DELIMITER_COLOR: Color = Color::WHITE;
const HIGHLIGHT_WIDTH_PX: f64 = 1.0;
const GLOW_BLUR_PX: f64 = 50.0;

fn highlight_color() -> Color {
    Color::from_rgb8(0x66, 0x66, 0x66)
}

fn glow_color() -> Color {
    Color::from_rgb8(0x00, 0x80, 0x00)
}

/// Polygons and leading-edge delimiter of one data index.
#[derive(Debug, Clone, Default)]
struct SegmentPrimitives {
    polygons: SmallVec<[PolygonPrimitive; 2]>,
    delimiter: Option<LinePrimitive>,
}

/// Per-rebuild constants shared by every segment.
#[derive(Clone, Copy)]
struct SegmentPainter<'a> {
    geometry: &'a LayoutGeometry,
    outer_band: f64,
    /// `None` when delimiters are switched off.
    delimiter_width: Option<f64>,
    /// Heatmap delimiters sit on pixel edges rather than pixel centers.
    delimiter_offset: f64,
}

impl SegmentPainter<'_> {
    fn paint(&self, index: usize, fill: SegmentFill) -> SegmentPrimitives {
        let mut polygons: SmallVec<[PolygonPrimitive; 2]> = SmallVec::new();
        match fill {
            SegmentFill::Flat(color) => {
                let polygon = self.geometry.generate_segment(index, 0.0, self.outer_band);
                polygons.push(PolygonPrimitive::filled(polygon.into_points(), color));
            }
            SegmentFill::TwoTone(tone) => {
                let split = tone.ratio.clamp(0.0, 1.0) * self.outer_band;
                let inner = self.geometry.generate_segment(index, 0.0, split);
                let outer = self.geometry.generate_segment(index, split, self.outer_band);
                polygons.push(PolygonPrimitive::filled(inner.into_points(), tone.inner));
                polygons.push(PolygonPrimitive::filled(outer.into_points(), tone.outer));
            }
        }

        let delimiter = self.delimiter_width.and_then(|width| {
            let from = polygons.first()?.points.first().copied()?;
            let to = polygons.last()?.points.last().copied()?;
            let offset = self.delimiter_offset;
            Some(LinePrimitive::between(
                from.translated(offset, offset),
                to.translated(offset, offset),
                width,
                DELIMITER_COLOR,
            ))
        });

        SegmentPrimitives {
            polygons,
            delimiter,
        }
    }
}

impl<R: Renderer> SpiralChart<R> {
    /// Generation of the cached raster; bumps on every rebuild.
    #[must_use]
    pub fn raster_generation(&self) -> u64 {
        self.raster.generation
    }

    #[must_use]
    pub fn is_raster_valid(&self) -> bool {
        self.raster.valid
    }

    /// Regenerates every visible segment polygon and delimiter.
    pub(super) fn rebuild_raster(&mut self) {
        let strength = self.parameters.number(ParameterId::DelimiterStrength);
        let painter = SegmentPainter {
            geometry: &self.geometry,
            outer_band: self.geometry.default_outer_band(),
            delimiter_width: (strength > 0.0).then_some(strength / 100.0),
            delimiter_offset: if self.representation().is_spiral() {
                0.0
            } else {
                -0.5
            },
        };

        let start = self.window.start();
        let end = self.window.end().min(self.fills.len().saturating_sub(1));
        let fills = &self.fills;
        let visible = start..=end;

        #[cfg(feature = "parallel-geometry")]
        let segments: Vec<SegmentPrimitives> = visible
            .into_par_iter()
            .filter_map(|index| fills.get(index).map(|fill| painter.paint(index, *fill)))
            .collect();

        #[cfg(not(feature = "parallel-geometry"))]
        let segments: Vec<SegmentPrimitives> = visible
            .filter_map(|index| fills.get(index).map(|fill| painter.paint(index, *fill)))
            .collect();

        let mut layer = RasterLayer::new(raster_transform(self.viewport, self.effective_rotation()));
        layer.polygons.reserve(segments.len());
        layer.delimiters.reserve(segments.len());
        for segment in segments {
            layer.polygons.extend(segment.polygons);
            layer.delimiters.extend(segment.delimiter);
        }

        self.raster.layer = Arc::new(layer);
        self.raster.generation += 1;
        self.raster.valid = true;
        debug!(
            segments = self.raster.layer.polygons.len(),
            delimiters = self.raster.layer.delimiters.len(),
            generation = self.raster.generation,
            "raster rebuilt"
        );
    }

    /// Materializes the next frame, rebuilding the raster first when stale.
    ///
    /// Order: cached raster, picked-segment highlight, guidance glow, legend.
    pub fn build_render_frame(&mut self) -> RenderFrame {
        if !self.raster.valid {
            self.rebuild_raster();
        }

        let mut frame = RenderFrame::new(
            self.viewport,
            Arc::clone(&self.raster.layer),
            self.raster.generation,
            overlay_transform(self.viewport, self.effective_rotation()),
        );

        if let Some(index) = self.picked.filter(|index| self.window.contains(*index)) {
            let outline = self.geometry.segment(index);
            frame = frame.with_overlay_polygon(PolygonPrimitive::stroked(
                outline.into_points(),
                Stroke::new(HIGHLIGHT_WIDTH_PX, highlight_color()),
            ));
        }

        if self.parameters.switch(ParameterId::Guidance) {
            frame = frame.with_glow(GlowPrimitive {
                outline: self.geometry.generate_outline().into_points(),
                fill: Color::WHITE,
                glow_color: glow_color(),
                blur_px: GLOW_BLUR_PX,
            });
        }

        self.append_legend(frame)
    }

    /// Draws one frame through the configured renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)?;
        self.finish_frame(&frame);
        Ok(())
    }

    /// Renders only when a frame was requested. Returns whether it drew.
    pub fn render_if_pending(&mut self) -> ChartResult<bool> {
        if !self.scheduler.is_pending() {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    fn finish_frame(&mut self, frame: &RenderFrame) {
        self.scheduler.complete();
        self.emit_plugin_event(PluginEvent::Rendered {
            raster_generation: frame.raster_generation,
        });
    }

    /// Renders into an external Cairo context (for example a GTK draw
    /// callback).
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame();
        self.renderer.render_on_cairo_context(context, &frame)?;
        self.finish_frame(&frame);
        Ok(())
    }
}
