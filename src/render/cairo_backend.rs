use cairo::{Context, FillRule, Format, ImageSurface};
use pango::FontDescription;

use crate::core::Point;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, FrameTransform, GlowPrimitive, PolygonPrimitive, RasterLayer, RenderFrame, Renderer,
    TextHAlign,
};

/// Number of stacked strokes approximating a shadow blur.
const GLOW_LAYERS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub raster_rebuilt: bool,
    pub polygons_drawn: usize,
    pub overlays_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

#[derive(Debug)]
struct CachedRaster {
    generation: u64,
    width: i32,
    height: i32,
    surface: ImageSurface,
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// The chart body is rasterized into an offscreen surface and reused until
/// the frame carries a different raster generation or the viewport resizes.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    raster: Option<CachedRaster>,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        Ok(Self {
            surface: create_surface(width, height)?,
            raster: None,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        let mut stats = CairoRenderStats {
            raster_rebuilt: self.refresh_raster(frame)?,
            ..CairoRenderStats::default()
        };

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        if let Some(raster) = &self.raster {
            context
                .set_source_surface(&raster.surface, 0.0, 0.0)
                .map_err(|err| map_backend_error("failed to set raster source", err))?;
            context
                .paint()
                .map_err(|err| map_backend_error("failed to blit raster", err))?;
        }
        stats.polygons_drawn = frame.raster.polygons.len();

        context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        apply_transform(context, frame.overlay_transform);
        for polygon in &frame.overlay_polygons {
            draw_polygon(context, polygon)?;
            stats.overlays_drawn += 1;
        }
        if let Some(glow) = &frame.glow {
            draw_glow(context, frame, glow)?;
        }
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;

        for rect in &frame.rects {
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            apply_color(context, rect.fill_color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            stats.rects_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }

    /// Re-rasterizes the chart body when the cached copy is stale.
    fn refresh_raster(&mut self, frame: &RenderFrame) -> ChartResult<bool> {
        let width = i32::try_from(frame.viewport.width)
            .map_err(|_| ChartError::InvalidData("viewport width exceeds i32".to_owned()))?;
        let height = i32::try_from(frame.viewport.height)
            .map_err(|_| ChartError::InvalidData("viewport height exceeds i32".to_owned()))?;

        let fresh = self.raster.as_ref().is_some_and(|cached| {
            cached.generation == frame.raster_generation
                && cached.width == width
                && cached.height == height
        });
        if fresh {
            return Ok(false);
        }

        let surface = create_surface(width, height)?;
        {
            let context = Context::new(&surface)
                .map_err(|err| map_backend_error("failed to create raster context", err))?;
            draw_raster(&context, &frame.raster)?;
        }
        self.raster = Some(CachedRaster {
            generation: frame.raster_generation,
            width,
            height,
            surface,
        });
        Ok(true)
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn create_surface(width: i32, height: i32) -> ChartResult<ImageSurface> {
    if width <= 0 || height <= 0 {
        return Err(ChartError::InvalidData(
            "cairo surface size must be > 0".to_owned(),
        ));
    }
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn draw_raster(context: &Context, raster: &RasterLayer) -> ChartResult<()> {
    apply_transform(context, raster.transform);
    for polygon in &raster.polygons {
        draw_polygon(context, polygon)?;
    }
    for line in &raster.delimiters {
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context.set_line_width(line.stroke_width);
        apply_color(context, line.color);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke delimiter", err))?;
    }
    Ok(())
}

fn draw_polygon(context: &Context, polygon: &PolygonPrimitive) -> ChartResult<()> {
    append_path(context, &polygon.points);
    if let Some(fill) = polygon.fill {
        apply_color(context, fill);
        if polygon.stroke.is_some() {
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill polygon", err))?;
        } else {
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill polygon", err))?;
        }
    }
    if let Some(stroke) = polygon.stroke {
        apply_color(context, stroke.color);
        context.set_line_width(stroke.width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke polygon", err))?;
    }
    Ok(())
}

/// Fills the outline and fades a glow outward, clipped to the outline's
/// exterior. Cairo has no shadow blur, so the glow is stacked strokes of
/// decreasing width.
fn draw_glow(context: &Context, frame: &RenderFrame, glow: &GlowPrimitive) -> ChartResult<()> {
    if glow.outline.len() < 2 {
        return Ok(());
    }
    let width = f64::from(frame.viewport.width);
    let height = f64::from(frame.viewport.height);

    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    context.new_path();
    context.rectangle(
        -width / 2.0 - glow.blur_px,
        -height / 2.0 - glow.blur_px,
        width + 2.0 * glow.blur_px,
        height + 2.0 * glow.blur_px,
    );
    append_path(context, &glow.outline);
    context.set_fill_rule(FillRule::EvenOdd);
    context.clip();

    for layer in (1..=GLOW_LAYERS).rev() {
        let share = f64::from(layer) / f64::from(GLOW_LAYERS);
        append_path(context, &glow.outline);
        context.set_line_width(glow.blur_px * share);
        apply_color(
            context,
            glow.glow_color
                .with_alpha(glow.glow_color.alpha / f64::from(GLOW_LAYERS)),
        );
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke glow", err))?;
    }

    append_path(context, &glow.outline);
    apply_color(context, glow.fill);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill glow outline", err))?;

    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))
}

fn append_path(context: &Context, points: &[Point]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    context.move_to(first.x, first.y);
    for point in rest {
        context.line_to(point.x, point.y);
    }
    context.close_path();
}

fn apply_transform(context: &Context, transform: FrameTransform) {
    context.translate(transform.translate_x, transform.translate_y);
    context.rotate(transform.rotation_rad);
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
