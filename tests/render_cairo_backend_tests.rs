#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use spiral_chart::api::{ParameterId, ParameterValue, SpiralChart, SpiralChartConfig};
use spiral_chart::core::Viewport;
use spiral_chart::render::CairoRenderer;
use spiral_chart::ChartError;

fn chart(width: u32, height: u32) -> SpiralChart<CairoRenderer> {
    let renderer = CairoRenderer::new(width as i32, height as i32).expect("renderer");
    let config = SpiralChartConfig::new(Viewport::new(width, height)).with_cycles(1.0);
    SpiralChart::new(renderer, config).expect("chart init")
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_segments_overlays_and_legend() {
    let mut chart = chart(640, 480);
    chart.render().expect("render");

    let stats = chart.renderer().last_stats();
    assert!(stats.raster_rebuilt);
    assert_eq!(stats.polygons_drawn, 365);
    assert_eq!(stats.rects_drawn, 30);
    assert_eq!(stats.texts_drawn, 8);
}

#[test]
fn cairo_renderer_reuses_raster_until_generation_changes() {
    let mut chart = chart(640, 480);
    chart.render().expect("first render");

    chart.set_parameter(ParameterId::Guidance, ParameterValue::switch(false));
    chart.render().expect("overlay-only render");
    assert!(!chart.renderer().last_stats().raster_rebuilt);

    chart.set_parameter(ParameterId::BandScale, ParameterValue::number(50.0));
    chart.render().expect("layout render");
    assert!(chart.renderer().last_stats().raster_rebuilt);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let mut chart = chart(600, 320);

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    chart
        .render_on_cairo_context(&context)
        .expect("render on context");

    assert_eq!(chart.renderer().last_stats().polygons_drawn, 365);
    assert!(!chart.is_frame_pending());
}
