use criterion::{Criterion, criterion_group, criterion_main};
use spiral_chart::api::{ParameterId, ParameterValue, SpiralChart, SpiralChartConfig};
use spiral_chart::core::{DataWindow, Point, SeriesData, Viewport};
use spiral_chart::geometry::{LayoutInput, SegmentGeometry, SpiralLayout};
use spiral_chart::render::NullRenderer;
use std::hint::black_box;

fn five_year_layout() -> SpiralLayout {
    let input = LayoutInput::new(
        Viewport::new(1920, 1080),
        365,
        DataWindow::full(1_825),
        85.0,
        15.0,
    )
    .expect("layout input");
    SpiralLayout::new(&input)
}

fn bench_spiral_segments_1825(c: &mut Criterion) {
    let spiral = five_year_layout();

    c.bench_function("spiral_segments_1825", |b| {
        b.iter(|| {
            for index in 0..1_825 {
                let _ = black_box(spiral.segment(black_box(index)));
            }
        })
    });
}

fn bench_spiral_hit_test(c: &mut Criterion) {
    let spiral = five_year_layout();
    let points: Vec<Point> = (0..1_000)
        .map(|i| {
            let angle = f64::from(i) * 0.031;
            Point::from_polar(80.0 + f64::from(i) * 0.4, angle)
        })
        .collect();

    c.bench_function("spiral_hit_test_1k", |b| {
        b.iter(|| {
            for point in &points {
                let _ = black_box(spiral.hit_test(black_box(*point)));
            }
        })
    });
}

fn bench_raster_rebuild_and_render(c: &mut Criterion) {
    let config = SpiralChartConfig::new(Viewport::new(1920, 1080));
    let mut chart = SpiralChart::new(NullRenderer::default(), config).expect("chart init");
    let values: Vec<f64> = (0..1_825).map(|i| (f64::from(i) * 0.0172).sin() * 20.0).collect();
    let labels = (0..1_825).map(|i| i.to_string()).collect();
    chart
        .load_series(
            SeriesData::new(labels).with_attribute("temperature", values),
            "temperature",
            "Temperature",
            "°C",
        )
        .expect("load series");

    let mut band_scale = 85.0;
    c.bench_function("raster_rebuild_render_1825", |b| {
        b.iter(|| {
            band_scale = if band_scale > 80.0 { 80.0 } else { 85.0 };
            chart.set_parameter(ParameterId::BandScale, ParameterValue::number(band_scale));
            chart.render().expect("render");
        })
    });
}

criterion_group!(
    benches,
    bench_spiral_segments_1825,
    bench_spiral_hit_test,
    bench_raster_rebuild_and_render
);
criterion_main!(benches);
