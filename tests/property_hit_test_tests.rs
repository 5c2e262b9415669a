use proptest::prelude::*;
use spiral_chart::core::{DataWindow, Point, Viewport};
use spiral_chart::geometry::{
    HeatmapLayout, LayoutInput, SegmentGeometry, SpiralLayout, screen_to_local,
};

fn layout_input(
    viewport: Viewport,
    segments_per_cycle: usize,
    start: usize,
    len: usize,
    band_scale: f64,
    offset: f64,
) -> LayoutInput {
    let mut window = DataWindow::full(start + len);
    window.set_bounds(start, start + len - 1);
    LayoutInput::new(viewport, segments_per_cycle, window, band_scale, offset).expect("layout input")
}

fn pick(len: usize, share: f64) -> usize {
    ((share * len as f64) as usize).min(len - 1)
}

proptest! {
    #[test]
    fn spiral_hit_test_recovers_segment_midpoints(
        segments_per_cycle in 1usize..400,
        cycles in 1usize..6,
        start in 0usize..1_000,
        band_scale in 20.0f64..100.0,
        offset in 0.0f64..60.0,
        share in 0.0f64..1.0
    ) {
        let len = segments_per_cycle * cycles;
        let input = layout_input(
            Viewport::new(800, 600),
            segments_per_cycle,
            start,
            len,
            band_scale,
            offset,
        );
        let spiral = SpiralLayout::new(&input);
        let index = start + pick(len, share);

        let angle = spiral.segment_angle(index) + spiral.angle_per_segment() / 2.0;
        let local = spiral.point_at(angle, spiral.default_outer_band() / 2.0);
        prop_assert_eq!(spiral.hit_test(local), Some(index));
    }

    #[test]
    fn heatmap_hit_test_recovers_cell_centers(
        segments_per_cycle in 1usize..60,
        rows in 1usize..10,
        start in 0usize..1_000,
        width in 100u32..2_000,
        height in 100u32..2_000,
        offset in 0.0f64..50.0,
        share in 0.0f64..1.0
    ) {
        let len = segments_per_cycle * rows;
        let input = layout_input(
            Viewport::new(width, height),
            segments_per_cycle,
            start,
            len,
            85.0,
            offset,
        );
        let heatmap = HeatmapLayout::new(&input);
        let index = start + pick(len, share);

        let origin = heatmap.cell_origin(index);
        let (cell_width, cell_height) = heatmap.cell_size();
        let center = Point::new(origin.x + cell_width / 2.0, origin.y + cell_height / 2.0);
        prop_assert_eq!(heatmap.hit_test(center), Some(index));
    }

    #[test]
    fn screen_mapping_undoes_rotation(
        x in -400.0f64..400.0,
        y in -300.0f64..300.0,
        rotation in 0.0f64..360.0
    ) {
        let viewport = Viewport::new(800, 600);
        let local = Point::new(x, y);
        let center = viewport.center();
        let screen = local.rotated(rotation.to_radians()).translated(center.x, center.y);

        let recovered = screen_to_local(viewport, rotation, screen);
        prop_assert!((recovered.x - x).abs() <= 1e-9);
        prop_assert!((recovered.y - y).abs() <= 1e-9);
    }

    #[test]
    fn heatmap_misses_outside_the_grid(
        segments_per_cycle in 1usize..60,
        rows in 1usize..10,
        offset in 0.0f64..50.0
    ) {
        let input = layout_input(
            Viewport::new(800, 600),
            segments_per_cycle,
            0,
            segments_per_cycle * rows,
            85.0,
            offset,
        );
        let heatmap = HeatmapLayout::new(&input);
        prop_assert_eq!(heatmap.hit_test(Point::new(-1_000.0, 0.0)), None);
        prop_assert_eq!(heatmap.hit_test(Point::new(0.0, 1_000.0)), None);
    }
}
