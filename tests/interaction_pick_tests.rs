use spiral_chart::api::{ParameterId, ParameterValue, SpiralChart, SpiralChartConfig};
use spiral_chart::core::{Point, SeriesData, Viewport};
use spiral_chart::geometry::{LayoutGeometry, SegmentGeometry};
use spiral_chart::interaction::{InteractionMode, PointerButton, PointerInput};
use spiral_chart::render::NullRenderer;

fn chart(cycles: f64) -> SpiralChart<NullRenderer> {
    let config = SpiralChartConfig::new(Viewport::new(900, 700))
        .with_segments_per_cycle(12)
        .with_cycles(cycles);
    let mut chart = SpiralChart::new(NullRenderer::default(), config).expect("chart init");
    let labels = (0..36).map(|month| format!("month {month}")).collect();
    let values = (0..36).map(|month| f64::from(month % 12)).collect();
    chart
        .load_series(
            SeriesData::new(labels).with_attribute("rain", values),
            "rain",
            "Rain",
            "mm",
        )
        .expect("load series");
    chart
}

fn screen_point(chart: &SpiralChart<NullRenderer>, index: usize) -> Point {
    let local = match chart.geometry() {
        LayoutGeometry::Spiral(spiral) => {
            let angle = spiral.segment_angle(index) + spiral.angle_per_segment() / 2.0;
            spiral.point_at(angle, spiral.default_outer_band() / 2.0)
        }
        LayoutGeometry::Heatmap(heatmap) => {
            let origin = heatmap.cell_origin(index);
            let (width, height) = heatmap.cell_size();
            Point::new(origin.x + width / 2.0, origin.y + height / 2.0)
        }
    };
    let center = chart.viewport().center();
    local
        .rotated(chart.effective_rotation().to_radians())
        .translated(center.x, center.y)
}

fn input(point: Point) -> PointerInput {
    PointerInput::new(point.x, point.y)
}

#[test]
fn hover_picks_every_segment_of_the_spiral() {
    let mut chart = chart(1.0);
    for index in 0..12 {
        let point = screen_point(&chart, index);
        chart.pointer_move(input(point));
        assert_eq!(chart.picked_segment(), Some(index), "segment {index}");
    }
}

#[test]
fn hover_picks_heatmap_cells() {
    let mut chart = chart(1.0);
    chart.set_parameter(ParameterId::Representation, ParameterValue::switch(false));
    for index in [0, 5, 11] {
        let point = screen_point(&chart, index);
        assert!(chart.pointer_move(input(point)));
        assert_eq!(chart.picked_segment(), Some(index));
    }
}

#[test]
fn picking_respects_rotation() {
    let mut chart = chart(1.0);
    for rotation in [0.0, 45.0, 180.0] {
        chart.set_parameter(ParameterId::Rotation, ParameterValue::number(rotation));
        let point = screen_point(&chart, 7);
        assert_eq!(chart.hit_test_screen(point), Some(7), "rotation {rotation}");
    }
}

#[test]
fn hovering_same_segment_reports_no_change() {
    let mut chart = chart(1.0);
    let point = screen_point(&chart, 3);
    assert!(chart.pointer_move(input(point)));
    assert!(!chart.pointer_move(input(point)));
}

#[test]
fn drag_freezes_pick_and_suppresses_click() {
    let mut chart = chart(1.0);
    let start = screen_point(&chart, 2);
    let other = screen_point(&chart, 8);

    assert!(chart.pointer_down(input(start)));
    assert_eq!(chart.interaction_mode(), InteractionMode::Dragging);
    assert_eq!(chart.picked_segment(), Some(2));

    assert!(!chart.pointer_move(input(other)));
    assert_eq!(chart.picked_segment(), Some(2));

    assert_eq!(chart.pointer_up(input(other)), None);
    assert_eq!(chart.interaction_mode(), InteractionMode::Idle);
    assert_eq!(chart.picked_segment(), Some(2));
}

#[test]
fn press_and_release_in_place_clicks_segment() {
    let mut chart = chart(1.0);
    let point = screen_point(&chart, 4);

    chart.pointer_down(input(point));
    let clicked = chart.pointer_up(input(point).with_ctrl(true));
    assert_eq!(clicked, Some(4));
}

#[test]
fn release_over_empty_space_clicks_nothing() {
    let mut chart = chart(1.0);
    let empty = Point::new(-200.0, -200.0);

    chart.pointer_down(input(empty));
    assert_eq!(chart.pointer_up(input(empty)), None);
    assert_eq!(chart.picked_segment(), None);
}

#[test]
fn press_on_empty_space_keeps_hover_picking() {
    let mut chart = chart(1.0);
    let corner = Point::new(5.0, 5.0);
    assert_eq!(chart.hit_test_screen(corner), None);

    assert!(!chart.pointer_down(input(corner)));
    assert_eq!(chart.interaction_mode(), InteractionMode::Idle);

    let point = screen_point(&chart, 3);
    assert!(chart.pointer_move(input(point)));
    assert_eq!(chart.picked_segment(), Some(3));
    assert_eq!(chart.pointer_up(input(point)), None);
}

#[test]
fn secondary_button_does_not_start_drag() {
    let mut chart = chart(1.0);
    let point = screen_point(&chart, 1);
    let secondary = input(point).with_button(PointerButton::Secondary);

    assert!(!chart.pointer_down(secondary));
    assert_eq!(chart.interaction_mode(), InteractionMode::Idle);
    assert_eq!(chart.picked_segment(), None);
}

#[test]
fn pick_outside_shrunk_window_is_cleared() {
    let mut chart = chart(2.0);
    let point = screen_point(&chart, 20);
    chart.pointer_move(input(point));
    assert_eq!(chart.picked_segment(), Some(20));

    chart.set_parameter(ParameterId::NumberOfCycles, ParameterValue::number(1.0));
    assert_eq!(chart.window().end(), 11);
    assert_eq!(chart.picked_segment(), None);
}

#[test]
fn pointer_leave_clears_highlight() {
    let mut chart = chart(1.0);
    let point = screen_point(&chart, 6);
    chart.pointer_move(input(point));
    chart.render().expect("render");
    assert_eq!(chart.renderer().last_overlay_count, 1);

    chart.pointer_leave();
    assert!(chart.is_frame_pending());
    chart.render().expect("render");
    assert_eq!(chart.renderer().last_overlay_count, 0);
}
