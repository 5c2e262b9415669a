use spiral_chart::api::{ParameterId, ParameterValue, SpiralChart, SpiralChartConfig};
use spiral_chart::color::{ColorScheme, SegmentFill};
use spiral_chart::core::Viewport;
use spiral_chart::geometry::Representation;
use spiral_chart::render::NullRenderer;

fn chart() -> SpiralChart<NullRenderer> {
    let config = SpiralChartConfig::new(Viewport::new(800, 600)).with_cycles(1.0);
    let mut chart = SpiralChart::new(NullRenderer::default(), config).expect("chart init");
    chart.render().expect("initial render");
    chart
}

#[test]
fn representation_switch_swaps_layout_and_resets_rotation() {
    let mut chart = chart();

    assert!(chart.set_parameter(ParameterId::Rotation, ParameterValue::number(90.0)));
    assert_eq!(chart.effective_rotation(), 90.0);

    assert!(chart.set_parameter(ParameterId::Representation, ParameterValue::switch(false)));
    assert_eq!(chart.representation(), Representation::Heatmap);
    assert_eq!(chart.parameters().number(ParameterId::Rotation), 0.0);
    assert_eq!(chart.effective_rotation(), 0.0);

    chart.render().expect("heatmap render");
    assert_eq!(chart.renderer().last_segment_count, 365);

    assert!(chart.set_parameter(ParameterId::Representation, ParameterValue::switch(true)));
    assert_eq!(chart.representation(), Representation::Spiral);
    assert_eq!(chart.parameters().number(ParameterId::Rotation), 270.0);
}

#[test]
fn rejected_values_leave_chart_untouched() {
    let mut chart = chart();
    let before = chart.snapshot();

    assert!(!chart.set_parameter(ParameterId::Rotation, ParameterValue::number(361.0)));
    assert!(!chart.set_parameter(ParameterId::BandScale, ParameterValue::number(f64::NAN)));
    assert!(!chart.set_parameter(ParameterId::ColorMap, ParameterValue::number(1.0)));
    assert!(!chart.set_parameter(
        ParameterId::Representation,
        ParameterValue::Scheme(ColorScheme::Blues)
    ));
    assert!(!chart.set_parameter(ParameterId::Guidance, ParameterValue::switch(true)));

    assert!(!chart.is_frame_pending());
    assert_eq!(chart.snapshot(), before);
}

#[test]
fn integral_sliders_round_accepted_values() {
    let mut chart = chart();
    assert!(chart.set_parameter(ParameterId::SegmentsPerCycle, ParameterValue::number(12.4)));
    assert_eq!(chart.parameters().segments_per_cycle(), 12);
}

#[test]
fn overlay_changes_reuse_cached_raster() {
    let mut chart = chart();
    let generation = chart.raster_generation();

    assert!(chart.set_parameter(ParameterId::Guidance, ParameterValue::switch(false)));
    assert!(chart.is_raster_valid());
    chart.render().expect("render");
    assert_eq!(chart.raster_generation(), generation);
    assert!(!chart.renderer().last_glow);

    assert!(chart.set_parameter(ParameterId::BandScale, ParameterValue::number(50.0)));
    assert!(!chart.is_raster_valid());
    chart.render().expect("render");
    assert_eq!(chart.raster_generation(), generation + 1);
}

#[test]
fn two_tone_splits_each_segment_in_two() {
    let mut chart = chart();

    assert!(chart.set_parameter(ParameterId::TwoToneColors, ParameterValue::switch(true)));
    assert!(chart
        .fills()
        .iter()
        .all(|fill| matches!(fill, SegmentFill::TwoTone(_))));
    chart.render().expect("render");
    assert_eq!(chart.renderer().last_segment_count, 730);
    assert_eq!(chart.renderer().last_delimiter_count, 365);

    let legend = chart.legend().expect("legend visible");
    assert_eq!(legend.labels.len(), 7);
}

#[test]
fn zero_delimiter_strength_drops_delimiters() {
    let mut chart = chart();
    assert!(chart.set_parameter(ParameterId::DelimiterStrength, ParameterValue::number(0.0)));
    chart.render().expect("render");
    assert_eq!(chart.renderer().last_delimiter_count, 0);
    assert_eq!(chart.renderer().last_segment_count, 365);
}

#[test]
fn color_map_change_keeps_color_switches() {
    let mut chart = chart();

    assert!(chart.set_parameter(ParameterId::ReverseColors, ParameterValue::switch(false)));
    assert!(chart.set_parameter(ParameterId::SmoothColors, ParameterValue::switch(false)));
    assert!(chart.set_parameter(
        ParameterId::ColorMap,
        ParameterValue::Scheme(ColorScheme::Blues)
    ));

    let mapper = chart.color_mapper();
    assert_eq!(mapper.scheme(), Some(ColorScheme::Blues));
    assert!(!mapper.config().reverse);
    assert!(!mapper.config().smooth);
    assert_eq!(chart.parameters().scheme(), ColorScheme::Blues);
}

#[test]
fn legend_toggle_bumps_generation_and_hides_strip() {
    let mut chart = chart();
    let generation = chart.legend_generation();

    assert!(chart.set_parameter(ParameterId::ColorLegend, ParameterValue::switch(false)));
    assert!(chart.legend().is_none());
    assert_eq!(chart.legend_generation(), generation + 1);

    chart.render().expect("render");
    assert_eq!(chart.renderer().last_rect_count, 0);
    assert_eq!(chart.renderer().last_text_count, 0);
}

#[test]
fn several_changes_collapse_into_one_frame() {
    let mut chart = chart();
    let requested = chart.frames_requested();

    chart.set_parameter(ParameterId::BandScale, ParameterValue::number(60.0));
    chart.set_parameter(ParameterId::Offset, ParameterValue::number(20.0));
    chart.set_parameter(ParameterId::Rotation, ParameterValue::number(10.0));
    assert_eq!(chart.frames_requested(), requested + 1);

    assert!(chart.render_if_pending().expect("render"));
    assert!(!chart.render_if_pending().expect("idle"));
}

#[test]
fn class_count_drives_legend_labels() {
    let mut chart = chart();

    assert!(!chart.set_color_class_count(1));
    assert!(chart.set_color_class_count(5));
    assert!(!chart.set_color_class_count(5));

    let legend = chart.legend().expect("legend visible");
    assert_eq!(legend.labels.len(), 6);
    assert_eq!(chart.color_mapper().class_colors().len(), 5);
}

#[test]
fn cycles_parameter_reshapes_window() {
    let mut chart = chart();
    assert!(chart.set_parameter(ParameterId::NumberOfCycles, ParameterValue::number(0.5)));
    assert_eq!(chart.window().len(), 182);
    chart.render().expect("render");
    assert_eq!(chart.renderer().last_segment_count, 182);
}
