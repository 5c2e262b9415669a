use std::sync::Arc;

use tracing::{debug, warn};

use crate::color::{ColorConfig, ColorMapper, SegmentFill};
use crate::core::{DataWindow, Series, SeriesData, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartPlugin;
use crate::geometry::{LayoutGeometry, LayoutInput, Representation, raster_transform};
use crate::interaction::InteractionState;
use crate::render::{RasterLayer, Renderer};

use super::{
    FrameScheduler, LegendSettings, ParameterId, ParameterSet, RangeSelectorModel,
    SpiralChartConfig,
};

/// Attribute name of the ramp shown before any data is loaded.
pub const PLACEHOLDER_ATTRIBUTE: &str = "value";

/// Offscreen chart body plus the generation handed to backends.
#[derive(Debug, Clone)]
pub(super) struct RasterCache {
    pub(super) layer: Arc<RasterLayer>,
    pub(super) generation: u64,
    pub(super) valid: bool,
}

/// Spiral/heatmap chart controller.
///
/// Owns the series, window, parameters, color mapper, geometry strategy and
/// the cached raster. All mutation happens through the controller methods in
/// this module; every accepted change requests a frame, and
/// [`SpiralChart::render_if_pending`] draws at most one frame per request
/// batch.
pub struct SpiralChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) parameters: ParameterSet,
    pub(super) data: SeriesData,
    pub(super) series: Series,
    pub(super) caption: String,
    pub(super) unit: String,
    pub(super) window: DataWindow,
    pub(super) color_mapper: ColorMapper,
    pub(super) fills: Vec<SegmentFill>,
    pub(super) geometry: LayoutGeometry,
    pub(super) interaction: InteractionState,
    pub(super) picked: Option<usize>,
    pub(super) raster: RasterCache,
    pub(super) scheduler: FrameScheduler,
    pub(super) legend_settings: LegendSettings,
    pub(super) legend_generation: u64,
    pub(super) range_model: RangeSelectorModel,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
}

impl<R: Renderer> SpiralChart<R> {
    pub fn new(renderer: R, config: SpiralChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let parameters = ParameterSet::from_config(&config)?;

        let colors = config.colors;
        let color_mapper = ColorMapper::from_scheme(
            colors.scheme,
            ColorConfig {
                reverse: colors.reverse,
                smooth: colors.smooth,
                two_tone: colors.two_tone,
                two_tone_flip: colors.two_tone_flip,
                class_count: colors.class_count,
                ..ColorConfig::default()
            },
        )?;

        let data = SeriesData::placeholder(parameters.segments_per_cycle(), PLACEHOLDER_ATTRIBUTE);
        let series = data.encode(PLACEHOLDER_ATTRIBUTE).ok_or_else(|| {
            ChartError::InvalidData("placeholder series is missing its attribute".to_owned())
        })?;
        let window = DataWindow::full(series.len());
        let input = LayoutInput::new(
            config.viewport,
            parameters.segments_per_cycle(),
            window,
            parameters.number(ParameterId::BandScale),
            parameters.number(ParameterId::Offset),
        )?;
        let geometry = LayoutGeometry::build(parameters.representation(), &input);
        let transform = raster_transform(config.viewport, 0.0);

        let mut chart = Self {
            renderer,
            viewport: config.viewport,
            parameters,
            data,
            series,
            caption: String::new(),
            unit: String::new(),
            window,
            color_mapper,
            fills: Vec::new(),
            geometry,
            interaction: InteractionState::default(),
            picked: None,
            raster: RasterCache {
                layer: Arc::new(RasterLayer::new(transform)),
                generation: 0,
                valid: false,
            },
            scheduler: FrameScheduler::default(),
            legend_settings: config.legend,
            legend_generation: 0,
            range_model: RangeSelectorModel::from_window(window),
            plugins: Vec::new(),
        };
        chart.recolor();
        chart.reshape();
        chart.request_frame();
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            representation = ?chart.representation(),
            "spiral chart created"
        );
        Ok(chart)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn representation(&self) -> Representation {
        self.geometry.representation()
    }

    #[must_use]
    pub fn geometry(&self) -> &LayoutGeometry {
        &self.geometry
    }

    /// Rotation applied to the layout frame; heatmaps are never rotated.
    #[must_use]
    pub fn effective_rotation(&self) -> f64 {
        if self.representation().is_spiral() {
            self.parameters.number(ParameterId::Rotation)
        } else {
            0.0
        }
    }

    /// Returns `true` when a new frame was scheduled by this call.
    pub fn request_frame(&mut self) -> bool {
        self.scheduler.request_frame()
    }

    #[must_use]
    pub fn is_frame_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    #[must_use]
    pub fn frames_requested(&self) -> u64 {
        self.scheduler.frames_requested()
    }

    /// Rebuilds the geometry strategy from the current window and parameters
    /// and marks the raster stale.
    pub(super) fn refresh_layout(&mut self) {
        match self.layout_input() {
            Ok(input) => {
                self.geometry = LayoutGeometry::build(self.parameters.representation(), &input);
            }
            Err(err) => warn!(error = %err, "keeping previous layout"),
        }
        self.invalidate_raster();
    }

    pub(super) fn invalidate_raster(&mut self) {
        self.raster.valid = false;
    }

    fn layout_input(&self) -> ChartResult<LayoutInput> {
        LayoutInput::new(
            self.viewport,
            self.parameters.segments_per_cycle(),
            self.window,
            self.parameters.number(ParameterId::BandScale),
            self.parameters.number(ParameterId::Offset),
        )
    }
}
