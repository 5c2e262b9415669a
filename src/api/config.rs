use serde::{Deserialize, Serialize};

use crate::color::{ColorScheme, DEFAULT_CLASS_COUNT, DEFAULT_LEGEND_HEIGHT, DEFAULT_LEGEND_WIDTH};
use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::geometry::Representation;

/// Layout options driving segment geometry and the data window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParameters {
    #[serde(default = "default_segments_per_cycle")]
    pub segments_per_cycle: usize,
    #[serde(default = "default_cycles")]
    pub cycles: f64,
    #[serde(default = "default_band_scale")]
    pub band_scale: f64,
    #[serde(default = "default_center_offset")]
    pub center_offset: f64,
    #[serde(default = "default_rotation_deg")]
    pub rotation_deg: f64,
    #[serde(default)]
    pub representation: Representation,
    #[serde(default = "default_delimiter_strength")]
    pub delimiter_strength: f64,
    #[serde(default = "default_true")]
    pub guidance_enabled: bool,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            segments_per_cycle: default_segments_per_cycle(),
            cycles: default_cycles(),
            band_scale: default_band_scale(),
            center_offset: default_center_offset(),
            rotation_deg: default_rotation_deg(),
            representation: Representation::default(),
            delimiter_strength: default_delimiter_strength(),
            guidance_enabled: true,
        }
    }
}

/// Initial color encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSettings {
    #[serde(default)]
    pub scheme: ColorScheme,
    #[serde(default = "default_true")]
    pub reverse: bool,
    #[serde(default = "default_true")]
    pub smooth: bool,
    #[serde(default)]
    pub two_tone: bool,
    #[serde(default)]
    pub two_tone_flip: bool,
    #[serde(default = "default_class_count")]
    pub class_count: usize,
    #[serde(default = "default_true")]
    pub legend_visible: bool,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            scheme: ColorScheme::default(),
            reverse: true,
            smooth: true,
            two_tone: false,
            two_tone_flip: false,
            class_count: DEFAULT_CLASS_COUNT,
            legend_visible: true,
        }
    }
}

/// Legend strip placement inside the frame, plus the resolution of the
/// gradient sampled for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendSettings {
    #[serde(default = "default_legend_width")]
    pub gradient_width: u32,
    #[serde(default = "default_legend_height")]
    pub gradient_height: u32,
    #[serde(default = "default_legend_box_width_px")]
    pub box_width_px: f64,
    #[serde(default = "default_legend_box_height_px")]
    pub box_height_px: f64,
    #[serde(default = "default_legend_margin_px")]
    pub margin_px: f64,
}

impl Default for LegendSettings {
    fn default() -> Self {
        Self {
            gradient_width: default_legend_width(),
            gradient_height: default_legend_height(),
            box_width_px: default_legend_box_width_px(),
            box_height_px: default_legend_box_height_px(),
            margin_px: default_legend_margin_px(),
        }
    }
}

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can keep chart setup next to their own settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpiralChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub layout: LayoutParameters,
    #[serde(default)]
    pub colors: ColorSettings,
    #[serde(default)]
    pub legend: LegendSettings,
}

impl SpiralChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layout: LayoutParameters::default(),
            colors: ColorSettings::default(),
            legend: LegendSettings::default(),
        }
    }

    #[must_use]
    pub fn with_segments_per_cycle(mut self, segments_per_cycle: usize) -> Self {
        self.layout.segments_per_cycle = segments_per_cycle;
        self
    }

    #[must_use]
    pub fn with_cycles(mut self, cycles: f64) -> Self {
        self.layout.cycles = cycles;
        self
    }

    #[must_use]
    pub fn with_band_scale(mut self, band_scale: f64) -> Self {
        self.layout.band_scale = band_scale;
        self
    }

    #[must_use]
    pub fn with_center_offset(mut self, center_offset: f64) -> Self {
        self.layout.center_offset = center_offset;
        self
    }

    #[must_use]
    pub fn with_rotation_deg(mut self, rotation_deg: f64) -> Self {
        self.layout.rotation_deg = rotation_deg;
        self
    }

    /// Switches representation and applies its default rotation.
    #[must_use]
    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.layout.representation = representation;
        self.layout.rotation_deg = representation.default_rotation_deg();
        self
    }

    #[must_use]
    pub fn with_delimiter_strength(mut self, strength: f64) -> Self {
        self.layout.delimiter_strength = strength;
        self
    }

    #[must_use]
    pub fn with_guidance(mut self, enabled: bool) -> Self {
        self.layout.guidance_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.colors.scheme = scheme;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: ColorSettings) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendSettings) -> Self {
        self.legend = legend;
        self
    }

    /// Checks everything the parameter table does not cover.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.colors.class_count < 2 {
            return Err(ChartError::InvalidConfig(
                "color class count must be >= 2".to_owned(),
            ));
        }
        let legend = self.legend;
        if legend.gradient_width == 0 || legend.gradient_height == 0 {
            return Err(ChartError::InvalidConfig(
                "legend gradient size must be > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("legend box width", legend.box_width_px),
            ("legend box height", legend.box_height_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !legend.margin_px.is_finite() || legend.margin_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "legend margin must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config json: {e}")))
    }
}

fn default_segments_per_cycle() -> usize {
    365
}

fn default_cycles() -> f64 {
    5.0
}

fn default_band_scale() -> f64 {
    85.0
}

fn default_center_offset() -> f64 {
    15.0
}

fn default_rotation_deg() -> f64 {
    Representation::Spiral.default_rotation_deg()
}

fn default_delimiter_strength() -> f64 {
    80.0
}

fn default_class_count() -> usize {
    DEFAULT_CLASS_COUNT
}

fn default_true() -> bool {
    true
}

fn default_legend_width() -> u32 {
    DEFAULT_LEGEND_WIDTH
}

fn default_legend_height() -> u32 {
    DEFAULT_LEGEND_HEIGHT
}

fn default_legend_box_width_px() -> f64 {
    240.0
}

fn default_legend_box_height_px() -> f64 {
    10.0
}

fn default_legend_margin_px() -> f64 {
    10.0
}
