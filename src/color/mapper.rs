use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::legend::{Legend, LegendColumn, LegendGradient, legend_labels};
use super::{ColorScheme, LabGradient, auto_expand};

pub const DEFAULT_CLASS_COUNT: usize = 7;

/// Color encoding switches plus the value domain mapped onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorConfig {
    pub reverse: bool,
    pub smooth: bool,
    pub two_tone: bool,
    pub two_tone_flip: bool,
    pub class_count: usize,
    pub domain: (f64, f64),
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            reverse: true,
            smooth: true,
            two_tone: false,
            two_tone_flip: false,
            class_count: DEFAULT_CLASS_COUNT,
            domain: (0.0, 1.0),
        }
    }
}

impl ColorConfig {
    /// Class count seen by legends and range expansion: a two-tone encoding
    /// has one interval fewer than it has class colors.
    #[must_use]
    pub fn effective_class_count(self) -> usize {
        if self.two_tone {
            self.class_count - 1
        } else {
            self.class_count
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.class_count < 2 {
            return Err(ChartError::InvalidConfig(
                "color class count must be >= 2".to_owned(),
            ));
        }
        if !self.domain.0.is_finite() || !self.domain.1.is_finite() {
            return Err(ChartError::InvalidConfig(
                "color domain must be finite".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Partial update applied through [`ColorMapper::set_config`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorConfigUpdate {
    pub reverse: Option<bool>,
    pub smooth: Option<bool>,
    pub two_tone: Option<bool>,
    pub two_tone_flip: Option<bool>,
    pub class_count: Option<usize>,
    pub domain: Option<(f64, f64)>,
}

/// Two adjacent class colors and the band fraction painted with `inner`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwoToneColor {
    pub inner: Color,
    pub outer: Color,
    pub ratio: f64,
}

/// Per-segment fill produced by the active encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SegmentFill {
    Flat(Color),
    TwoTone(TwoToneColor),
}

/// Single source of truth for `t -> color`, shared by chart segments and the
/// legend.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMapper {
    scheme: Option<ColorScheme>,
    gradient: LabGradient,
    class_colors: Vec<Color>,
    config: ColorConfig,
}

impl ColorMapper {
    pub fn new(base_colors: &[Color], config: ColorConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let gradient = LabGradient::new(base_colors)?;
        let class_colors = gradient.colors(config.class_count);
        Ok(Self {
            scheme: None,
            gradient,
            class_colors,
            config,
        })
    }

    pub fn from_scheme(scheme: ColorScheme, config: ColorConfig) -> ChartResult<Self> {
        let mut mapper = Self::new(&scheme.stops(), config)?;
        mapper.scheme = Some(scheme);
        Ok(mapper)
    }

    /// Scheme this mapper was built from, if any.
    #[must_use]
    pub fn scheme(&self) -> Option<ColorScheme> {
        self.scheme
    }

    #[must_use]
    pub fn config(&self) -> ColorConfig {
        self.config
    }

    #[must_use]
    pub fn class_colors(&self) -> &[Color] {
        &self.class_colors
    }

    #[must_use]
    pub fn effective_class_count(&self) -> usize {
        self.config.effective_class_count()
    }

    /// Applies a partial update. Invalid fields (class count below two,
    /// non-finite domain) are ignored. Returns `true` when anything changed.
    pub fn set_config(&mut self, update: ColorConfigUpdate) -> bool {
        let before = self.config;
        let mut next = before;
        if let Some(reverse) = update.reverse {
            next.reverse = reverse;
        }
        if let Some(smooth) = update.smooth {
            next.smooth = smooth;
        }
        if let Some(two_tone) = update.two_tone {
            next.two_tone = two_tone;
        }
        if let Some(flip) = update.two_tone_flip {
            next.two_tone_flip = flip;
        }
        if let Some(class_count) = update.class_count.filter(|count| *count >= 2) {
            next.class_count = class_count;
        }
        if let Some(domain) = update
            .domain
            .filter(|(min, max)| min.is_finite() && max.is_finite())
        {
            next.domain = domain;
        }

        if next == before {
            return false;
        }
        if next.class_count != before.class_count {
            self.class_colors = self.gradient.colors(next.class_count);
        }
        self.config = next;
        trace!(config = ?self.config, "color config updated");
        true
    }

    /// Maps `value` from the configured domain onto `[0, 1]`.
    ///
    /// A zero-span domain or non-finite value maps to `0`.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        let (min, max) = self.config.domain;
        let span = max - min;
        if span == 0.0 || !value.is_finite() {
            return 0.0;
        }
        ((value - min) / span).clamp(0.0, 1.0)
    }

    /// Single-color lookup, continuous or classed.
    #[must_use]
    pub fn encode_color(&self, t: f64) -> Color {
        let mut t = sanitize_unit(t);
        if self.config.reverse {
            t = 1.0 - t;
        }
        if self.config.smooth {
            return self.gradient.sample(t);
        }
        let classes = self.class_colors.len();
        let index = ((t * classes as f64).floor() as usize).min(classes - 1);
        self.class_colors[index]
    }

    /// Blend of the two class colors adjacent to `t`.
    ///
    /// `ratio` is the fraction of `t` past its lower class color. With
    /// `two_tone_flip` the colors swap and the ratio inverts.
    #[must_use]
    pub fn encode_two_tone(&self, t: f64) -> TwoToneColor {
        let t = sanitize_unit(t);
        let last = self.class_colors.len() - 1;
        let scaled = t * last as f64;
        let base = (scaled.floor() as usize).min(last - 1);
        let ratio = (scaled - base as f64).clamp(0.0, 1.0);

        let (lower, upper) = if self.config.reverse {
            (last - base, last - base - 1)
        } else {
            (base, base + 1)
        };

        if self.config.two_tone_flip {
            TwoToneColor {
                inner: self.class_colors[lower],
                outer: self.class_colors[upper],
                ratio: 1.0 - ratio,
            }
        } else {
            TwoToneColor {
                inner: self.class_colors[upper],
                outer: self.class_colors[lower],
                ratio,
            }
        }
    }

    #[must_use]
    pub fn fill(&self, t: f64) -> SegmentFill {
        if self.config.two_tone {
            SegmentFill::TwoTone(self.encode_two_tone(t))
        } else {
            SegmentFill::Flat(self.encode_color(t))
        }
    }

    /// Rounds a raw data extent outward using the effective class count.
    #[must_use]
    pub fn auto_expand(&self, min: f64, max: f64) -> (f64, f64) {
        auto_expand(min, max, self.effective_class_count())
    }

    /// Horizontal legend strip painted with the same lookup as chart segments.
    #[must_use]
    pub fn legend_gradient(&self, width: u32, height: u32) -> LegendGradient {
        let columns = (0..width)
            .map(|x| {
                let t = f64::from(x) / f64::from(width);
                match self.fill(t) {
                    SegmentFill::Flat(color) => LegendColumn {
                        inner: color,
                        outer: color,
                        ratio: 1.0,
                    },
                    SegmentFill::TwoTone(tone) => LegendColumn {
                        inner: tone.inner,
                        outer: tone.outer,
                        ratio: tone.ratio,
                    },
                }
            })
            .collect();
        LegendGradient::new(width, height, columns)
    }

    #[must_use]
    pub fn legend(&self, width: u32, height: u32) -> Legend {
        let (min, max) = self.config.domain;
        Legend {
            gradient: self.legend_gradient(width, height),
            labels: legend_labels(min, max, self.effective_class_count()),
        }
    }
}

fn sanitize_unit(t: f64) -> f64 {
    if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 }
}
