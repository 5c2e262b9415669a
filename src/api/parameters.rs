use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::color::ColorScheme;
use crate::error::{ChartError, ChartResult};
use crate::geometry::Representation;

use super::SpiralChartConfig;

/// Identity of every user-facing chart parameter, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterId {
    SegmentsPerCycle,
    NumberOfCycles,
    DelimiterStrength,
    BandScale,
    Offset,
    Rotation,
    ColorMap,
    ColorLegend,
    SmoothColors,
    ReverseColors,
    TwoToneColors,
    TwoToneFlip,
    Representation,
    Guidance,
}

impl ParameterId {
    pub const ALL: [Self; 14] = [
        Self::SegmentsPerCycle,
        Self::NumberOfCycles,
        Self::DelimiterStrength,
        Self::BandScale,
        Self::Offset,
        Self::Rotation,
        Self::ColorMap,
        Self::ColorLegend,
        Self::SmoothColors,
        Self::ReverseColors,
        Self::TwoToneColors,
        Self::TwoToneFlip,
        Self::Representation,
        Self::Guidance,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SegmentsPerCycle => "Segments per Cycle",
            Self::NumberOfCycles => "Number of Cycles",
            Self::DelimiterStrength => "Delimiter Strength",
            Self::BandScale => "Band Scale",
            Self::Offset => "Border/Center Offset",
            Self::Rotation => "Rotation",
            Self::ColorMap => "Color Map",
            Self::ColorLegend => "Color Legend",
            Self::SmoothColors => "Smooth Colors",
            Self::ReverseColors => "Reverse Colors",
            Self::TwoToneColors => "Two-tone Colors",
            Self::TwoToneFlip => "Two-tone Flip",
            Self::Representation => "Heatmap / Spiral",
            Self::Guidance => "Guidance",
        }
    }

    #[must_use]
    pub const fn kind(self) -> ParameterKind {
        match self {
            Self::SegmentsPerCycle
            | Self::NumberOfCycles
            | Self::DelimiterStrength
            | Self::BandScale
            | Self::Offset
            | Self::Rotation => ParameterKind::Slider,
            Self::ColorMap => ParameterKind::ColorSelector,
            Self::ColorLegend
            | Self::SmoothColors
            | Self::ReverseColors
            | Self::TwoToneColors
            | Self::TwoToneFlip
            | Self::Representation
            | Self::Guidance => ParameterKind::Switch,
        }
    }

    /// Inclusive numeric bounds; switches are `[0, 1]`.
    #[must_use]
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Self::SegmentsPerCycle => (1.0, 999.0),
            Self::NumberOfCycles => (0.0, 100.0),
            Self::DelimiterStrength => (0.0, 100.0),
            Self::BandScale => (1.0, 100.0),
            Self::Offset => (0.0, 99.0),
            Self::Rotation => (0.0, 360.0),
            _ => (0.0, 1.0),
        }
    }

    /// Integral parameters round incoming values before validation.
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(self.kind(), ParameterKind::Switch) || matches!(self, Self::SegmentsPerCycle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    Slider,
    Switch,
    ColorSelector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterValue {
    Number(OrderedFloat<f64>),
    Scheme(ColorScheme),
}

impl ParameterValue {
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }

    #[must_use]
    pub fn switch(value: bool) -> Self {
        Self::number(if value { 1.0 } else { 0.0 })
    }

    #[must_use]
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value.into_inner()),
            Self::Scheme(_) => None,
        }
    }

    #[must_use]
    pub fn as_scheme(self) -> Option<ColorScheme> {
        match self {
            Self::Scheme(scheme) => Some(scheme),
            Self::Number(_) => None,
        }
    }
}

/// Widget description plus current value of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parameter {
    pub id: ParameterId,
    pub kind: ParameterKind,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub value: ParameterValue,
}

impl Parameter {
    fn new(id: ParameterId, value: ParameterValue) -> Self {
        let (min, max) = id.bounds();
        Self {
            id,
            kind: id.kind(),
            label: id.label(),
            min,
            max,
            value,
        }
    }

    /// Normalizes and validates a candidate value, or `None` when it must be
    /// rejected.
    fn accept(&self, value: ParameterValue) -> Option<ParameterValue> {
        match (self.kind, value) {
            (ParameterKind::ColorSelector, ParameterValue::Scheme(_)) => Some(value),
            (ParameterKind::Slider | ParameterKind::Switch, ParameterValue::Number(number)) => {
                let mut number = number.into_inner();
                if number.is_nan() {
                    return None;
                }
                if self.id.is_integral() {
                    number = number.round();
                }
                (self.min..=self.max)
                    .contains(&number)
                    .then(|| ParameterValue::number(number))
            }
            _ => None,
        }
    }
}

/// Ordered parameter table. Every stored value is always within its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    entries: IndexMap<ParameterId, Parameter>,
}

impl ParameterSet {
    pub fn from_config(config: &SpiralChartConfig) -> ChartResult<Self> {
        let layout = config.layout;
        let colors = config.colors;
        let initial = [
            (
                ParameterId::SegmentsPerCycle,
                ParameterValue::number(layout.segments_per_cycle as f64),
            ),
            (ParameterId::NumberOfCycles, ParameterValue::number(layout.cycles)),
            (
                ParameterId::DelimiterStrength,
                ParameterValue::number(layout.delimiter_strength),
            ),
            (ParameterId::BandScale, ParameterValue::number(layout.band_scale)),
            (ParameterId::Offset, ParameterValue::number(layout.center_offset)),
            (ParameterId::Rotation, ParameterValue::number(layout.rotation_deg)),
            (ParameterId::ColorMap, ParameterValue::Scheme(colors.scheme)),
            (ParameterId::ColorLegend, ParameterValue::switch(colors.legend_visible)),
            (ParameterId::SmoothColors, ParameterValue::switch(colors.smooth)),
            (ParameterId::ReverseColors, ParameterValue::switch(colors.reverse)),
            (ParameterId::TwoToneColors, ParameterValue::switch(colors.two_tone)),
            (ParameterId::TwoToneFlip, ParameterValue::switch(colors.two_tone_flip)),
            (
                ParameterId::Representation,
                ParameterValue::switch(layout.representation.is_spiral()),
            ),
            (ParameterId::Guidance, ParameterValue::switch(layout.guidance_enabled)),
        ];

        let mut entries = IndexMap::with_capacity(initial.len());
        for (id, value) in initial {
            let template = Parameter::new(id, value);
            let accepted = template.accept(value).ok_or_else(|| {
                ChartError::InvalidConfig(format!(
                    "parameter `{}` value {value:?} is outside [{}, {}]",
                    id.label(),
                    template.min,
                    template.max
                ))
            })?;
            entries.insert(id, Parameter::new(id, accepted));
        }
        Ok(Self { entries })
    }

    /// Parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.entries.values()
    }

    #[must_use]
    pub fn get(&self, id: ParameterId) -> Option<&Parameter> {
        self.entries.get(&id)
    }

    #[must_use]
    pub fn value(&self, id: ParameterId) -> Option<ParameterValue> {
        self.entries.get(&id).map(|parameter| parameter.value)
    }

    /// Numeric value; `0` for the color selector.
    #[must_use]
    pub fn number(&self, id: ParameterId) -> f64 {
        self.value(id)
            .and_then(ParameterValue::as_number)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn switch(&self, id: ParameterId) -> bool {
        self.number(id) != 0.0
    }

    #[must_use]
    pub fn scheme(&self) -> ColorScheme {
        self.value(ParameterId::ColorMap)
            .and_then(ParameterValue::as_scheme)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn segments_per_cycle(&self) -> usize {
        self.number(ParameterId::SegmentsPerCycle).max(1.0) as usize
    }

    #[must_use]
    pub fn representation(&self) -> Representation {
        Representation::from_switch(self.switch(ParameterId::Representation))
    }

    /// Stores `value` when it is valid and differs from the current value.
    ///
    /// NaN, out-of-range, mistyped and unchanged values are rejected and
    /// leave the table untouched.
    pub fn set(&mut self, id: ParameterId, value: ParameterValue) -> bool {
        let Some(parameter) = self.entries.get_mut(&id) else {
            return false;
        };
        let Some(accepted) = parameter.accept(value) else {
            trace!(parameter = ?id, value = ?value, "parameter value rejected");
            return false;
        };
        if accepted == parameter.value {
            return false;
        }
        parameter.value = accepted;
        true
    }
}
