use palette::white_point::D65;
use palette::{FromColor, IntoColor, Lab, LinSrgb, Mix, Srgb};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Perceptual gradient interpolating between control points in CIE Lab.
///
/// Control points are spread evenly over `[0, 1]`; samples are snapped onto
/// the 8-bit grid so equal inputs always produce identical fills.
#[derive(Debug, Clone, PartialEq)]
pub struct LabGradient {
    stops: Vec<Lab<D65, f64>>,
}

impl LabGradient {
    pub fn new(colors: &[Color]) -> ChartResult<Self> {
        if colors.len() < 2 {
            return Err(ChartError::InvalidData(
                "a gradient needs at least two colors".to_owned(),
            ));
        }
        let mut stops = Vec::with_capacity(colors.len());
        for color in colors {
            color.validate()?;
            let srgb = Srgb::new(color.red, color.green, color.blue);
            let linear: LinSrgb<f64> = srgb.into_linear();
            stops.push(linear.into_color());
        }
        Ok(Self { stops })
    }

    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Continuous lookup. Non-finite input maps to the low end.
    #[must_use]
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let intervals = self.stops.len() - 1;
        let scaled = t * intervals as f64;
        let index = (scaled.floor() as usize).min(intervals - 1);
        let lab = self.stops[index].mix(self.stops[index + 1], scaled - index as f64);

        let linear = LinSrgb::<f64>::from_color(lab);
        let srgb: Srgb<f64> = Srgb::from_linear(linear);
        Color::rgb(srgb.red, srgb.green, srgb.blue).quantized()
    }

    /// `count` samples evenly spaced over `[0, 1]`, both ends included.
    #[must_use]
    pub fn colors(&self, count: usize) -> Vec<Color> {
        match count {
            0 => Vec::new(),
            1 => vec![self.sample(0.0)],
            _ => (0..count)
                .map(|i| self.sample(i as f64 / (count - 1) as f64))
                .collect(),
        }
    }
}
