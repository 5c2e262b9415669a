use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::render::{Color, RectPrimitive, TextHAlign};

pub const DEFAULT_LEGEND_WIDTH: u32 = 30;
pub const DEFAULT_LEGEND_HEIGHT: u32 = 1;

/// One pixel column of the legend strip.
///
/// `inner` covers the top `ratio` of the strip height, `outer` the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendColumn {
    pub inner: Color,
    pub outer: Color,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendGradient {
    width: u32,
    height: u32,
    columns: Vec<LegendColumn>,
}

impl LegendGradient {
    #[must_use]
    pub fn new(width: u32, height: u32, columns: Vec<LegendColumn>) -> Self {
        Self {
            width,
            height,
            columns,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn columns(&self) -> &[LegendColumn] {
        &self.columns
    }

    /// Rasterizes into a row-major RGBA buffer of `width * height * 4` bytes.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for y in 0..self.height {
            let center = (f64::from(y) + 0.5) / f64::from(self.height);
            for column in &self.columns {
                let color = if center < column.ratio {
                    column.inner
                } else {
                    column.outer
                };
                let [r, g, b] = color.to_rgb8();
                let a = (color.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
                pixels.extend_from_slice(&[r, g, b, a]);
            }
        }
        pixels
    }

    /// Draw rectangles placing the strip at `(x, y)` scaled to
    /// `width x height` pixels.
    #[must_use]
    pub fn rects(&self, x: f64, y: f64, width: f64, height: f64) -> Vec<RectPrimitive> {
        if self.columns.is_empty() {
            return Vec::new();
        }
        let column_width = width / self.columns.len() as f64;
        let mut rects = Vec::with_capacity(self.columns.len() * 2);
        for (i, column) in self.columns.iter().enumerate() {
            let left = x + i as f64 * column_width;
            let split = column.ratio.clamp(0.0, 1.0) * height;
            if split > 0.0 {
                rects.push(RectPrimitive::new(left, y, column_width, split, column.inner));
            }
            if split < height {
                rects.push(RectPrimitive::new(
                    left,
                    y + split,
                    column_width,
                    height - split,
                    column.outer,
                ));
            }
        }
        rects
    }
}

/// Class boundary label at `position` in `[0, 1]` along the strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendLabel {
    pub text: String,
    pub position: f64,
    pub align: TextHAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub gradient: LegendGradient,
    pub labels: Vec<LegendLabel>,
}

/// `classes + 1` evenly spaced boundary labels across `[min, max]`.
#[must_use]
pub fn legend_labels(min: f64, max: f64, classes: usize) -> Vec<LegendLabel> {
    let classes = classes.max(1);
    (0..=classes)
        .map(|i| {
            let position = i as f64 / classes as f64;
            let align = if i == 0 {
                TextHAlign::Left
            } else if i == classes {
                TextHAlign::Right
            } else {
                TextHAlign::Center
            };
            LegendLabel {
                text: format_number(min + position * (max - min)),
                position,
                align,
            }
        })
        .collect()
}

/// en-US formatting: grouped thousands, at most three fraction digits,
/// halves rounded away from zero.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_owned();
    }
    let Some(decimal) = Decimal::from_f64(value) else {
        return value.to_string();
    };
    let rounded = decimal
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if rounded.is_zero() {
        return "0".to_owned();
    }

    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + integer.len() / 3 + 1);
    if rounded.is_sign_negative() {
        out.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{LegendColumn, LegendGradient, format_number, legend_labels};
    use crate::render::{Color, TextHAlign};

    #[test]
    fn formats_like_en_us() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(-1234.5), "-1,234.5");
        assert_eq!(format_number(0.1234), "0.123");
        assert_eq!(format_number(1.0625), "1.063");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(999.9999), "1,000");
    }

    #[test]
    fn labels_cover_range_with_edge_alignment() {
        let labels = legend_labels(-20.0, 400.0, 7);
        assert_eq!(labels.len(), 8);
        assert_eq!(labels[0].text, "-20");
        assert_eq!(labels[1].text, "40");
        assert_eq!(labels[7].text, "400");
        assert_eq!(labels[0].align, TextHAlign::Left);
        assert_eq!(labels[3].align, TextHAlign::Center);
        assert_eq!(labels[7].align, TextHAlign::Right);
        assert_eq!(labels[7].position, 1.0);
    }

    #[test]
    fn split_columns_rasterize_top_and_bottom() {
        let black = Color::rgb(0.0, 0.0, 0.0);
        let gradient = LegendGradient::new(
            1,
            4,
            vec![LegendColumn {
                inner: Color::WHITE,
                outer: black,
                ratio: 0.5,
            }],
        );
        let pixels = gradient.to_rgba8();
        assert_eq!(pixels.len(), 16);
        assert_eq!(&pixels[0..4], &[255, 255, 255, 255]);
        assert_eq!(&pixels[12..16], &[0, 0, 0, 255]);

        let rects = gradient.rects(10.0, 0.0, 30.0, 8.0);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].height, 4.0);
        assert_eq!(rects[1].y, 4.0);
    }
}
