use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Channels quantized to 8 bits.
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.red), quantize(self.green), quantize(self.blue)]
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Snaps every channel onto the 8-bit grid.
    #[must_use]
    pub fn quantized(self) -> Self {
        let [r, g, b] = self.to_rgb8();
        Self {
            alpha: self.alpha,
            ..Self::from_rgb8(r, g, b)
        }
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Affine placement of a layout-local frame: translate, then rotate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotation_rad: f64,
}

impl FrameTransform {
    #[must_use]
    pub const fn new(translate_x: f64, translate_y: f64, rotation_rad: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            rotation_rad,
        }
    }

    /// Maps a local point to pixel space.
    #[must_use]
    pub fn apply(self, point: Point) -> Point {
        point
            .rotated(self.rotation_rad)
            .translated(self.translate_x, self.translate_y)
    }

    /// Maps a pixel-space point back into the local frame.
    #[must_use]
    pub fn invert(self, point: Point) -> Point {
        point
            .translated(-self.translate_x, -self.translate_y)
            .rotated(-self.rotation_rad)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.translate_x.is_finite()
            || !self.translate_y.is_finite()
            || !self.rotation_rad.is_finite()
        {
            return Err(ChartError::InvalidData(
                "frame transform must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Stroke settings shared by outlines and lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
}

impl Stroke {
    #[must_use]
    pub const fn new(width: f64, color: Color) -> Self {
        Self { width, color }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one closed polygon in its layer's local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPrimitive {
    pub points: Vec<Point>,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl PolygonPrimitive {
    #[must_use]
    pub fn filled(points: Vec<Point>, color: Color) -> Self {
        Self {
            points,
            fill: Some(color),
            stroke: None,
        }
    }

    #[must_use]
    pub fn stroked(points: Vec<Point>, stroke: Stroke) -> Self {
        Self {
            points,
            fill: None,
            stroke: Some(stroke),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.points.is_empty() {
            return Err(ChartError::InvalidData(
                "polygon must contain at least one point".to_owned(),
            ));
        }
        if self.points.iter().any(|point| !point.is_finite()) {
            return Err(ChartError::InvalidData(
                "polygon coordinates must be finite".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some(stroke) = self.stroke {
            stroke.validate()?;
        }
        Ok(())
    }
}

/// Draw command for one line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    #[must_use]
    pub fn between(from: Point, to: Point, stroke_width: f64, color: Color) -> Self {
        Self::new(from.x, from.y, to.x, to.y, stroke_width, color)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Axis-aligned filled rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ChartError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Soft glow painted outside `outline`, clipped to its exterior.
#[derive(Debug, Clone, PartialEq)]
pub struct GlowPrimitive {
    pub outline: Vec<Point>,
    pub fill: Color,
    pub glow_color: Color,
    pub blur_px: f64,
}

impl GlowPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if self.outline.iter().any(|point| !point.is_finite()) {
            return Err(ChartError::InvalidData(
                "glow outline must be finite".to_owned(),
            ));
        }
        if !self.blur_px.is_finite() || self.blur_px < 0.0 {
            return Err(ChartError::InvalidData(
                "glow blur must be finite and >= 0".to_owned(),
            ));
        }
        self.fill.validate()?;
        self.glow_color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, FrameTransform};
    use crate::core::Point;

    #[test]
    fn rgb8_channels_survive_quantization() {
        let color = Color::from_rgb8(0xd5, 0x3e, 0x4f);
        assert_eq!(color.to_rgb8(), [0xd5, 0x3e, 0x4f]);
        assert_eq!(color.to_hex(), "#d53e4f");
    }

    #[test]
    fn transform_inverts_itself() {
        let transform = FrameTransform::new(120.0, 80.0, 1.1);
        let local = Point::new(-14.0, 33.5);
        let back = transform.invert(transform.apply(local));
        assert!((back.x - local.x).abs() <= 1e-9);
        assert!((back.y - local.y).abs() <= 1e-9);
    }
}
