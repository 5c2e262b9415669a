//! Segment geometry for the two chart representations.
//!
//! Both layouts work in a layout-local frame: origin at the viewport center,
//! un-rotated. [`raster_transform`] and [`overlay_transform`] place that frame
//! in pixel space; [`screen_to_local`] maps pointer positions back.

pub mod heatmap;
pub mod spiral;

use serde::{Deserialize, Serialize};

use crate::core::{DataWindow, Point, Polygon, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::FrameTransform;

pub use heatmap::HeatmapLayout;
pub use spiral::{ARC_TOLERANCE, SpiralLayout};

/// Spiral/heatmap switch. Serialized as the `1 = spiral` switch value hosts
/// use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Representation {
    Heatmap,
    #[default]
    Spiral,
}

impl Representation {
    /// Rotation applied when switching to this representation.
    #[must_use]
    pub const fn default_rotation_deg(self) -> f64 {
        match self {
            Self::Spiral => 270.0,
            Self::Heatmap => 0.0,
        }
    }

    #[must_use]
    pub const fn from_switch(value: bool) -> Self {
        if value { Self::Spiral } else { Self::Heatmap }
    }

    #[must_use]
    pub const fn is_spiral(self) -> bool {
        matches!(self, Self::Spiral)
    }
}

/// Everything a layout needs to derive its per-frame constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    pub viewport: Viewport,
    pub segments_per_cycle: usize,
    pub start: usize,
    pub end: usize,
    /// Painted share of each band, in percent.
    pub band_scale: f64,
    /// Inner hole (spiral) or margin (heatmap), in percent.
    pub center_offset: f64,
}

impl LayoutInput {
    pub fn new(
        viewport: Viewport,
        segments_per_cycle: usize,
        window: DataWindow,
        band_scale: f64,
        center_offset: f64,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if segments_per_cycle == 0 {
            return Err(ChartError::InvalidConfig(
                "segments per cycle must be >= 1".to_owned(),
            ));
        }
        if !band_scale.is_finite() || !center_offset.is_finite() {
            return Err(ChartError::InvalidConfig(
                "band scale and center offset must be finite".to_owned(),
            ));
        }
        Ok(Self {
            viewport,
            segments_per_cycle,
            start: window.start(),
            end: window.end(),
            band_scale,
            center_offset,
        })
    }

    #[must_use]
    pub fn window_len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Cycles covered by the window; fractional when the window is not a
    /// whole number of cycles.
    #[must_use]
    pub fn cycles(&self) -> f64 {
        self.window_len() as f64 / self.segments_per_cycle as f64
    }

    /// Outer band fraction of an undivided segment.
    #[must_use]
    pub fn default_outer_band(&self) -> f64 {
        self.band_scale / 100.0
    }
}

/// Capabilities every chart representation provides.
pub trait SegmentGeometry {
    /// Polygon for data index `index`, covering band fractions
    /// `[inner, outer]` of its segment.
    fn generate_segment(&self, index: usize, inner: f64, outer: f64) -> Polygon;

    /// Inverse mapping of a layout-local point onto a data index.
    fn hit_test(&self, local: Point) -> Option<usize>;

    /// Silhouette of the drawable extent.
    fn generate_outline(&self) -> Polygon;

    fn default_outer_band(&self) -> f64;

    /// Segment with the default `[0, bandScale]` band.
    fn segment(&self, index: usize) -> Polygon {
        self.generate_segment(index, 0.0, self.default_outer_band())
    }
}

/// Active layout strategy, replaced wholesale when the representation changes.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutGeometry {
    Spiral(SpiralLayout),
    Heatmap(HeatmapLayout),
}

impl LayoutGeometry {
    #[must_use]
    pub fn build(representation: Representation, input: &LayoutInput) -> Self {
        match representation {
            Representation::Spiral => Self::Spiral(SpiralLayout::new(input)),
            Representation::Heatmap => Self::Heatmap(HeatmapLayout::new(input)),
        }
    }

    #[must_use]
    pub fn representation(&self) -> Representation {
        match self {
            Self::Spiral(_) => Representation::Spiral,
            Self::Heatmap(_) => Representation::Heatmap,
        }
    }

    fn strategy(&self) -> &dyn SegmentGeometry {
        match self {
            Self::Spiral(layout) => layout,
            Self::Heatmap(layout) => layout,
        }
    }
}

impl SegmentGeometry for LayoutGeometry {
    fn generate_segment(&self, index: usize, inner: f64, outer: f64) -> Polygon {
        self.strategy().generate_segment(index, inner, outer)
    }

    fn hit_test(&self, local: Point) -> Option<usize> {
        self.strategy().hit_test(local)
    }

    fn generate_outline(&self) -> Polygon {
        self.strategy().generate_outline()
    }

    fn default_outer_band(&self) -> f64 {
        self.strategy().default_outer_band()
    }
}

/// Places the layout-local frame for the cached raster.
#[must_use]
pub fn raster_transform(viewport: Viewport, rotation_deg: f64) -> FrameTransform {
    FrameTransform::new(
        (f64::from(viewport.width) / 2.0).floor() + 0.5,
        (f64::from(viewport.height) / 2.0).floor() + 0.5,
        rotation_deg.to_radians(),
    )
}

/// Places the layout-local frame for highlight and guidance overlays.
#[must_use]
pub fn overlay_transform(viewport: Viewport, rotation_deg: f64) -> FrameTransform {
    FrameTransform::new(
        (f64::from(viewport.width) / 2.0).floor(),
        (f64::from(viewport.height) / 2.0).floor(),
        rotation_deg.to_radians(),
    )
}

/// Maps a pointer position into the layout-local frame.
#[must_use]
pub fn screen_to_local(viewport: Viewport, rotation_deg: f64, screen: Point) -> Point {
    let center = viewport.center();
    FrameTransform::new(center.x, center.y, rotation_deg.to_radians()).invert(screen)
}

#[cfg(test)]
mod tests {
    use super::{
        LayoutGeometry, LayoutInput, Representation, SegmentGeometry, raster_transform,
        screen_to_local,
    };
    use crate::core::{DataWindow, Point, Viewport};

    fn input() -> LayoutInput {
        LayoutInput::new(
            Viewport::new(640, 480),
            12,
            DataWindow::full(60),
            85.0,
            15.0,
        )
        .expect("layout input")
    }

    #[test]
    fn input_rejects_degenerate_viewport_and_cycle() {
        let window = DataWindow::full(10);
        assert!(LayoutInput::new(Viewport::new(0, 10), 5, window, 85.0, 15.0).is_err());
        assert!(LayoutInput::new(Viewport::new(10, 10), 0, window, 85.0, 15.0).is_err());
    }

    #[test]
    fn strategies_swap_wholesale() {
        let input = input();
        let spiral = LayoutGeometry::build(Representation::Spiral, &input);
        let heatmap = LayoutGeometry::build(Representation::Heatmap, &input);
        assert_eq!(spiral.representation(), Representation::Spiral);
        assert_eq!(heatmap.representation(), Representation::Heatmap);
        assert_eq!(heatmap.segment(0).len(), 4);
        assert!(spiral.segment(0).len() > 4);
    }

    #[test]
    fn screen_to_local_undoes_raster_rotation() {
        let viewport = Viewport::new(401, 300);
        let local = Point::new(37.0, -12.5);
        let screen = raster_transform(viewport, 270.0).apply(local);
        let back = screen_to_local(viewport, 270.0, screen);
        // Raster origin is snapped to the pixel grid, the pointer frame is not.
        assert!((back.length() - local.length()).abs() <= 1.0);
        assert!((back.x - local.x).abs() <= 1.0);
        assert!((back.y - local.y).abs() <= 1.0);
    }

    #[test]
    fn representation_rotation_defaults() {
        assert_eq!(Representation::Spiral.default_rotation_deg(), 270.0);
        assert_eq!(Representation::Heatmap.default_rotation_deg(), 0.0);
        assert_eq!(Representation::from_switch(false), Representation::Heatmap);
    }
}
