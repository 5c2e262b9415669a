use crate::core::{Point, Polygon};

use super::{LayoutInput, SegmentGeometry};

/// Calendar-style grid: one row per cycle, one column per segment.
///
/// Cells are snapped to half pixels so one-pixel strokes land on the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapLayout {
    start: usize,
    end: usize,
    segments_per_cycle: usize,
    rows: usize,
    width: f64,
    height: f64,
    cell_width: f64,
    cell_height: f64,
    outer_band: f64,
}

impl HeatmapLayout {
    #[must_use]
    pub fn new(input: &LayoutInput) -> Self {
        let keep = (100.0 - input.center_offset) / 100.0;
        let width = f64::from(input.viewport.width) * keep;
        let height = f64::from(input.viewport.height) * keep;
        let rows = (input.cycles().ceil() as usize).max(1);
        Self {
            start: input.start,
            end: input.end,
            segments_per_cycle: input.segments_per_cycle,
            rows,
            width,
            height,
            cell_width: width / input.segments_per_cycle as f64,
            cell_height: height / rows as f64,
            outer_band: input.default_outer_band(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cell_size(&self) -> (f64, f64) {
        (self.cell_width, self.cell_height)
    }

    /// Unsnapped top-left corner of the cell holding `index`.
    #[must_use]
    pub fn cell_origin(&self, index: usize) -> Point {
        let offset = index.saturating_sub(self.start);
        let col = offset % self.segments_per_cycle;
        let row = offset / self.segments_per_cycle;
        Point::new(
            col as f64 * self.cell_width - self.width / 2.0,
            row as f64 * self.cell_height - self.height / 2.0,
        )
    }
}

impl SegmentGeometry for HeatmapLayout {
    /// Bands grow upward from the bottom edge of the cell.
    fn generate_segment(&self, index: usize, inner: f64, outer: f64) -> Polygon {
        let origin = self.cell_origin(index);
        let left = origin.x.floor() + 0.5;
        let right = left + self.cell_width.ceil();
        let top = (origin.y + (1.0 - inner) * self.cell_height).floor() + 0.5;
        let bottom = (origin.y + (1.0 - outer) * self.cell_height).floor() + 0.5;
        Polygon::new(vec![
            Point::new(left, top),
            Point::new(right, top),
            Point::new(right, bottom),
            Point::new(left, bottom),
        ])
    }

    fn hit_test(&self, local: Point) -> Option<usize> {
        let x = local.x + self.width / 2.0;
        let y = local.y + self.height / 2.0;
        if !(0.0..=self.width).contains(&x) || !(0.0..=self.height).contains(&y) {
            return None;
        }
        let col = ((x / self.cell_width).floor() as usize).min(self.segments_per_cycle - 1);
        let row = ((y / self.cell_height).floor() as usize).min(self.rows - 1);
        let index = self.start + col + row * self.segments_per_cycle;
        (index <= self.end).then_some(index)
    }

    fn generate_outline(&self) -> Polygon {
        let left = (-self.width / 2.0).floor() + 0.5;
        let right = left + self.width.ceil();
        let top = (-self.height / 2.0).floor() + 0.5;
        let bottom = top + self.height.ceil();
        Polygon::new(vec![
            Point::new(left, top),
            Point::new(right, top),
            Point::new(right, bottom),
            Point::new(left, bottom),
        ])
    }

    fn default_outer_band(&self) -> f64 {
        self.outer_band
    }
}
