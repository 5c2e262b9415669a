use std::f64::consts::TAU;

use crate::core::{Point, Polygon};

use super::{LayoutInput, SegmentGeometry};

/// Maximum distance between a tessellated arc and the true spiral.
pub const ARC_TOLERANCE: f64 = 0.1;

/// Headroom for the radius growth across a single step.
const STEP_MARGIN: f64 = 0.9;

/// Archimedean spiral layout: one full turn per cycle, radius growing
/// linearly with angle from the center hole to the viewport radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralLayout {
    start: usize,
    end: usize,
    segments_per_cycle: usize,
    cycles: f64,
    phi: f64,
    angle_per_segment: f64,
    radius_start: f64,
    radius_end: f64,
    radius_per_cycle: f64,
    growth: f64,
    outer_band: f64,
}

impl SpiralLayout {
    #[must_use]
    pub fn new(input: &LayoutInput) -> Self {
        let cycles = input.cycles();
        let phi = TAU * cycles;
        let radius_end = input.viewport.radius();
        let radius_start = radius_end * input.center_offset / 100.0;
        let span = radius_end - radius_start;
        Self {
            start: input.start,
            end: input.end,
            segments_per_cycle: input.segments_per_cycle,
            cycles,
            phi,
            angle_per_segment: TAU / input.segments_per_cycle as f64,
            radius_start,
            radius_end,
            radius_per_cycle: span / (cycles + 1.0),
            growth: span / (phi + TAU),
            outer_band: input.default_outer_band(),
        }
    }

    #[must_use]
    pub fn cycles(&self) -> f64 {
        self.cycles
    }

    /// Total angular sweep of the window.
    #[must_use]
    pub fn phi(&self) -> f64 {
        self.phi
    }

    #[must_use]
    pub fn angle_per_segment(&self) -> f64 {
        self.angle_per_segment
    }

    #[must_use]
    pub fn radius_start(&self) -> f64 {
        self.radius_start
    }

    #[must_use]
    pub fn radius_end(&self) -> f64 {
        self.radius_end
    }

    #[must_use]
    pub fn radius_per_cycle(&self) -> f64 {
        self.radius_per_cycle
    }

    /// Radius gained per radian.
    #[must_use]
    pub fn growth(&self) -> f64 {
        self.growth
    }

    /// Leading angle of segment `index`.
    #[must_use]
    pub fn segment_angle(&self, index: usize) -> f64 {
        TAU * (index as f64 - self.start as f64) / self.segments_per_cycle as f64
    }

    /// Spiral radius at `angle`, lifted by `band` of one turn's growth.
    #[must_use]
    pub fn radius_at(&self, angle: f64, band: f64) -> f64 {
        (angle * self.growth + band * TAU * self.growth + self.radius_start).max(0.0)
    }

    #[must_use]
    pub fn point_at(&self, angle: f64, band: f64) -> Point {
        Point::from_polar(self.radius_at(angle, band), angle)
    }

    /// Polyline along the spiral at `band` from `angle_start` to `angle_end`.
    ///
    /// Steps follow the osculating circle at each vertex so every chord stays
    /// within [`ARC_TOLERANCE`] of the curve. Both endpoints are always
    /// emitted.
    #[must_use]
    pub fn generate_arc(&self, angle_start: f64, angle_end: f64, band: f64) -> Vec<Point> {
        let mut angle = angle_start;
        let mut radius = self.radius_at(angle, band);
        let mut points = vec![Point::from_polar(radius, angle)];

        while angle < angle_end {
            let step = self.arc_step(radius);
            angle = if step.is_finite() && step > 0.0 {
                (angle + step).min(angle_end)
            } else {
                angle_end
            };
            radius = self.radius_at(angle, band);
            points.push(Point::from_polar(radius, angle));
        }
        points
    }

    /// Angle increment whose chord has a sagitta of at most the tolerance.
    fn arc_step(&self, radius: f64) -> f64 {
        let a2 = self.growth * self.growth;
        let r2 = radius * radius;
        let speed2 = r2 + a2;
        if speed2 <= 0.0 {
            return f64::INFINITY;
        }
        let osculating = speed2 * speed2.sqrt() / (r2 + 2.0 * a2);
        let tolerance = ARC_TOLERANCE * STEP_MARGIN;
        let half_angle = (1.0 - tolerance / osculating).clamp(-1.0, 1.0).acos();
        2.0 * half_angle * osculating / speed2.sqrt()
    }
}

impl SegmentGeometry for SpiralLayout {
    fn generate_segment(&self, index: usize, inner: f64, outer: f64) -> Polygon {
        let angle = self.segment_angle(index);
        let angle_end = angle + self.angle_per_segment;

        let mut points = self.generate_arc(angle, angle_end, inner);
        let mut outer_arc = self.generate_arc(angle, angle_end, outer);
        outer_arc.reverse();
        points.extend(outer_arc);
        Polygon::new(points)
    }

    fn hit_test(&self, local: Point) -> Option<usize> {
        let span = self.radius_end - self.radius_start;
        if span <= 0.0 || !local.is_finite() {
            return None;
        }

        let mut angle = local.y.atan2(local.x);
        if angle < 0.0 {
            angle += TAU;
        }
        let turn = (angle / TAU).min(1.0 - f64::EPSILON);

        let distance =
            (local.length() - self.radius_start - turn * self.radius_per_cycle) / span;
        let ring = (distance * (self.cycles + 1.0)).floor();

        let index = (self.start as f64 + (turn + ring) * self.segments_per_cycle as f64).floor();
        if index < self.start as f64 || index > self.end as f64 {
            return None;
        }
        Some(index as usize)
    }

    fn generate_outline(&self) -> Polygon {
        Polygon::new(self.generate_arc(self.phi, self.phi + TAU, 0.0))
    }

    fn default_outer_band(&self) -> f64 {
        self.outer_band
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use super::{ARC_TOLERANCE, SpiralLayout};
    use crate::core::{DataWindow, Point, Viewport};
    use crate::geometry::{LayoutInput, SegmentGeometry};

    fn layout(spc: usize, len: usize, offset: f64) -> SpiralLayout {
        let input = LayoutInput::new(
            Viewport::new(800, 600),
            spc,
            DataWindow::full(len),
            85.0,
            offset,
        )
        .expect("layout input");
        SpiralLayout::new(&input)
    }

    fn chord_distance(point: Point, from: Point, to: Point) -> f64 {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let len2 = dx * dx + dy * dy;
        if len2 == 0.0 {
            return (point.x - from.x).hypot(point.y - from.y);
        }
        let t = (((point.x - from.x) * dx + (point.y - from.y) * dy) / len2).clamp(0.0, 1.0);
        (point.x - from.x - t * dx).hypot(point.y - from.y - t * dy)
    }

    #[test]
    fn derived_constants_follow_window() {
        let spiral = layout(365, 365, 15.0);
        assert!((spiral.cycles() - 1.0).abs() <= 1e-12);
        assert!((spiral.phi() - TAU).abs() <= 1e-12);
        assert!((spiral.radius_end() - 300.0).abs() <= 1e-12);
        assert!((spiral.radius_start() - 45.0).abs() <= 1e-12);
        assert!((spiral.radius_per_cycle() - 127.5).abs() <= 1e-12);
        assert!((spiral.growth() * TAU - spiral.radius_per_cycle()).abs() <= 1e-9);
    }

    #[test]
    fn arc_endpoints_are_exact() {
        let spiral = layout(12, 60, 15.0);
        let points = spiral.generate_arc(0.4, 1.3, 0.5);
        let first = points.first().copied().expect("first");
        let last = points.last().copied().expect("last");
        assert!((first.length() - spiral.radius_at(0.4, 0.5)).abs() <= 1e-9);
        assert!((last.length() - spiral.radius_at(1.3, 0.5)).abs() <= 1e-9);
        assert!((last.y.atan2(last.x) - 1.3).abs() <= 1e-9);
    }

    #[test]
    fn arc_chords_stay_within_tolerance() {
        for (spc, len, offset) in [(365, 365, 15.0), (12, 60, 0.0), (7, 364, 15.0)] {
            let spiral = layout(spc, len, offset);
            let band = 0.85;
            let points = spiral.generate_arc(0.0, spiral.phi() + TAU, band);
            for pair in points.windows(2) {
                let a0 = pair[0].y.atan2(pair[0].x);
                let mut a1 = pair[1].y.atan2(pair[1].x);
                while a1 < a0 {
                    a1 += TAU;
                }
                let base = spiral_turns(pair[0], &spiral, band);
                for k in 1..8 {
                    let angle = base + (a1 - a0) * f64::from(k) / 8.0;
                    let truth = spiral.point_at(angle, band);
                    let deviation = chord_distance(truth, pair[0], pair[1]);
                    assert!(
                        deviation <= ARC_TOLERANCE + 1e-9,
                        "deviation {deviation} at angle {angle} ({spc}/{len})"
                    );
                }
            }
        }
    }

    /// Unwrapped angle of an arc vertex, recovered from its radius.
    fn spiral_turns(point: Point, spiral: &SpiralLayout, band: f64) -> f64 {
        (point.length() - spiral.radius_start() - band * TAU * spiral.growth()) / spiral.growth()
    }

    #[test]
    fn hit_test_recovers_segment_midpoints() {
        for (spc, len) in [(365, 365), (12, 60), (7, 364)] {
            let spiral = layout(spc, len, 15.0);
            let band = spiral.default_outer_band() / 2.0;
            for index in 0..len {
                let angle = spiral.segment_angle(index) + spiral.angle_per_segment() / 2.0;
                let local = spiral.point_at(angle, band);
                assert_eq!(spiral.hit_test(local), Some(index), "{spc}/{len} index {index}");
            }
        }
    }

    #[test]
    fn hit_test_misses_outside_window() {
        let spiral = layout(12, 60, 15.0);
        assert_eq!(spiral.hit_test(Point::new(0.0, 0.0)), None);
        assert_eq!(spiral.hit_test(Point::new(1_000.0, 0.0)), None);
        assert_eq!(spiral.hit_test(Point::new(f64::NAN, 0.0)), None);
    }

    #[test]
    fn segment_polygon_contains_its_midpoint() {
        let spiral = layout(12, 60, 15.0);
        let polygon = spiral.segment(17);
        let angle = spiral.segment_angle(17) + spiral.angle_per_segment() / 2.0;
        assert!(polygon.contains(spiral.point_at(angle, 0.4)));
        assert!(!polygon.contains(spiral.point_at(angle, 1.2)));
    }

    #[test]
    fn full_offset_disables_picking() {
        let spiral = layout(12, 60, 100.0);
        assert_eq!(spiral.hit_test(Point::new(300.0, 0.0)), None);
    }
}
