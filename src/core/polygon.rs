use crate::core::Point;

/// Ordered vertex list in a layout-local frame, implicitly closed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertex average. Good enough for convex-ish segment bands.
    #[must_use]
    pub fn centroid(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        let count = self.points.len() as f64;
        let (sum_x, sum_y) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(x, y), point| (x + point.x, y + point.y));
        Some(Point::new(sum_x / count, sum_y / count))
    }

    /// Even-odd containment test.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let pi = self.points[i];
            let pj = self.points[j];
            if (pi.y > point.y) != (pj.y > point.y)
                && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|point| point.is_finite())
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::Polygon;
    use crate::core::Point;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
    }

    #[test]
    fn centroid_of_square_is_its_middle() {
        let centroid = unit_square().centroid().expect("centroid");
        assert_eq!(centroid, Point::new(0.5, 0.5));
    }

    #[test]
    fn even_odd_containment() {
        let square = unit_square();
        assert!(square.contains(Point::new(0.25, 0.75)));
        assert!(!square.contains(Point::new(1.5, 0.5)));
        assert!(Polygon::default().centroid().is_none());
    }
}
