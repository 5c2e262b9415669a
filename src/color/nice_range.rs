//! Outward rounding of a data range onto "nice" class boundaries.
//!
//! Step 4 of the usual nice-interval recipe (round the class width to a
//! multiple of two) is replaced by a plain ceiling of the class width.

/// Expands `[min, max]` so `max` lands on a multiple of ten at the range's
/// order of magnitude and the span divides into `classes` equal intervals.
///
/// A zero or negative span stays unscaled, so `auto_expand(0, 0, n)` is
/// `(0, 0)`.
#[must_use]
pub fn auto_expand(min: f64, max: f64, classes: usize) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return (min, max);
    }
    let classes = classes.max(1) as f64;

    let range = max - min;
    let n = if range > 0.0 {
        order_of_magnitude(range)
    } else {
        0
    };
    let scale = 10f64.powi(n);
    let unscale = 10f64.powi(-n);

    let max = next_multiple_10(max * scale);
    let min = min * scale;

    let range = (max - min).abs();
    let class_range = (range / classes).ceil();
    let min = max - class_range * classes;

    (min * unscale, max * unscale)
}

/// Exponent `n` such that `value * 10^n` lies in `(10, 100]`.
fn order_of_magnitude(mut value: f64) -> i32 {
    let mut n = 0;
    while value <= 10.0 {
        value *= 10.0;
        n += 1;
    }
    while value > 100.0 {
        value /= 10.0;
        n -= 1;
    }
    n
}

fn next_multiple_10(value: f64) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    if value < 10.0 {
        return 10.0;
    }
    if value % 10.0 == 0.0 {
        return value;
    }
    let mut next = (value / 10.0).round() * 10.0;
    if next < value {
        next += 10.0;
    }
    next
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{auto_expand, next_multiple_10, order_of_magnitude};

    #[test]
    fn zero_range_stays_put() {
        assert_eq!(auto_expand(0.0, 0.0, 7), (0.0, 0.0));
    }

    #[test]
    fn small_integer_range_expands_to_class_multiple() {
        let (min, max) = auto_expand(2.0, 47.0, 7);
        assert_eq!((min, max), (1.0, 50.0));
    }

    #[test]
    fn range_already_multiple_of_ten_is_kept() {
        assert_eq!(auto_expand(0.0, 50.0, 5), (0.0, 50.0));
        let (min, max) = auto_expand(0.0, 10.0, 5);
        assert_abs_diff_eq!(min, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(max, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn negative_min_is_extended_downward() {
        assert_eq!(auto_expand(-13.0, 27.0, 4), (-14.0, 30.0));
    }

    #[test]
    fn large_range_is_scaled_down_first() {
        let (min, max) = auto_expand(0.0, 364.0, 7);
        assert_abs_diff_eq!(min, -20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(max, 400.0, epsilon = 1e-9);
    }

    #[test]
    fn fractional_range_is_scaled_up_first() {
        let (min, max) = auto_expand(0.12, 0.57, 5);
        assert_abs_diff_eq!(max, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(min, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn helpers_match_reference_behavior() {
        assert_eq!(order_of_magnitude(45.0), 0);
        assert_eq!(order_of_magnitude(10.0), 1);
        assert_eq!(order_of_magnitude(364.0), -1);
        assert_eq!(next_multiple_10(0.0), 0.0);
        assert_eq!(next_multiple_10(3.0), 10.0);
        assert_eq!(next_multiple_10(47.0), 50.0);
        assert_eq!(next_multiple_10(41.0), 50.0);
        assert_eq!(next_multiple_10(60.0), 60.0);
    }
}
