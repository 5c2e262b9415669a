use serde::{Deserialize, Serialize};

/// Tolerance applied before flooring `cycles * segments_per_cycle`, so a
/// cycle count re-derived from a span reproduces that span exactly.
const TARGET_EPSILON: f64 = 1e-9;

/// Active inclusive data window `[start, end]` over a series of `series_len`
/// values.
///
/// Every mutation keeps `0 <= start <= end <= series_len - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataWindow {
    start: usize,
    end: usize,
    series_len: usize,
}

impl DataWindow {
    /// Window covering the whole series. An empty series is treated as one
    /// value long so the invariant stays representable.
    #[must_use]
    pub fn full(series_len: usize) -> Self {
        let series_len = series_len.max(1);
        Self {
            start: 0,
            end: series_len - 1,
            series_len,
        }
    }

    #[must_use]
    pub fn start(self) -> usize {
        self.start
    }

    #[must_use]
    pub fn end(self) -> usize {
        self.end
    }

    #[must_use]
    pub fn series_len(self) -> usize {
        self.series_len
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start + 1
    }

    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }

    /// Cycle count covered by the current window.
    #[must_use]
    pub fn cycles(self, segments_per_cycle: usize) -> f64 {
        self.len() as f64 / segments_per_cycle.max(1) as f64
    }

    /// Target window size for a layout, never below one segment.
    #[must_use]
    pub fn target_segments(segments_per_cycle: usize, cycles: f64) -> usize {
        let cycles = if cycles.is_finite() { cycles.max(0.0) } else { 0.0 };
        let segments = (cycles * segments_per_cycle as f64 + TARGET_EPSILON).floor();
        (segments as usize).max(1)
    }

    /// Drives the window size toward `floor(cycles * segments_per_cycle)`.
    ///
    /// Shrinking keeps `start` fixed. Growing extends toward the series end
    /// first and only then backward. Returns `true` when bounds changed.
    pub fn reshape(&mut self, segments_per_cycle: usize, cycles: f64) -> bool {
        let before = *self;
        let segments = Self::target_segments(segments_per_cycle, cycles);
        let range = self.len();

        if range > segments {
            self.end = self.start + segments - 1;
        } else if range < segments {
            let mut delta = segments - range;
            let expand_back = delta.min(self.series_len - 1 - self.end);
            self.end += expand_back;
            delta -= expand_back;
            if delta > 0 {
                self.start = self.start.saturating_sub(delta);
            }
        }

        *self != before
    }

    /// Moves both bounds by `amount`, clamped at the series boundaries.
    ///
    /// Returns the signed shift actually applied.
    pub fn shift(&mut self, amount: isize) -> isize {
        if amount < 0 {
            let dec = amount.unsigned_abs().min(self.start);
            self.start -= dec;
            self.end -= dec;
            -(dec as isize)
        } else {
            let inc = (amount as usize).min(self.series_len - 1 - self.end);
            self.start += inc;
            self.end += inc;
            inc as isize
        }
    }

    /// Replaces both bounds, clamping into the series and ordering them.
    pub fn set_bounds(&mut self, start: usize, end: usize) -> bool {
        let before = *self;
        let last = self.series_len - 1;
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.start = start.min(last);
        self.end = end.min(last).max(self.start);
        *self != before
    }

    /// Moves the lower bound, never past `end`.
    pub fn set_start(&mut self, start: usize) -> bool {
        let before = self.start;
        self.start = start.min(self.end);
        self.start != before
    }

    /// Moves the upper bound, never before `start` nor past the series end.
    pub fn set_end(&mut self, end: usize) -> bool {
        let before = self.end;
        self.end = end.clamp(self.start, self.series_len - 1);
        self.end != before
    }
}
