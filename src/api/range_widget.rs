use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::DataWindow;
use crate::render::Renderer;

use super::{ParameterId, ParameterValue, PluginEvent, SpiralChart};

/// State pushed to an external two-handle range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSelectorModel {
    pub min: usize,
    pub max: usize,
    /// `[start, end]` of the active window.
    pub marks: [usize; 2],
}

impl RangeSelectorModel {
    #[must_use]
    pub fn from_window(window: DataWindow) -> Self {
        Self {
            min: 0,
            max: window.series_len() - 1,
            marks: [window.start(), window.end()],
        }
    }
}

/// Change reported by the range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RangeChangeEvent {
    /// One handle moved; `index` 0 is the start mark, 1 the end mark.
    Mark { index: usize, value: usize },
    /// The whole range was dragged.
    Range { start: usize, end: usize },
}

impl<R: Renderer> SpiralChart<R> {
    #[must_use]
    pub fn range_model(&self) -> RangeSelectorModel {
        self.range_model
    }

    /// Applies a selector change to the window.
    ///
    /// A mark move re-derives `NumberOfCycles` from the new span so the
    /// layout follows the selection. A span the parameter cannot hold leaves
    /// `NumberOfCycles` untouched. Returns `false` for unknown marks and
    /// no-op moves.
    pub fn apply_range_event(&mut self, event: RangeChangeEvent) -> bool {
        let changed = match event {
            RangeChangeEvent::Mark { index: 0, value } => self.window.set_start(value),
            RangeChangeEvent::Mark { index: 1, value } => self.window.set_end(value),
            RangeChangeEvent::Mark { .. } => return false,
            RangeChangeEvent::Range { start, end } => self.window.set_bounds(start, end),
        };
        if !changed {
            return false;
        }
        trace!(?event, start = self.window.start(), end = self.window.end(), "range event applied");

        match event {
            RangeChangeEvent::Mark { .. } => {
                let cycles = self.window.cycles(self.parameters.segments_per_cycle());
                if self.store_parameter(ParameterId::NumberOfCycles, ParameterValue::number(cycles)) {
                    self.reshape();
                } else {
                    // Span outside the cycle range: keep the selection as is.
                    self.after_window_change();
                }
            }
            RangeChangeEvent::Range { .. } => self.after_window_change(),
        }
        self.request_frame();
        true
    }

    /// Label of series index `value`, for selector tooltips.
    #[must_use]
    pub fn label_at(&self, value: usize) -> Option<&str> {
        self.series.label(value)
    }

    pub(super) fn sync_range_model(&mut self) {
        let model = RangeSelectorModel::from_window(self.window);
        if model == self.range_model {
            return;
        }
        self.range_model = model;
        self.emit_plugin_event(PluginEvent::RangeModelChanged(model));
    }
}
