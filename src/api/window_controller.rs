use tracing::{debug, trace};

use crate::core::{DataWindow, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::Key;
use crate::render::Renderer;

use super::{ParameterId, PluginEvent, SpiralChart};

impl<R: Renderer> SpiralChart<R> {
    #[must_use]
    pub fn window(&self) -> DataWindow {
        self.window
    }

    /// Drives the window toward `NumberOfCycles * SegmentsPerCycle` and
    /// refreshes everything derived from it.
    pub(super) fn reshape(&mut self) {
        let segments_per_cycle = self.parameters.segments_per_cycle();
        let cycles = self.parameters.number(ParameterId::NumberOfCycles);
        let changed = self.window.reshape(segments_per_cycle, cycles);
        trace!(
            segments_per_cycle,
            cycles,
            start = self.window.start(),
            end = self.window.end(),
            changed,
            "window reshaped"
        );
        self.after_window_change();
    }

    pub(super) fn after_window_change(&mut self) {
        if self.picked.is_some_and(|index| !self.window.contains(index)) {
            self.set_picked(None);
        }
        self.refresh_layout();
        self.sync_range_model();
        self.emit_plugin_event(PluginEvent::WindowChanged {
            start: self.window.start(),
            end: self.window.end(),
        });
    }

    /// Pans the window by `amount` values, clamped at the series bounds.
    ///
    /// The picked segment moves along, so the same data point stays
    /// highlighted. Returns `false` when nothing moved.
    pub fn shift_window(&mut self, amount: isize) -> bool {
        let applied = self.window.shift(amount);
        if applied == 0 {
            return false;
        }
        if let Some(index) = self.picked {
            self.set_picked(index.checked_add_signed(applied));
        }
        debug!(requested = amount, applied, "window shifted");
        self.reshape();
        self.request_frame();
        true
    }

    /// Arrow keys: left/right move one segment, up/down one cycle.
    pub fn on_key(&mut self, key: Key) -> bool {
        let amount = key.window_shift(self.parameters.segments_per_cycle());
        self.shift_window(amount)
    }

    /// Resizes the drawing surface; layout constants are re-derived.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if viewport == self.viewport {
            return Ok(());
        }
        self.viewport = viewport;
        self.refresh_layout();
        self.request_frame();
        Ok(())
    }
}
