use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Point;
use crate::geometry::{SegmentGeometry, screen_to_local};
use crate::interaction::{InteractionMode, PointerInput};
use crate::render::Renderer;

use super::{PluginEvent, SpiralChart};

/// Details of the picked segment for host tooltips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickInfo {
    pub index: usize,
    pub label: String,
    pub value: f64,
    /// Caption, label and value with unit, one per line.
    pub text: String,
}

impl<R: Renderer> SpiralChart<R> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Primary press on a segment: picks it and starts drag tracking.
    ///
    /// A press that misses every segment is not consumed and leaves hover
    /// picking active.
    pub fn pointer_down(&mut self, input: PointerInput) -> bool {
        let Some(index) = self.hit_test_screen(input.position()) else {
            return false;
        };
        if !self.interaction.on_pointer_down(input) {
            return false;
        }
        self.set_picked(Some(index));
        true
    }

    /// Hover picking while idle; the pick is frozen during a drag.
    ///
    /// Returns `true` when the picked segment changed.
    pub fn pointer_move(&mut self, input: PointerInput) -> bool {
        self.interaction.on_pointer_move(input);
        if self.interaction.mode() != InteractionMode::Idle {
            return false;
        }
        self.pick(input.position())
    }

    /// Ends a press. A release that never left the drag threshold is a click:
    /// the segment under the pointer is picked and reported as
    /// [`PluginEvent::SegmentClicked`].
    pub fn pointer_up(&mut self, input: PointerInput) -> Option<usize> {
        let click = self.interaction.on_pointer_up(input)?;
        self.pick(click.position);
        let index = self.picked?;
        trace!(index, ctrl = click.ctrl, "segment clicked");
        self.emit_plugin_event(PluginEvent::SegmentClicked {
            index,
            ctrl: click.ctrl,
        });
        Some(index)
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
        self.set_picked(None);
    }

    /// Hit-tests a screen position. Returns `true` when the pick changed.
    pub fn pick(&mut self, screen: Point) -> bool {
        let hit = self.hit_test_screen(screen);
        self.set_picked(hit)
    }

    /// Index under a screen position inside the current window, if any.
    #[must_use]
    pub fn hit_test_screen(&self, screen: Point) -> Option<usize> {
        let local = screen_to_local(self.viewport, self.effective_rotation(), screen);
        self.geometry
            .hit_test(local)
            .filter(|index| self.window.contains(*index) && *index < self.series.len())
    }

    #[must_use]
    pub fn picked_segment(&self) -> Option<usize> {
        self.picked
    }

    #[must_use]
    pub fn pick_info(&self) -> Option<PickInfo> {
        let index = self.picked?;
        let label = self.series.label(index)?.to_owned();
        let value = self.series.value(index)?;
        let text = format!("{}\n{label}\n{value}{}", self.caption, self.unit);
        Some(PickInfo {
            index,
            label,
            value,
            text,
        })
    }

    /// Tooltip body: the caption alone when nothing is picked.
    #[must_use]
    pub fn tooltip_text(&self) -> String {
        self.pick_info()
            .map_or_else(|| self.caption.clone(), |info| info.text)
    }

    pub(super) fn set_picked(&mut self, picked: Option<usize>) -> bool {
        if picked == self.picked {
            return false;
        }
        self.picked = picked;
        self.emit_plugin_event(PluginEvent::PickChanged { index: picked });
        self.request_frame();
        true
    }
}
