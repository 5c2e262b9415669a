use serde::{Deserialize, Serialize};

use crate::core::Point;

/// Pointer travel, in pixels along either axis, that turns a press into a
/// drag.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    /// Primary button held on the chart.
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// Pointer event normalized by the host before it reaches the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub x: f64,
    pub y: f64,
    pub button: PointerButton,
    pub ctrl: bool,
}

impl PointerInput {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            button: PointerButton::Primary,
            ctrl: false,
        }
    }

    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    #[must_use]
    pub const fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }

    #[must_use]
    pub const fn position(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Arrow keys forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Window shift for this key: one cycle vertically, one segment
    /// horizontally.
    #[must_use]
    pub fn window_shift(self, segments_per_cycle: usize) -> isize {
        let cycle = isize::try_from(segments_per_cycle).unwrap_or(isize::MAX);
        match self {
            Self::Up => cycle,
            Self::Down => -cycle,
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub origin: Point,
    /// Set once the pointer has left the threshold box; sticky until release.
    pub dragged: bool,
}

/// Press-and-release that stayed inside the drag threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Click {
    pub position: Point,
    pub ctrl: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    drag: Option<DragState>,
    cursor: Option<Point>,
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        if self.drag.is_some() {
            InteractionMode::Dragging
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn drag(self) -> Option<DragState> {
        self.drag
    }

    #[must_use]
    pub fn cursor(self) -> Option<Point> {
        self.cursor
    }

    /// Starts a drag on primary press. Returns whether the event was consumed.
    pub fn on_pointer_down(&mut self, input: PointerInput) -> bool {
        if input.button != PointerButton::Primary {
            return false;
        }
        self.cursor = Some(input.position());
        self.drag = Some(DragState {
            origin: input.position(),
            dragged: false,
        });
        true
    }

    /// Tracks the cursor and latches `dragged` once the threshold is crossed.
    pub fn on_pointer_move(&mut self, input: PointerInput) -> bool {
        self.cursor = Some(input.position());
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let dx = drag.origin.x - input.x;
        let dy = drag.origin.y - input.y;
        drag.dragged = drag.dragged || dx.abs() >= DRAG_THRESHOLD_PX || dy.abs() >= DRAG_THRESHOLD_PX;
        true
    }

    /// Ends the drag. A release without a drag is reported as a click.
    pub fn on_pointer_up(&mut self, input: PointerInput) -> Option<Click> {
        if input.button != PointerButton::Primary {
            return None;
        }
        self.cursor = Some(input.position());
        let drag = self.drag.take()?;
        (!drag.dragged).then_some(Click {
            position: input.position(),
            ctrl: input.ctrl,
        })
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{DRAG_THRESHOLD_PX, InteractionMode, InteractionState, Key, PointerButton, PointerInput};

    #[test]
    fn press_and_release_in_place_is_a_click() {
        let mut state = InteractionState::default();
        assert!(state.on_pointer_down(PointerInput::new(10.0, 10.0)));
        assert_eq!(state.mode(), InteractionMode::Dragging);
        state.on_pointer_move(PointerInput::new(12.0, 11.0));
        let click = state.on_pointer_up(PointerInput::new(12.0, 11.0).with_ctrl(true));
        assert!(click.is_some_and(|click| click.ctrl));
        assert_eq!(state.mode(), InteractionMode::Idle);
    }

    #[test]
    fn drag_beyond_threshold_suppresses_click() {
        let mut state = InteractionState::default();
        state.on_pointer_down(PointerInput::new(10.0, 10.0));
        state.on_pointer_move(PointerInput::new(10.0 + DRAG_THRESHOLD_PX, 10.0));
        // Returning inside the threshold box does not undo the drag.
        state.on_pointer_move(PointerInput::new(10.0, 10.0));
        assert!(state.drag().is_some_and(|drag| drag.dragged));
        assert_eq!(state.on_pointer_up(PointerInput::new(10.0, 10.0)), None);
    }

    #[test]
    fn secondary_button_is_ignored() {
        let mut state = InteractionState::default();
        let input = PointerInput::new(0.0, 0.0).with_button(PointerButton::Secondary);
        assert!(!state.on_pointer_down(input));
        assert_eq!(state.mode(), InteractionMode::Idle);
        assert_eq!(state.on_pointer_up(input), None);
    }

    #[test]
    fn arrow_keys_shift_by_segment_or_cycle() {
        assert_eq!(Key::Up.window_shift(12), 12);
        assert_eq!(Key::Down.window_shift(12), -12);
        assert_eq!(Key::Left.window_shift(12), -1);
        assert_eq!(Key::Right.window_shift(12), 1);
    }
}
