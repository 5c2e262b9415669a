use serde::{Deserialize, Serialize};

use crate::api::{ParameterId, ParameterValue, RangeSelectorModel};
use crate::core::Viewport;
use crate::geometry::Representation;
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub representation: Representation,
    pub window_start: usize,
    pub window_end: usize,
    pub series_len: usize,
    pub picked: Option<usize>,
    pub interaction_mode: InteractionMode,
}

/// Change notifications published by the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    /// An accepted parameter value, including values the chart derives
    /// itself (rotation on representation switch, cycles from a range mark).
    ParameterChanged {
        id: ParameterId,
        value: ParameterValue,
    },
    WindowChanged {
        start: usize,
        end: usize,
    },
    /// New state for an external range selector.
    RangeModelChanged(RangeSelectorModel),
    PickChanged {
        index: Option<usize>,
    },
    SegmentClicked {
        index: usize,
        ctrl: bool,
    },
    LegendChanged {
        generation: u64,
    },
    SeriesEncoded {
        len: usize,
    },
    Rendered {
        raster_generation: u64,
    },
}

/// Observer hook for host widgets and custom logic.
///
/// Plugins see events and a context snapshot; they never mutate chart
/// internals directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}
