//! Chart controller: one `SpiralChart` facade split into focused controller
//! files, each an `impl<R: Renderer> SpiralChart<R>` block.

mod chart;
mod config;
mod data_controller;
mod interaction_controller;
mod invalidation;
mod json_contract;
mod legend_controller;
mod parameter_controller;
mod parameters;
mod plugin_dispatch;
mod plugin_registry;
mod range_widget;
mod render_coordinator;
mod scheduler;
mod window_controller;

pub use chart::{PLACEHOLDER_ATTRIBUTE, SpiralChart};
pub use config::{ColorSettings, LayoutParameters, LegendSettings, SpiralChartConfig};
pub use interaction_controller::PickInfo;
pub use invalidation::{InvalidationTag, InvalidationTags};
pub use json_contract::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1,
};
pub use parameters::{Parameter, ParameterId, ParameterKind, ParameterSet, ParameterValue};
pub use range_widget::{RangeChangeEvent, RangeSelectorModel};
pub use scheduler::FrameScheduler;

pub use crate::extensions::{ChartPlugin, PluginContext, PluginEvent};
