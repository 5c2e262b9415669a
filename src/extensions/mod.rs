//! Extension points for code embedding the chart.

mod plugins;

pub use plugins::{ChartPlugin, PluginContext, PluginEvent};
