use tracing::trace;

use crate::extensions::PluginContext;
use crate::render::Renderer;

use super::{PluginEvent, SpiralChart};

impl<R: Renderer> SpiralChart<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.viewport,
            representation: self.representation(),
            window_start: self.window.start(),
            window_end: self.window.end(),
            series_len: self.series.len(),
            picked: self.picked,
            interaction_mode: self.interaction.mode(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        trace!(?event, plugins = self.plugins.len(), "dispatching plugin event");
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }
}
