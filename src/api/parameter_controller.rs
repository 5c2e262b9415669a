use tracing::{debug, warn};

use crate::color::{ColorConfigUpdate, ColorMapper};
use crate::render::Renderer;

use super::{
    InvalidationTag, InvalidationTags, ParameterId, ParameterSet, ParameterValue, PluginEvent,
    SpiralChart,
};

impl<R: Renderer> SpiralChart<R> {
    #[must_use]
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// Applies a parameter change coming from a host widget or code.
    ///
    /// Rejected values (NaN, out of range, wrong kind, unchanged) return
    /// `false` and publish nothing. Accepted values are published as
    /// [`PluginEvent::ParameterChanged`] and then handled through the
    /// parameter's invalidation set.
    pub fn set_parameter(&mut self, id: ParameterId, value: ParameterValue) -> bool {
        if !self.store_parameter(id, value) {
            return false;
        }
        self.apply_invalidation(id.invalidation());
        true
    }

    /// Changes the number of color classes; values below two are ignored.
    pub fn set_color_class_count(&mut self, class_count: usize) -> bool {
        let changed = self.color_mapper.set_config(ColorConfigUpdate {
            class_count: Some(class_count),
            ..ColorConfigUpdate::default()
        });
        if changed {
            self.apply_invalidation(InvalidationTags::from_tag(InvalidationTag::Color));
        }
        changed
    }

    pub(super) fn store_parameter(&mut self, id: ParameterId, value: ParameterValue) -> bool {
        if !self.parameters.set(id, value) {
            return false;
        }
        let Some(stored) = self.parameters.value(id) else {
            return false;
        };
        debug!(parameter = ?id, value = ?stored, "parameter changed");
        self.emit_plugin_event(PluginEvent::ParameterChanged { id, value: stored });
        true
    }

    /// Handles a triggered invalidation set in one ordered pass.
    ///
    /// Handlers may add later tags: a layout swap or window reshape dirties the
    /// raster, a recolor dirties the raster and the legend.
    pub(super) fn apply_invalidation(&mut self, tags: InvalidationTags) {
        if tags.is_none() {
            return;
        }
        let mut pending = tags;
        for tag in InvalidationTag::ORDERED {
            if !pending.contains(tag) {
                continue;
            }
            match tag {
                InvalidationTag::Scheme => self.rebuild_color_mapper(),
                InvalidationTag::Layout => {
                    self.switch_representation();
                    pending = pending.with(InvalidationTag::Raster);
                }
                InvalidationTag::Color => {
                    self.sync_color_switches();
                    self.recolor();
                    pending = pending
                        .with(InvalidationTag::Raster)
                        .with(InvalidationTag::Legend);
                }
                InvalidationTag::Window => {
                    self.reshape();
                    pending = pending.with(InvalidationTag::Raster);
                }
                InvalidationTag::Raster => self.refresh_layout(),
                InvalidationTag::Legend => self.bump_legend(),
                InvalidationTag::Overlay => {}
            }
        }
        self.request_frame();
    }

    /// Rebuilds the mapper for the selected scheme, keeping every switch and
    /// the class count.
    fn rebuild_color_mapper(&mut self) {
        let scheme = self.parameters.scheme();
        if self.color_mapper.scheme() == Some(scheme) {
            return;
        }
        match ColorMapper::from_scheme(scheme, self.color_mapper.config()) {
            Ok(mapper) => self.color_mapper = mapper,
            Err(err) => warn!(error = %err, ?scheme, "keeping previous color scheme"),
        }
    }

    /// Swaps the geometry strategy and resets rotation to the
    /// representation's default.
    fn switch_representation(&mut self) {
        let representation = self.parameters.representation();
        let rotation = ParameterValue::number(representation.default_rotation_deg());
        self.store_parameter(ParameterId::Rotation, rotation);
        self.refresh_layout();
        debug!(?representation, "representation switched");
    }

    fn sync_color_switches(&mut self) {
        self.color_mapper.set_config(ColorConfigUpdate {
            reverse: Some(self.parameters.switch(ParameterId::ReverseColors)),
            smooth: Some(self.parameters.switch(ParameterId::SmoothColors)),
            two_tone: Some(self.parameters.switch(ParameterId::TwoToneColors)),
            two_tone_flip: Some(self.parameters.switch(ParameterId::TwoToneFlip)),
            ..ColorConfigUpdate::default()
        });
    }
}
