use crate::color::Legend;
use crate::render::{Color, RenderFrame, Renderer, TextPrimitive};

use super::{ParameterId, PluginEvent, SpiralChart};

const LABEL_FONT_SIZE_PX: f64 = 14.0;
const LABEL_HEIGHT_PX: f64 = 17.0;
const LABEL_GAP_PX: f64 = 2.0;

fn label_color() -> Color {
    Color::from_rgb8(117, 117, 117)
}

impl<R: Renderer> SpiralChart<R> {
    /// Current legend, or `None` while the legend switch is off.
    #[must_use]
    pub fn legend(&self) -> Option<Legend> {
        if !self.parameters.switch(ParameterId::ColorLegend) {
            return None;
        }
        let settings = self.legend_settings;
        Some(
            self.color_mapper
                .legend(settings.gradient_width, settings.gradient_height),
        )
    }

    /// Increments whenever legend content or visibility changes.
    #[must_use]
    pub fn legend_generation(&self) -> u64 {
        self.legend_generation
    }

    pub(super) fn bump_legend(&mut self) {
        self.legend_generation += 1;
        self.emit_plugin_event(PluginEvent::LegendChanged {
            generation: self.legend_generation,
        });
    }

    /// Adds the legend strip and labels in the bottom-left corner.
    pub(super) fn append_legend(&self, mut frame: RenderFrame) -> RenderFrame {
        let Some(legend) = self.legend() else {
            return frame;
        };
        let settings = self.legend_settings;
        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);
        let box_width = settings
            .box_width_px
            .min(width - 2.0 * settings.margin_px);
        if box_width <= 0.0 {
            return frame;
        }
        let x = settings.margin_px;
        let y = height - settings.margin_px - LABEL_HEIGHT_PX - settings.box_height_px;

        for rect in legend.gradient.rects(x, y, box_width, settings.box_height_px) {
            frame = frame.with_rect(rect);
        }
        let label_y = y + settings.box_height_px + LABEL_GAP_PX;
        for label in legend.labels {
            frame = frame.with_text(TextPrimitive::new(
                label.text,
                x + label.position * box_width,
                label_y,
                LABEL_FONT_SIZE_PX,
                label_color(),
                label.align,
            ));
        }
        frame
    }
}
