use tracing::{debug, warn};

use crate::color::{ColorConfigUpdate, ColorMapper, SegmentFill};
use crate::core::{DataWindow, Series, SeriesData};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{InvalidationTag, InvalidationTags, PluginEvent, SpiralChart};

impl<R: Renderer> SpiralChart<R> {
    /// Installs a loaded series and encodes `attribute`.
    ///
    /// Fails without touching the chart when labels and attribute lengths
    /// disagree or `attribute` is absent.
    pub fn load_series(
        &mut self,
        data: SeriesData,
        attribute: &str,
        caption: impl Into<String>,
        unit: impl Into<String>,
    ) -> ChartResult<()> {
        data.validate()?;
        if !data.has_attribute(attribute) {
            return Err(ChartError::InvalidData(format!(
                "attribute `{attribute}` is not present in the series"
            )));
        }
        debug!(
            labels = data.len(),
            attributes = data.attributes.len(),
            attribute,
            "series loaded"
        );
        self.data = data;
        self.caption = caption.into();
        self.unit = unit.into();
        self.encode(attribute);
        Ok(())
    }

    /// Re-encodes the chart from another attribute of the loaded data.
    ///
    /// An absent attribute keeps the previous encoding and returns `false`.
    /// Otherwise the window resets to the whole series before the recolor
    /// and reshape.
    pub fn encode(&mut self, attribute: &str) -> bool {
        let Some(series) = self.data.encode(attribute) else {
            let available: Vec<&str> = self.data.attribute_names().collect();
            warn!(
                attribute,
                ?available,
                "attribute not present, keeping previous encoding"
            );
            return false;
        };
        self.series = series;
        self.window = DataWindow::full(self.series.len());
        if self.picked.is_some_and(|index| index >= self.series.len()) {
            self.set_picked(None);
        }
        self.emit_plugin_event(PluginEvent::SeriesEncoded {
            len: self.series.len(),
        });
        self.apply_invalidation(
            InvalidationTags::from_tag(InvalidationTag::Color).with(InvalidationTag::Window),
        );
        true
    }

    #[must_use]
    pub fn series(&self) -> &Series {
        &self.series
    }

    #[must_use]
    pub fn series_data(&self) -> &SeriesData {
        &self.data
    }

    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub fn color_mapper(&self) -> &ColorMapper {
        &self.color_mapper
    }

    /// Current color domain after outward rounding.
    #[must_use]
    pub fn color_domain(&self) -> (f64, f64) {
        self.color_mapper.config().domain
    }

    /// Per-index fills for the whole series.
    #[must_use]
    pub fn fills(&self) -> &[SegmentFill] {
        &self.fills
    }

    /// Recomputes the color domain and every segment fill.
    ///
    /// A series without finite values maps onto `[0, 0]`, which normalizes
    /// every value to `0`.
    pub(super) fn recolor(&mut self) {
        let (min, max) = self.series.finite_extent().unwrap_or((0.0, 0.0));
        let domain = self.color_mapper.auto_expand(min, max);
        self.color_mapper.set_config(ColorConfigUpdate {
            domain: Some(domain),
            ..ColorConfigUpdate::default()
        });

        let mapper = &self.color_mapper;
        self.fills = self
            .series
            .values()
            .iter()
            .map(|value| mapper.fill(mapper.normalize(*value)))
            .collect();
        self.invalidate_raster();
        debug!(
            data_min = min,
            data_max = max,
            domain_min = domain.0,
            domain_max = domain.1,
            segments = self.fills.len(),
            "series recolored"
        );
    }
}
