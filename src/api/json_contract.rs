use serde::Serialize;

use crate::color::Legend;
use crate::core::{DataWindow, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::geometry::Representation;
use crate::render::Renderer;

use super::{Parameter, PickInfo, RangeSelectorModel, SpiralChart};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Host-facing view of the chart: everything needed to build parameter
/// widgets, a range selector, a legend and a tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSnapshot {
    pub viewport: Viewport,
    pub representation: Representation,
    pub window: DataWindow,
    pub range_model: RangeSelectorModel,
    pub parameters: Vec<Parameter>,
    pub color_domain: (f64, f64),
    pub legend: Option<Legend>,
    pub pick: Option<PickInfo>,
    pub raster_generation: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSnapshotJsonContractV1<'a> {
    pub schema_version: u32,
    pub snapshot: &'a ChartSnapshot,
}

impl ChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }
}

impl<R: Renderer> SpiralChart<R> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            viewport: self.viewport,
            representation: self.representation(),
            window: self.window,
            range_model: self.range_model,
            parameters: self.parameters.iter().copied().collect(),
            color_domain: self.color_domain(),
            legend: self.legend(),
            pick: self.pick_info(),
            raster_generation: self.raster.generation,
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
