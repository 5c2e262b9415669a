//! spiral-chart: spiral and heatmap rendering of time-indexed series.
//!
//! A data window is mapped onto spiral bands or heatmap cells, colored
//! through one shared color mapper, cached as a raster layer and handed to a
//! pluggable [`render::Renderer`]. Pointer positions map back to data
//! indices for picking.

pub mod api;
pub mod color;
pub mod core;
pub mod error;
pub mod extensions;
pub mod geometry;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{SpiralChart, SpiralChartConfig};
pub use error::{ChartError, ChartResult};
