//! Color encoding shared by chart segments and the legend.

pub mod gradient;
pub mod legend;
pub mod mapper;
pub mod nice_range;
pub mod scheme;

pub use gradient::LabGradient;
pub use legend::{
    DEFAULT_LEGEND_HEIGHT, DEFAULT_LEGEND_WIDTH, Legend, LegendColumn, LegendGradient,
    LegendLabel, format_number, legend_labels,
};
pub use mapper::{
    ColorConfig, ColorConfigUpdate, ColorMapper, DEFAULT_CLASS_COUNT, SegmentFill, TwoToneColor,
};
pub use nice_range::auto_expand;
pub use scheme::ColorScheme;
