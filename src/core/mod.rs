pub mod polygon;
pub mod series;
pub mod types;
pub mod window;

pub use polygon::Polygon;
pub use series::{Series, SeriesData};
pub use types::{Point, Viewport};
pub use window::DataWindow;
