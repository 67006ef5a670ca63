//! Raster geometry and output grids

mod element;
mod geotransform;
mod grid;
mod layout;

pub use element::RasterElement;
pub use geotransform::GeoTransform;
pub use grid::Raster;
pub use layout::GridLayout;
