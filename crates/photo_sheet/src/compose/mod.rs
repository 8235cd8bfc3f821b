pub mod grid;
pub mod mixed;
pub mod raster;
