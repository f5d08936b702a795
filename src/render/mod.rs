//! Raster surfaces, frame types, and the top-level renderer.

pub(crate) mod blur;
pub mod frame;
pub mod renderer;
pub mod surface;
