//! Surface module: Pixel memory and the color type painted into it.
//!
//! This module contains:
//! - [`Bgra`]: The device's native 4-byte pixel
//! - [`Surface`]: A bounds-checked view over mapped video memory
//! - [`Geometry`]: Resolution, panning offset and stride of a surface

mod color;
#[allow(clippy::module_inception)]
mod surface;

pub use color::Bgra;
pub use surface::{Geometry, Surface, BYTES_PER_PIXEL};
