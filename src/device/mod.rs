//! Device module: Where the pixels live.
//!
//! This module contains:
//! - [`Device`]: The seam between the session and video memory
//! - [`Framebuffer`]: A Linux fbdev device (`/dev/fb0`) with manual blit
//! - [`MemoryDevice`]: A headless device backed by a `Vec<u8>`
//!
//! # Lifecycle
//!
//! ```text
//! open ──▶ query_mode ──▶ set_mode ──▶ map ──▶ (paint, blit)* ──▶ unmap ──▶ close
//! ```
//!
//! Failures up to and including `map` are fatal for the session. Blit
//! failures are logged and otherwise ignored.

mod framebuffer;
mod memory;
pub mod sys;

pub use framebuffer::{Framebuffer, FramebufferFlags, DEFAULT_DEVICE_PATH};
pub use memory::MemoryDevice;

use crate::surface::Geometry;
use std::io;
use std::ops::DerefMut;
use std::path::PathBuf;

/// The only pixel depth the renderer supports.
pub const REQUIRED_BITS_PER_PIXEL: u32 = 32;

/// Display mode as reported by a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenMode {
    /// Visible width.
    pub xres: u32,
    /// Visible height.
    pub yres: u32,
    /// Virtual height (twice `yres` when double-buffered).
    pub yres_virtual: u32,
    /// Pixel depth.
    pub bits_per_pixel: u32,
    /// Horizontal panning offset.
    pub xoffset: u32,
    /// Vertical panning offset.
    pub yoffset: u32,
    /// Stride in bytes.
    pub line_length: u32,
    /// Length of video memory in bytes.
    pub smem_len: u32,
}

impl ScreenMode {
    /// Addressing geometry for a surface in this mode.
    pub const fn geometry(&self) -> Geometry {
        Geometry {
            xres: self.xres,
            yres: self.yres,
            xoffset: self.xoffset,
            yoffset: self.yoffset,
            line_length: self.line_length,
        }
    }
}

/// The mode forced at session open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeRequest {
    /// Requested visible width.
    pub xres: u32,
    /// Requested visible height.
    pub yres: u32,
    /// Requested depth.
    pub bits_per_pixel: u32,
}

impl Default for ModeRequest {
    fn default() -> Self {
        Self {
            xres: 1280,
            yres: 720,
            bits_per_pixel: REQUIRED_BITS_PER_PIXEL,
        }
    }
}

/// Errors raised while bringing a device up.
#[derive(Debug)]
pub enum DeviceError {
    /// The device node could not be opened.
    Unavailable {
        /// Device path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// A mode query or mode set failed.
    Ioctl {
        /// Name of the failing request.
        request: &'static str,
        /// Underlying error.
        source: io::Error,
    },
    /// The device runs at a depth other than 32 bpp.
    UnsupportedDepth(u32),
    /// Video memory could not be mapped.
    Map(io::Error),
}

impl std::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { path, source } => {
                write!(f, "framebuffer {} not available: {source}", path.display())
            }
            Self::Ioctl { request, source } => write!(f, "{request} failed: {source}"),
            Self::UnsupportedDepth(bpp) => write!(
                f,
                "only {REQUIRED_BITS_PER_PIXEL} bits per pixel supported, framebuffer uses {bpp}"
            ),
            Self::Map(source) => write!(f, "mmap failed: {source}"),
        }
    }
}

impl std::error::Error for DeviceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unavailable { source, .. } | Self::Ioctl { source, .. } | Self::Map(source) => {
                Some(source)
            }
            Self::UnsupportedDepth(_) => None,
        }
    }
}

/// An opened display device.
///
/// Implementations are driven by a single thread; nothing here is
/// synchronized.
pub trait Device {
    /// Mapped video memory.
    type Memory: DerefMut<Target = [u8]>;

    /// Read the current display mode.
    fn query_mode(&mut self) -> Result<ScreenMode, DeviceError>;

    /// Force a display mode (double virtual height, zero offsets) and
    /// return the mode the device actually settled on.
    fn set_mode(&mut self, request: &ModeRequest) -> Result<ScreenMode, DeviceError>;

    /// Map video memory for reading and writing.
    fn map(&mut self) -> Result<Self::Memory, DeviceError>;

    /// Flush and release memory returned by [`map`](Device::map).
    fn unmap(&mut self, memory: Self::Memory);

    /// Make painted pixels visible. A no-op without manual blit.
    fn blit(&mut self);

    /// Release the device. Safe to call more than once.
    fn close(&mut self);
}
