//! MemoryDevice: A headless display backed by ordinary memory.
//!
//! Behaves like a cooperative fbdev driver: mode requests are honored (unless
//! the depth is pinned), memory covers the whole virtual resolution, and blits
//! are counted instead of shown.

use super::{Device, DeviceError, ModeRequest, ScreenMode};
use crate::surface::{Surface, BYTES_PER_PIXEL};

/// An in-memory [`Device`].
#[derive(Debug, Clone)]
pub struct MemoryDevice {
    /// Current mode.
    mode: ScreenMode,
    /// Extra bytes at the end of every row.
    row_padding: u32,
    /// Depth the "driver" insists on, ignoring requests.
    pinned_depth: Option<u32>,
    /// Video memory while unmapped; `None` while mapped out.
    memory: Option<Vec<u8>>,
    /// Number of blits issued.
    blits: usize,
    /// Set by `close`.
    closed: bool,
}

impl MemoryDevice {
    /// Create a 32 bpp device with the given visible resolution.
    pub fn new(xres: u32, yres: u32) -> Self {
        let mut device = Self {
            mode: ScreenMode::default(),
            row_padding: 0,
            pinned_depth: None,
            memory: None,
            blits: 0,
            closed: false,
        };
        device.apply_mode(xres, yres, yres, 32);
        device
    }

    /// Pad every row by `bytes`, so the stride exceeds `xres * 4`.
    #[must_use]
    pub fn with_row_padding(mut self, bytes: u32) -> Self {
        self.row_padding = bytes;
        let m = self.mode;
        self.apply_mode(m.xres, m.yres, m.yres_virtual, m.bits_per_pixel);
        self
    }

    /// Report `bits_per_pixel` no matter what is requested.
    #[must_use]
    pub fn with_pinned_depth(mut self, bits_per_pixel: u32) -> Self {
        self.pinned_depth = Some(bits_per_pixel);
        let m = self.mode;
        self.apply_mode(m.xres, m.yres, m.yres_virtual, bits_per_pixel);
        self
    }

    fn apply_mode(&mut self, xres: u32, yres: u32, yres_virtual: u32, bits_per_pixel: u32) {
        let line_length = xres * BYTES_PER_PIXEL as u32 + self.row_padding;
        self.mode = ScreenMode {
            xres,
            yres,
            yres_virtual,
            bits_per_pixel: self.pinned_depth.unwrap_or(bits_per_pixel),
            xoffset: 0,
            yoffset: 0,
            line_length,
            smem_len: line_length * yres_virtual,
        };
        self.memory = Some(vec![0; self.mode.smem_len as usize]);
    }

    /// Get the current mode.
    pub const fn mode(&self) -> ScreenMode {
        self.mode
    }

    /// Video memory, when not mapped out.
    pub fn memory(&self) -> Option<&[u8]> {
        self.memory.as_deref()
    }

    /// A read-only view of the visible area, when not mapped out.
    pub fn snapshot(&self) -> Option<Surface<Vec<u8>>> {
        self.memory
            .clone()
            .map(|memory| Surface::new(memory, self.mode.geometry()))
    }

    /// Number of blits issued so far.
    pub const fn blit_count(&self) -> usize {
        self.blits
    }

    /// Check if `close` has been called.
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Device for MemoryDevice {
    type Memory = Vec<u8>;

    fn query_mode(&mut self) -> Result<ScreenMode, DeviceError> {
        Ok(self.mode)
    }

    fn set_mode(&mut self, request: &ModeRequest) -> Result<ScreenMode, DeviceError> {
        self.apply_mode(request.xres, request.yres, request.yres * 2, request.bits_per_pixel);
        Ok(self.mode)
    }

    fn map(&mut self) -> Result<Vec<u8>, DeviceError> {
        self.memory.take().ok_or_else(|| {
            DeviceError::Map(std::io::Error::new(std::io::ErrorKind::AddrInUse, "already mapped"))
        })
    }

    fn unmap(&mut self, memory: Vec<u8>) {
        self.memory = Some(memory);
    }

    fn blit(&mut self) {
        self.blits += 1;
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_mode_doubles_virtual_height() {
        let mut device = MemoryDevice::new(320, 240);
        let mode = device.set_mode(&ModeRequest::default()).unwrap();
        assert_eq!((mode.xres, mode.yres, mode.yres_virtual), (1280, 720, 1440));
        assert_eq!(mode.line_length, 1280 * 4);
        assert_eq!(mode.smem_len, 1280 * 4 * 1440);
    }

    #[test]
    fn test_row_padding_widens_stride() {
        let device = MemoryDevice::new(10, 10).with_row_padding(24);
        assert_eq!(device.mode().line_length, 64);
    }

    #[test]
    fn test_pinned_depth_survives_set_mode() {
        let mut device = MemoryDevice::new(10, 10).with_pinned_depth(16);
        let mode = device.set_mode(&ModeRequest::default()).unwrap();
        assert_eq!(mode.bits_per_pixel, 16);
    }

    #[test]
    fn test_map_unmap_round_trip() {
        let mut device = MemoryDevice::new(4, 4);
        let mut memory = device.map().unwrap();
        assert!(device.memory().is_none());
        assert!(device.map().is_err());
        memory[0] = 7;
        device.unmap(memory);
        assert_eq!(device.memory().unwrap()[0], 7);
    }
}
