//! Surface: A bounds-checked view over 32 bpp video memory.
//!
//! The surface owns the pixel memory (a memory map for real hardware, a
//! `Vec<u8>` for tests) together with the geometry the device reported.
//! All offset arithmetic lives here:
//!
//! ```text
//! offset = (x + xoffset) * 4 + (y + yoffset) * line_length
//! ```

use super::color::Bgra;
use crate::layout::Rect;
use std::ops::{Deref, DerefMut};

/// Bytes per pixel. Only 32 bpp surfaces are supported.
pub const BYTES_PER_PIXEL: usize = 4;

/// Geometry of a mapped surface as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    /// Visible width in pixels.
    pub xres: u32,
    /// Visible height in pixels.
    pub yres: u32,
    /// Horizontal panning offset in pixels.
    pub xoffset: u32,
    /// Vertical panning offset in pixels.
    pub yoffset: u32,
    /// Bytes between the starts of two consecutive rows (stride).
    pub line_length: u32,
}

impl Geometry {
    /// Tightly packed geometry with no panning offset.
    pub const fn packed(xres: u32, yres: u32) -> Self {
        Self {
            xres,
            yres,
            xoffset: 0,
            yoffset: 0,
            line_length: xres * BYTES_PER_PIXEL as u32,
        }
    }
}

/// Pixel memory plus the geometry needed to address it.
///
/// Writes outside `[0, xres) × [0, yres)`, or that would land beyond the end
/// of the memory, are dropped.
pub struct Surface<M> {
    /// Mapped (or owned) pixel memory.
    memory: M,
    /// Addressing geometry.
    geometry: Geometry,
}

impl<M: Deref<Target = [u8]>> Surface<M> {
    /// Wrap pixel memory with the given geometry.
    pub const fn new(memory: M, geometry: Geometry) -> Self {
        Self { memory, geometry }
    }

    /// Get the addressing geometry.
    #[inline]
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Visible width in pixels.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.geometry.xres
    }

    /// Visible height in pixels.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.geometry.yres
    }

    /// The whole visible area.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.geometry.xres, self.geometry.yres)
    }

    /// Get a reference to the raw memory.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.memory
    }

    /// Convert (x, y) to a byte offset into the memory.
    ///
    /// Returns `None` if the pixel is off-screen or not backed by memory.
    #[inline]
    pub fn offset_of(&self, x: u32, y: u32) -> Option<usize> {
        let g = &self.geometry;
        if x >= g.xres || y >= g.yres {
            return None;
        }
        let offset = (x as usize + g.xoffset as usize) * BYTES_PER_PIXEL
            + (y as usize + g.yoffset as usize) * g.line_length as usize;
        (offset + BYTES_PER_PIXEL <= self.memory.len()).then_some(offset)
    }

    /// Read the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Bgra> {
        let offset = self.offset_of(x, y)?;
        let mut bytes = [0u8; BYTES_PER_PIXEL];
        bytes.copy_from_slice(&self.memory[offset..offset + BYTES_PER_PIXEL]);
        Some(Bgra::from_bytes(bytes))
    }

    /// Check that every pixel of `rect` (clipped to the surface) has `color`.
    pub fn is_filled(&self, rect: Rect, color: Bgra) -> bool {
        let area = rect.intersection(&self.bounds());
        (area.y..area.bottom())
            .all(|y| (area.x..area.right()).all(|x| self.pixel(x, y) == Some(color)))
    }

    /// Give the memory back, e.g. to unmap it.
    pub fn into_memory(self) -> M {
        self.memory
    }
}

impl<M: DerefMut<Target = [u8]>> Surface<M> {
    /// Write a single pixel.
    ///
    /// Returns `false` if the pixel is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Bgra) -> bool {
        if let Some(offset) = self.offset_of(x, y) {
            self.memory[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color.to_bytes());
            true
        } else {
            false
        }
    }

    /// Fill the half-open rectangle with a color.
    ///
    /// The rectangle is clipped to the visible area first. Does not blit.
    pub fn fill_rect(&mut self, rect: Rect, color: Bgra) {
        let area = rect.intersection(&self.bounds());
        if area.is_empty() {
            return;
        }
        let bytes = color.to_bytes();
        for y in area.y..area.bottom() {
            let (Some(start), Some(last)) =
                (self.offset_of(area.x, y), self.offset_of(area.right() - 1, y))
            else {
                // Row not (fully) backed by memory; fall back to per-pixel writes.
                for x in area.x..area.right() {
                    self.set_pixel(x, y, color);
                }
                continue;
            };
            for pixel in self.memory[start..last + BYTES_PER_PIXEL].chunks_exact_mut(BYTES_PER_PIXEL) {
                pixel.copy_from_slice(&bytes);
            }
        }
    }

    /// Fill the whole visible area with a color.
    pub fn clear(&mut self, color: Bgra) {
        self.fill_rect(self.bounds(), color);
    }
}

impl Surface<Vec<u8>> {
    /// Allocate a zeroed, tightly packed surface in ordinary memory.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn in_memory(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Surface dimensions must be non-zero");
        let geometry = Geometry::packed(width, height);
        let len = geometry.line_length as usize * height as usize;
        Self::new(vec![0; len], geometry)
    }
}

impl<M> std::fmt::Debug for Surface<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}
