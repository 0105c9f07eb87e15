//! Linux fbdev ABI: screen info structs and ioctl wrappers.
//!
//! Layouts follow `<linux/fb.h>`. The manual-blit pair is a vendor extension
//! found on set-top-box framebuffer drivers.

#![allow(unsafe_code)]

use std::io;
use std::os::unix::io::RawFd;

/// Get variable screen info.
pub const FBIOGET_VSCREENINFO: u32 = 0x4600;
/// Set variable screen info.
pub const FBIOPUT_VSCREENINFO: u32 = 0x4601;
/// Get fixed screen info.
pub const FBIOGET_FSCREENINFO: u32 = 0x4602;
/// `_IOW('F', 0x21, __u8)`: enable (1) or disable (0) manual blit.
pub const FBIO_SET_MANUAL_BLIT: u32 = ioc_write(b'F', 0x21, 1);
/// Swap the back buffer to the screen while manual blit is enabled.
pub const FBIO_BLIT: u32 = 0x22;

/// Direction bits of `_IOW` on architectures with a 3-bit direction field.
#[cfg(any(
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "sparc",
    target_arch = "sparc64"
))]
mod ioc {
    pub const WRITE: u32 = 4;
    pub const DIR_SHIFT: u32 = 29;
}

/// Direction bits of `_IOW` in the asm-generic encoding.
#[cfg(not(any(
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "sparc",
    target_arch = "sparc64"
)))]
mod ioc {
    pub const WRITE: u32 = 1;
    pub const DIR_SHIFT: u32 = 30;
}

/// `_IOW(ty, nr, size)` for the target architecture.
const fn ioc_write(ty: u8, nr: u8, size: u32) -> u32 {
    (ioc::WRITE << ioc::DIR_SHIFT) | (size << 16) | ((ty as u32) << 8) | nr as u32
}

/// One color channel's position within a pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FbBitfield {
    /// Bit offset of the channel.
    pub offset: u32,
    /// Channel width in bits.
    pub length: u32,
    /// Non-zero if the most significant bit is on the right.
    pub msb_right: u32,
}

/// `struct fb_var_screeninfo`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FbVarScreenInfo {
    /// Visible resolution.
    pub xres: u32,
    /// Visible resolution.
    pub yres: u32,
    /// Virtual resolution.
    pub xres_virtual: u32,
    /// Virtual resolution.
    pub yres_virtual: u32,
    /// Offset from virtual to visible.
    pub xoffset: u32,
    /// Offset from virtual to visible.
    pub yoffset: u32,
    /// Bits per pixel.
    pub bits_per_pixel: u32,
    /// Non-zero for grayscale.
    pub grayscale: u32,
    /// Red channel layout.
    pub red: FbBitfield,
    /// Green channel layout.
    pub green: FbBitfield,
    /// Blue channel layout.
    pub blue: FbBitfield,
    /// Alpha channel layout.
    pub transp: FbBitfield,
    /// Non-standard pixel format.
    pub nonstd: u32,
    /// Activation flags.
    pub activate: u32,
    /// Picture height in mm.
    pub height: u32,
    /// Picture width in mm.
    pub width: u32,
    /// Obsolete.
    pub accel_flags: u32,
    /// Pixel clock in ps.
    pub pixclock: u32,
    /// Timing: left margin.
    pub left_margin: u32,
    /// Timing: right margin.
    pub right_margin: u32,
    /// Timing: upper margin.
    pub upper_margin: u32,
    /// Timing: lower margin.
    pub lower_margin: u32,
    /// Timing: horizontal sync length.
    pub hsync_len: u32,
    /// Timing: vertical sync length.
    pub vsync_len: u32,
    /// Sync flags.
    pub sync: u32,
    /// Video mode flags.
    pub vmode: u32,
    /// Rotation angle.
    pub rotate: u32,
    /// Colorspace for FOURCC modes.
    pub colorspace: u32,
    /// Reserved.
    pub reserved: [u32; 4],
}

/// `struct fb_fix_screeninfo`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FbFixScreenInfo {
    /// Driver identification.
    pub id: [u8; 16],
    /// Physical start of video memory.
    pub smem_start: libc::c_ulong,
    /// Length of video memory.
    pub smem_len: u32,
    /// Framebuffer type.
    pub type_: u32,
    /// Interleave for interleaved planes.
    pub type_aux: u32,
    /// Visual type.
    pub visual: u32,
    /// Hardware panning step, 0 if none.
    pub xpanstep: u16,
    /// Hardware panning step, 0 if none.
    pub ypanstep: u16,
    /// Hardware ywrap step, 0 if none.
    pub ywrapstep: u16,
    /// Bytes per row.
    pub line_length: u32,
    /// Physical start of MMIO.
    pub mmio_start: libc::c_ulong,
    /// Length of MMIO.
    pub mmio_len: u32,
    /// Acceleration type.
    pub accel: u32,
    /// Capability flags.
    pub capabilities: u16,
    /// Reserved.
    pub reserved: [u16; 2],
}

fn check(ret: libc::c_int) -> io::Result<()> {
    if ret < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

/// `FBIOGET_VSCREENINFO`.
pub fn get_var_screeninfo(fd: RawFd) -> io::Result<FbVarScreenInfo> {
    let mut info = FbVarScreenInfo::default();
    // SAFETY: `info` is a properly sized, writable fb_var_screeninfo.
    check(unsafe { libc::ioctl(fd, FBIOGET_VSCREENINFO as _, &mut info as *mut FbVarScreenInfo) })?;
    Ok(info)
}

/// `FBIOPUT_VSCREENINFO`. The driver may adjust `info` in place.
pub fn put_var_screeninfo(fd: RawFd, info: &mut FbVarScreenInfo) -> io::Result<()> {
    // SAFETY: `info` is a properly sized, writable fb_var_screeninfo.
    check(unsafe { libc::ioctl(fd, FBIOPUT_VSCREENINFO as _, info as *mut FbVarScreenInfo) })
}

/// `FBIOGET_FSCREENINFO`.
pub fn get_fix_screeninfo(fd: RawFd) -> io::Result<FbFixScreenInfo> {
    let mut info = FbFixScreenInfo::default();
    // SAFETY: `info` is a properly sized, writable fb_fix_screeninfo.
    check(unsafe { libc::ioctl(fd, FBIOGET_FSCREENINFO as _, &mut info as *mut FbFixScreenInfo) })?;
    Ok(info)
}

/// `FBIO_SET_MANUAL_BLIT`.
pub fn set_manual_blit(fd: RawFd, enabled: bool) -> io::Result<()> {
    let mut flag = u8::from(enabled);
    // SAFETY: the request reads a single byte from the pointer.
    check(unsafe { libc::ioctl(fd, FBIO_SET_MANUAL_BLIT as _, &mut flag as *mut u8) })
}

/// `FBIO_BLIT`.
pub fn blit(fd: RawFd) -> io::Result<()> {
    // SAFETY: the request takes no argument.
    check(unsafe { libc::ioctl(fd, FBIO_BLIT as _) })
}
