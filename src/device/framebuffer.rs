//! Framebuffer: A Linux fbdev device with optional manual blit.
//!
//! Some set-top-box drivers keep the GUI in a back buffer and only show it
//! after an explicit `FBIO_BLIT`. Manual blit is switched on at open and off
//! at close; drivers without the extension keep updating the screen on
//! every write, which is still correct, just without swap control.

use super::sys::{self, FbFixScreenInfo, FbVarScreenInfo};
use super::{Device, DeviceError, ModeRequest, ScreenMode};
use bitflags::bitflags;
use log::{debug, info, warn};
use memmap::{MmapMut, MmapOptions};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

/// Device node used when none is given.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/fb0";

bitflags! {
    /// Runtime state of a [`Framebuffer`].
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FramebufferFlags: u8 {
        /// The driver accepted `FBIO_SET_MANUAL_BLIT`.
        const MANUAL_BLIT = 0b0000_0001;
        /// Video memory is currently mapped.
        const MAPPED = 0b0000_0010;
    }
}

impl std::fmt::Debug for FramebufferFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// An open framebuffer device node.
#[derive(Debug)]
pub struct Framebuffer {
    /// Device path, for messages.
    path: PathBuf,
    /// Open descriptor; `None` once closed.
    file: Option<File>,
    /// Last variable screen info read from the driver.
    var: FbVarScreenInfo,
    /// Last fixed screen info read from the driver.
    fix: FbFixScreenInfo,
    /// Manual blit and mapping state.
    flags: FramebufferFlags,
}

impl Framebuffer {
    /// Open the device read-write and try to enable manual blit.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DeviceError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| DeviceError::Unavailable {
                path: path.clone(),
                source,
            })?;

        let mut fb = Self {
            path,
            file: Some(file),
            var: FbVarScreenInfo::default(),
            fix: FbFixScreenInfo::default(),
            flags: FramebufferFlags::empty(),
        };
        fb.set_manual_blit(true);
        info!("opened framebuffer {} ({:?})", fb.path.display(), fb.flags);
        Ok(fb)
    }

    /// Get the device path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the runtime flags.
    pub const fn flags(&self) -> FramebufferFlags {
        self.flags
    }

    fn fd(&self) -> Option<RawFd> {
        self.file.as_ref().map(AsRawFd::as_raw_fd)
    }

    fn require_fd(&self) -> Result<RawFd, DeviceError> {
        self.fd().ok_or_else(|| DeviceError::Ioctl {
            request: "open",
            source: io::Error::from(io::ErrorKind::NotConnected),
        })
    }

    /// Toggle manual blit. Failure only means the driver lacks it.
    fn set_manual_blit(&mut self, enabled: bool) {
        let Some(fd) = self.fd() else {
            return;
        };
        match sys::set_manual_blit(fd, enabled) {
            Ok(()) => self.flags.set(FramebufferFlags::MANUAL_BLIT, enabled),
            Err(e) => warn!("FBIO_SET_MANUAL_BLIT({}) failed: {e}", u8::from(enabled)),
        }
    }

    fn read_screeninfo(&mut self) -> Result<ScreenMode, DeviceError> {
        let fd = self.require_fd()?;
        self.var = sys::get_var_screeninfo(fd).map_err(|source| DeviceError::Ioctl {
            request: "FBIOGET_VSCREENINFO",
            source,
        })?;
        self.fix = sys::get_fix_screeninfo(fd).map_err(|source| DeviceError::Ioctl {
            request: "FBIOGET_FSCREENINFO",
            source,
        })?;
        Ok(self.mode())
    }

    fn mode(&self) -> ScreenMode {
        ScreenMode {
            xres: self.var.xres,
            yres: self.var.yres,
            yres_virtual: self.var.yres_virtual,
            bits_per_pixel: self.var.bits_per_pixel,
            xoffset: self.var.xoffset,
            yoffset: self.var.yoffset,
            line_length: self.fix.line_length,
            smem_len: self.fix.smem_len,
        }
    }
}

/// `current` with the requested geometry forced in; every other field is kept.
fn requested_var(current: FbVarScreenInfo, request: &ModeRequest) -> FbVarScreenInfo {
    let mut var = current;
    var.xres = request.xres;
    var.xres_virtual = request.xres;
    var.yres = request.yres;
    // Room for a back buffer.
    var.yres_virtual = request.yres * 2;
    var.bits_per_pixel = request.bits_per_pixel;
    // Some drivers leave yoffset pointing at their own back buffer.
    var.xoffset = 0;
    var.yoffset = 0;
    var.height = 0;
    var.width = 0;
    var
}

impl Device for Framebuffer {
    type Memory = MmapMut;

    fn query_mode(&mut self) -> Result<ScreenMode, DeviceError> {
        let mode = self.read_screeninfo()?;
        debug!("current mode: {mode:?}");
        Ok(mode)
    }

    fn set_mode(&mut self, request: &ModeRequest) -> Result<ScreenMode, DeviceError> {
        let fd = self.require_fd()?;
        let mut var = requested_var(self.var, request);

        sys::put_var_screeninfo(fd, &mut var).map_err(|source| DeviceError::Ioctl {
            request: "FBIOPUT_VSCREENINFO",
            source,
        })?;
        self.read_screeninfo()
    }

    #[allow(unsafe_code)]
    fn map(&mut self) -> Result<MmapMut, DeviceError> {
        let len = self.fix.smem_len as usize;
        if len == 0 {
            return Err(DeviceError::Map(io::Error::new(
                io::ErrorKind::InvalidData,
                "driver reports zero-length video memory",
            )));
        }
        let file = self
            .file
            .as_ref()
            .ok_or_else(|| DeviceError::Map(io::Error::from(io::ErrorKind::NotConnected)))?;
        // SAFETY: the mapping is shared with the display hardware and other
        // processes; we only ever treat it as plain bytes.
        let memory = unsafe { MmapOptions::new().len(len).map_mut(file) }.map_err(DeviceError::Map)?;
        self.flags.insert(FramebufferFlags::MAPPED);
        debug!("mapped {len} bytes of video memory");
        Ok(memory)
    }

    fn unmap(&mut self, memory: MmapMut) {
        if let Err(e) = memory.flush() {
            warn!("msync of video memory failed: {e}");
        }
        drop(memory);
        self.flags.remove(FramebufferFlags::MAPPED);
    }

    fn blit(&mut self) {
        if !self.flags.contains(FramebufferFlags::MANUAL_BLIT) {
            return;
        }
        if let Some(fd) = self.fd() {
            if let Err(e) = sys::blit(fd) {
                warn!("FBIO_BLIT failed: {e}");
            }
        }
    }

    fn close(&mut self) {
        if self.file.is_none() {
            return;
        }
        if self.flags.contains(FramebufferFlags::MANUAL_BLIT) {
            self.set_manual_blit(false);
        }
        self.file = None;
        debug!("closed framebuffer {}", self.path.display());
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        self.close();
    }
}
