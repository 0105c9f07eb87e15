//! RenderSession: The overlay's lifecycle on one device.
//!
//! ```text
//!            open(device)            show()
//! ┌────────┐ ──────────▶ ┌──────┐ ──────────▶ ┌───────┐
//! │ Closed │             │ Open │             │ Shown │ ◀─┐ set_step_text
//! └────────┘ ◀────────── └──────┘             └───────┘ ──┘ set_step_progress
//!      ▲        close()                           │
//!      └──────────────────────────────────────────┘ close()
//! ```
//!
//! The session owns the configuration, the device and its mapped surface.
//! Updates repaint only their own region and then blit; only `show` paints
//! the whole window.

use crate::config::Config;
use crate::device::{Device, DeviceError, ModeRequest, REQUIRED_BITS_PER_PIXEL};
use crate::layout::{window_rect, Rect};
use crate::surface::{Bgra, Surface};
use crate::text::clean_status_text;
use crate::widget::{Palette, ProgressBar, TextBlock, TextFlow, Widget};
use log::{debug, error, info, warn};

/// Title offset from the window's top-left corner.
const TITLE_INSET: u32 = 10;
/// Status text offset from the window's top edge.
const STATUS_TOP: u32 = 90;
/// Glyph rows erased before each status update.
const STATUS_LINES: u32 = 3;
/// Window width not used for wrapping status text.
const STATUS_MARGIN: u32 = 20;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No device attached.
    Closed,
    /// Device mapped, surface erased, layout computed.
    Open,
    /// Window painted; status updates are accepted.
    Shown,
}

/// A device together with its mapped surface.
struct Attached<D: Device> {
    device: D,
    surface: Surface<D::Memory>,
}

/// The overlay renderer.
pub struct RenderSession<D: Device> {
    /// Title, size and colors.
    config: Config,
    /// Colors in widget form.
    palette: Palette,
    /// Mode forced at open.
    mode_request: ModeRequest,
    /// Present between open and close.
    attached: Option<Attached<D>>,
    /// Lifecycle state.
    state: SessionState,
    /// Window rectangle, fixed at open.
    window: Rect,
    /// Progress bar.
    bar: ProgressBar,
    /// Title line.
    title: TextBlock,
    /// Wrapped status text.
    status: TextBlock,
}

impl<D: Device> RenderSession<D> {
    /// Create a closed session.
    pub fn new(config: Config) -> Self {
        Self {
            palette: config.palette(),
            config,
            mode_request: ModeRequest::default(),
            attached: None,
            state: SessionState::Closed,
            window: Rect::ZERO,
            bar: ProgressBar::new(),
            title: TextBlock::new(0, 0, 0, 1, TextFlow::SingleLine),
            status: TextBlock::new(0, 0, 0, STATUS_LINES, TextFlow::Wrap(0)),
        }
    }

    /// Use a different mode at open.
    #[must_use]
    pub fn with_mode_request(mut self, request: ModeRequest) -> Self {
        self.mode_request = request;
        self
    }

    /// Attach a device: set its mode, map it, erase it and lay out the window.
    ///
    /// On error the device is closed and the session stays closed. Opening
    /// an open session is ignored.
    pub fn open(&mut self, mut device: D, steps: u32) -> Result<(), DeviceError> {
        if self.attached.is_some() {
            warn!("render session already open, ignoring second device");
            return Ok(());
        }

        let mut surface = match Self::bring_up(&mut device, &self.mode_request) {
            Ok(surface) => surface,
            Err(e) => {
                error!("cannot open render session: {e}");
                device.close();
                return Err(e);
            }
        };

        self.window = window_rect(
            self.config.width,
            self.config.height,
            surface.width(),
            surface.height(),
        );
        self.layout(steps);
        surface.clear(Bgra::TRANSPARENT);

        info!(
            "render session open: surface {}x{}, window {:?}",
            surface.width(),
            surface.height(),
            self.window
        );
        self.attached = Some(Attached { device, surface });
        self.state = SessionState::Open;
        Ok(())
    }

    fn bring_up(device: &mut D, request: &ModeRequest) -> Result<Surface<D::Memory>, DeviceError> {
        device.query_mode()?;
        let mode = device.set_mode(request)?;

        if mode.xres != request.xres || mode.yres != request.yres {
            warn!(
                "cannot change resolution, using {}x{}x{}",
                mode.xres, mode.yres, mode.bits_per_pixel
            );
        }
        if mode.bits_per_pixel != REQUIRED_BITS_PER_PIXEL {
            return Err(DeviceError::UnsupportedDepth(mode.bits_per_pixel));
        }

        let memory = device.map()?;
        Ok(Surface::new(memory, mode.geometry()))
    }

    fn layout(&mut self, steps: u32) {
        let w = self.window;
        self.bar.init(w, steps);
        self.title = TextBlock::new(w.x + TITLE_INSET, w.y + TITLE_INSET, w.right(), 1, TextFlow::SingleLine);
        self.status = TextBlock::new(
            w.x + TITLE_INSET,
            w.y + STATUS_TOP,
            w.right(),
            STATUS_LINES,
            TextFlow::Wrap(w.width.saturating_sub(STATUS_MARGIN)),
        );
    }

    /// Paint the full window: background, bar frame and title.
    pub fn show(&mut self) {
        let Some(attached) = self.attached.as_mut() else {
            debug!("show ignored: session closed");
            return;
        };
        let surface = &mut attached.surface;
        surface.clear(Bgra::TRANSPARENT);
        surface.fill_rect(self.window, self.palette.background);
        self.bar.paint(surface, &self.palette);
        self.state = SessionState::Shown;

        let title = self.config.title.clone();
        self.set_title(&title);
    }

    /// Replace the title line and blit.
    pub fn set_title(&mut self, title: &str) {
        let Some(attached) = self.attached.as_mut() else {
            return;
        };
        self.title.set_text(title);
        self.title.paint(&mut attached.surface, &self.palette);
        attached.device.blit();
    }

    /// Replace the status text (after cleanup) and blit.
    pub fn set_step_text(&mut self, text: &str) {
        if self.state != SessionState::Shown {
            debug!("status text ignored in state {:?}", self.state);
            return;
        }
        let Some(attached) = self.attached.as_mut() else {
            return;
        };
        self.status.set_text(clean_status_text(text));
        self.status.paint(&mut attached.surface, &self.palette);
        attached.device.blit();
    }

    /// Extend the bar fill to `percent` (clamped to 0-100) and blit.
    ///
    /// Progress must not decrease: only the filled part is painted.
    pub fn set_step_progress(&mut self, percent: i32) {
        if self.state != SessionState::Shown {
            debug!("progress ignored in state {:?}", self.state);
            return;
        }
        let Some(attached) = self.attached.as_mut() else {
            return;
        };
        if percent < i32::from(self.bar.percent()) {
            debug!("progress went back from {} to {percent}", self.bar.percent());
        }
        self.bar.paint_progress(&mut attached.surface, &self.palette, percent);
        attached.device.blit();
    }

    /// Erase the overlay, unmap and release the device.
    ///
    /// Returns the released device, or `None` if nothing was open.
    pub fn close(&mut self) -> Option<D> {
        let Attached { mut device, mut surface } = self.attached.take()?;
        surface.clear(Bgra::TRANSPARENT);
        device.unmap(surface.into_memory());
        device.close();
        self.state = SessionState::Closed;
        info!("render session closed");
        Some(device)
    }

    /// Get the lifecycle state.
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Get the configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Window rectangle ([`Rect::ZERO`] before the first open).
    pub const fn window(&self) -> Rect {
        self.window
    }

    /// Get the progress bar.
    pub const fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    /// Get the status text block.
    pub const fn status(&self) -> &TextBlock {
        &self.status
    }

    /// Get the title block.
    pub const fn title(&self) -> &TextBlock {
        &self.title
    }

    /// The mapped surface, while open.
    pub fn surface(&self) -> Option<&Surface<D::Memory>> {
        self.attached.as_ref().map(|a| &a.surface)
    }

    /// The attached device, while open.
    pub fn device(&self) -> Option<&D> {
        self.attached.as_ref().map(|a| &a.device)
    }
}

impl<D: Device> Drop for RenderSession<D> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<D: Device> std::fmt::Debug for RenderSession<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSession")
            .field("state", &self.state)
            .field("window", &self.window)
            .field("bar", &self.bar.geometry())
            .finish_non_exhaustive()
    }
}
