//! # fbprogress
//!
//! A flicker-free progress overlay painted straight onto a Linux framebuffer.
//!
//! fbprogress draws a small window (title, bordered progress bar, wrapped
//! status text) into mapped video memory and updates it from `"<percent>
//! <text>"` lines written to a named pipe.
//!
//! ## Core Concepts
//!
//! - **Direct painting**: Widgets write BGRA pixels into the mapped surface,
//!   honoring the device's stride and panning offset
//! - **Region repaint**: Each update erases and redraws only its own region
//! - **Manual blit**: Frames become visible on an explicit swap when the
//!   driver supports it
//! - **Actor model**: The blocking pipe reader lives on its own thread
//!
//! ## Example
//!
//! ```rust,ignore
//! use fbprogress::{Config, MemoryDevice, RenderSession};
//!
//! let mut session = RenderSession::new(Config::default());
//! session.open(MemoryDevice::new(1280, 720), 2)?;
//! session.show();
//! session.set_step_text("Installing package-foo");
//! session.set_step_progress(42);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod config;
pub mod device;
pub mod font;
pub mod layout;
pub mod session;
pub mod surface;
pub mod text;
pub mod widget;

// Re-exports for convenience
pub use actor::{Command, Engine, FifoSource, PipeActor, PipeEvent, StopReason};
pub use config::Config;
pub use device::{Device, DeviceError, Framebuffer, MemoryDevice, ModeRequest, ScreenMode};
pub use layout::Rect;
pub use session::{RenderSession, SessionState};
pub use surface::{Bgra, Surface};
pub use widget::{Palette, ProgressBar, TextBlock, Widget};
