//! Actor Model: Command ingestion on its own thread.
//!
//! - **Pipe Actor**: Blocks on the named pipe, parses lines, forwards commands
//! - **Engine**: Owns the render session and applies commands in order
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐      PipeEvent      ┌──────────────┐
//! │ Pipe Thread  │ ─────────────────▶  │    Engine    │
//! │ (FIFO, EOF → │    (crossbeam,      │ (main thread)│
//! │   reopen)    │     bounded)        └──────┬───────┘
//! └──────────────┘                            │
//!                                             ▼
//!                                      ┌──────────────┐
//!                                      │RenderSession │
//!                                      └──────────────┘
//! ```

mod engine;
mod messages;
mod pipe;

pub use engine::{Engine, StopReason};
pub use messages::{Command, PipeEvent, QUIT_SENTINEL};
pub use pipe::{CommandSource, FifoGuard, FifoSource, PipeActor, PipeReader, DEFAULT_PIPE_PATH};
