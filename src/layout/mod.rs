//! Layout module: Geometry fixed once per session.
//!
//! The window is computed when the session opens and never moves afterwards,
//! so every repaint addresses the same pre-computed rectangles.

mod rect;
mod window;

pub use rect::Rect;
pub use window::window_rect;
