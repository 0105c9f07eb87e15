//! Widget module: The regions of the overlay.
//!
//! Each widget owns a fixed rectangle inside the window and repaints only
//! that rectangle, so a status update never touches the bar and a progress
//! update never touches the text.

mod progress_bar;
mod text_block;
mod traits;

pub use progress_bar::{BarGeometry, BarStyle, ProgressBar};
pub use text_block::{TextBlock, TextFlow};
pub use traits::{Palette, Widget};
