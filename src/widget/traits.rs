//! Widget trait and the palette widgets paint with.

use crate::layout::Rect;
use crate::surface::{Bgra, Surface};
use std::ops::DerefMut;

/// The three colors of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Window and region background.
    pub background: Bgra,
    /// Progress bar border and fill.
    pub bar: Bgra,
    /// Title and status text.
    pub text: Bgra,
}

/// A fixed region of the overlay that can repaint itself.
///
/// Widgets paint directly into the surface and never blit; the session
/// decides when a frame is complete.
pub trait Widget {
    /// The area this widget owns. Painting stays inside it.
    fn bounds(&self) -> Rect;

    /// Repaint the whole widget.
    fn paint<M: DerefMut<Target = [u8]>>(&self, surface: &mut Surface<M>, palette: &Palette);

    /// Paint the widget's area with the background color.
    fn erase<M: DerefMut<Target = [u8]>>(&self, surface: &mut Surface<M>, palette: &Palette) {
        surface.fill_rect(self.bounds(), palette.background);
    }
}
