//! Progress Bar Widget: A bordered horizontal bar in video memory.
//!
//! ```text
//! outer (bar color) ┌──────────────────────────────┐
//! gap (background)  │ ┌──────────────────────────┐ │
//! fill (bar color)  │ │██████████████            │ │
//!                   │ └──────────────────────────┘ │
//!                   └──────────────────────────────┘
//!                    2px border, 1px gap, then fill
//! ```
//!
//! The bar has two states: uninitialized until [`ProgressBar::init`] lays it
//! out inside the window, laid out afterwards. The geometry does not change
//! for the rest of the session.

use super::traits::{Palette, Widget};
use crate::layout::Rect;
use crate::surface::Surface;
use std::ops::DerefMut;

/// Fixed offsets and border sizes of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarStyle {
    /// Distance from the window's left edge to the outer border.
    pub left_inset: u32,
    /// Distance from the window's top edge to the outer border.
    pub top_inset: u32,
    /// Window width not covered by the outer rectangle.
    pub horizontal_margin: u32,
    /// Height of the fill area.
    pub inner_height: u32,
    /// Width of the outer (bar-colored) border.
    pub outer_border: u32,
    /// Width of the gap (background-colored) inside the outer border.
    pub inner_border: u32,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            left_inset: 10,
            top_inset: 50,
            horizontal_margin: 30,
            inner_height: 20,
            outer_border: 2,
            inner_border: 1,
        }
    }
}

impl BarStyle {
    /// Total border thickness on one side.
    #[inline]
    pub const fn border(&self) -> u32 {
        self.outer_border + self.inner_border
    }
}

/// Laid-out bar rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGeometry {
    /// Outer rectangle, including both borders.
    pub outer: Rect,
    /// Drawable fill area at 100%.
    pub inner: Rect,
}

/// A progress bar laid out once per session.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    /// Offsets and borders.
    style: BarStyle,
    /// `None` until `init`.
    geometry: Option<BarGeometry>,
    /// Number of steps requested at `init`. Always rendered as one bar.
    steps: u32,
    /// Last percent passed to `paint_progress`, after clamping.
    percent: u8,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBar {
    /// Create an uninitialized bar with the default style.
    pub fn new() -> Self {
        Self::with_style(BarStyle::default())
    }

    /// Create an uninitialized bar with a custom style.
    pub const fn with_style(style: BarStyle) -> Self {
        Self {
            style,
            geometry: None,
            steps: 1,
            percent: 0,
        }
    }

    /// Lay the bar out inside `window`.
    ///
    /// `steps` is kept for multi-segment bars; a single continuous bar is
    /// drawn regardless.
    pub fn init(&mut self, window: Rect, steps: u32) {
        let style = &self.style;
        let border = style.border();
        let outer = Rect::new(
            window.x + style.left_inset,
            window.y + style.top_inset,
            window.width.saturating_sub(style.horizontal_margin),
            style.inner_height + 2 * border,
        );
        let inner = Rect::new(
            outer.x + border,
            outer.y + border,
            outer.width.saturating_sub(2 * border),
            style.inner_height,
        );
        self.geometry = Some(BarGeometry { outer, inner });
        self.steps = steps;
        self.percent = 0;
    }

    /// Check if `init` has run.
    pub const fn is_laid_out(&self) -> bool {
        self.geometry.is_some()
    }

    /// Get the laid-out geometry.
    pub const fn geometry(&self) -> Option<BarGeometry> {
        self.geometry
    }

    /// Number of steps requested at `init`.
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    /// Last painted percent (0-100).
    pub const fn percent(&self) -> u8 {
        self.percent
    }

    /// Fill rectangle for a percent, clamped to `0..=100`.
    ///
    /// The fill starts at the inner origin and is
    /// `round(inner_width / 100 * percent)` pixels wide. Returns `None`
    /// while the bar is uninitialized.
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    pub fn fill_rect(&self, percent: i32) -> Option<Rect> {
        let inner = self.geometry?.inner;
        let percent = percent.clamp(0, 100);
        let width = (f64::from(inner.width) / 100.0 * f64::from(percent)).round() as u32;
        Some(Rect::new(inner.x, inner.y, width.min(inner.width), inner.height))
    }

    /// Paint the fill for `percent` in the bar color.
    ///
    /// Only the filled part is painted. Progress is expected to be
    /// non-decreasing; a smaller percent than last time leaves the old
    /// fill visible until the next full [`paint`](Widget::paint).
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    pub fn paint_progress<M: DerefMut<Target = [u8]>>(
        &mut self,
        surface: &mut Surface<M>,
        palette: &Palette,
        percent: i32,
    ) -> Option<Rect> {
        let fill = self.fill_rect(percent)?;
        surface.fill_rect(fill, palette.bar);
        self.percent = percent.clamp(0, 100) as u8;
        Some(fill)
    }
}

impl Widget for ProgressBar {
    fn bounds(&self) -> Rect {
        self.geometry.map_or(Rect::ZERO, |g| g.outer)
    }

    /// Paint the frame: outer rectangle in the bar color, then the inside
    /// (gap and fill area) in the background color.
    fn paint<M: DerefMut<Target = [u8]>>(&self, surface: &mut Surface<M>, palette: &Palette) {
        let Some(geometry) = self.geometry else {
            return;
        };
        surface.fill_rect(geometry.outer, palette.bar);
        surface.fill_rect(geometry.outer.shrink(self.style.outer_border), palette.background);
    }
}
