//! Text module: Bitmap text drawn straight into a [`Surface`](crate::surface::Surface).
//!
//! There is no intermediate glyph cache: every set bit of a glyph becomes one
//! (thin) or four (thick) pixel writes.
//!
//! - [`render_char`] / [`render_string`]: single glyph and single line
//! - [`render_string_wrap`]: greedy word wrap on top of [`wrap_layout`]
//! - [`clean_status_text`]: strips feed and package noise before display

mod cleanup;
mod render;
mod wrap;

pub use cleanup::{clean_status_text, NOISE_FRAGMENTS};
pub use render::{render_char, render_string, render_string_wrap, Stroke, TextStyle};
pub use wrap::{wrap_layout, PlacedGlyph};
pub(crate) use wrap::is_space;
