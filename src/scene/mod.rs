//! Scene composition
//!
//! Two persistent layers (background, scenery) are composited onto a screen
//! in that order. The screen is retained: whatever was blitted stays visible
//! until something opaque covers it, and the game loop re-presents it every
//! frame.

mod compositor;
mod layer;
mod window;

pub use compositor::*;
pub use layer::*;
pub use window::*;

use crate::level::Rgb;

/// The three fonts used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Prompts and hints
    Small,
    /// Level titles
    Medium,
    /// The game title
    Large,
}

impl FontStyle {
    /// TTF file under the fonts root
    pub fn file(&self) -> &'static str {
        match self {
            FontStyle::Small | FontStyle::Medium => "minya_nouvelle_bd.ttf",
            FontStyle::Large => "thats_super.ttf",
        }
    }

    /// Pixel size
    pub fn size(&self) -> u16 {
        match self {
            FontStyle::Small => 32,
            FontStyle::Medium => 64,
            FontStyle::Large => 72,
        }
    }
}

/// Size of a rendered line of text, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

/// The final buffer layers and text are drawn onto
pub trait Screen {
    /// Composite a full-viewport layer at (0, 0)
    fn blit_layer(&mut self, layer: &Layer);

    /// Size `text` would take once rendered
    fn measure_text(&self, text: &str, font: FontStyle) -> TextExtent;

    /// Draw `text` with its top-left corner at (`left`, `top`)
    fn draw_text(&mut self, text: &str, font: FontStyle, color: Rgb, left: f32, top: f32);

    /// Make everything drawn so far visible
    fn present(&mut self);
}
