//! macroquad-backed screen
//!
//! macroquad is immediate mode, so the screen keeps a list of draw commands
//! and replays it on every present, scaled to fit the window.

use std::path::Path;

use macroquad::prelude::*;
use tracing::info;

use super::{FontStyle, Layer, Screen, TextExtent};
use crate::config::{HEIGHT, WIDTH};
use crate::error::GameError;
use crate::level::Rgb;

/// Placement of the logical viewport inside the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Letterbox {
    /// Largest uniform scale that fits, centered
    pub fn fit(window_w: f32, window_h: f32, logical_w: f32, logical_h: f32) -> Self {
        let scale = (window_w / logical_w).min(window_h / logical_h);
        Self {
            x: ((window_w - logical_w * scale) / 2.0).round(),
            y: ((window_h - logical_h * scale) / 2.0).round(),
            scale,
        }
    }
}

/// Glyphs spanning a font's full ascent and descent
const LINE_SAMPLE: &str = "ÁÇbdfhjgpqy|";

/// The text's own width with the font's line height
///
/// Stacked lines keep the same spacing whatever glyphs they contain.
fn line_extent(text: TextDimensions, line: TextDimensions) -> TextExtent {
    TextExtent {
        width: text.width,
        height: line.height,
    }
}

fn to_color(color: Rgb) -> Color {
    Color::from_rgba(color.0, color.1, color.2, 255)
}

enum DrawCommand {
    Layer(Texture2D),
    Text {
        text: String,
        font: FontStyle,
        color: Color,
        left: f32,
        /// Baseline, in logical pixels
        baseline: f32,
    },
}

struct FontBook {
    small: Font,
    medium: Font,
    large: Font,
}

impl FontBook {
    fn load(fonts_dir: &Path) -> Result<Self, GameError> {
        Ok(Self {
            small: load_font(fonts_dir, FontStyle::Small)?,
            medium: load_font(fonts_dir, FontStyle::Medium)?,
            large: load_font(fonts_dir, FontStyle::Large)?,
        })
    }

    fn get(&self, style: FontStyle) -> &Font {
        match style {
            FontStyle::Small => &self.small,
            FontStyle::Medium => &self.medium,
            FontStyle::Large => &self.large,
        }
    }

    fn measure(&self, text: &str, style: FontStyle) -> TextDimensions {
        measure_text(text, Some(self.get(style)), style.size(), 1.0)
    }

    /// Height and ascent shared by every line in `style`
    fn line(&self, style: FontStyle) -> TextDimensions {
        self.measure(LINE_SAMPLE, style)
    }
}

fn load_font(fonts_dir: &Path, style: FontStyle) -> Result<Font, GameError> {
    let path = fonts_dir.join(style.file());
    let bytes = std::fs::read(&path).map_err(|e| GameError::asset_io(path.clone(), e))?;
    let font = load_ttf_font_from_bytes(&bytes).map_err(|e| GameError::Font {
        path: path.clone(),
        message: format!("{:?}", e),
    })?;
    info!("Loaded font {} ({}px)", path.display(), style.size());
    Ok(font)
}

/// The game window, letterboxed to the logical resolution
pub struct WindowScreen {
    fonts: FontBook,
    commands: Vec<DrawCommand>,
}

impl WindowScreen {
    /// Load every font up front; a missing font is fatal
    pub fn new(fonts_dir: &Path) -> Result<Self, GameError> {
        Ok(Self {
            fonts: FontBook::load(fonts_dir)?,
            commands: Vec::new(),
        })
    }
}

impl Screen for WindowScreen {
    fn blit_layer(&mut self, layer: &Layer) {
        // An opaque layer hides everything drawn before it
        if layer.is_opaque() {
            self.commands.clear();
        }
        let texture = Texture2D::from_rgba8(layer.width() as u16, layer.height() as u16, layer.image().as_raw());
        texture.set_filter(FilterMode::Linear);
        self.commands.push(DrawCommand::Layer(texture));
    }

    fn measure_text(&self, text: &str, font: FontStyle) -> TextExtent {
        line_extent(self.fonts.measure(text, font), self.fonts.line(font))
    }

    fn draw_text(&mut self, text: &str, font: FontStyle, color: Rgb, left: f32, top: f32) {
        let ascent = self.fonts.line(font).offset_y;
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            font,
            color: to_color(color),
            left,
            baseline: top + ascent,
        });
    }

    fn present(&mut self) {
        let logical_w = WIDTH as f32;
        let logical_h = HEIGHT as f32;
        let lb = Letterbox::fit(screen_width(), screen_height(), logical_w, logical_h);

        clear_background(BLACK);
        for command in &self.commands {
            match command {
                DrawCommand::Layer(texture) => {
                    draw_texture_ex(
                        texture,
                        lb.x,
                        lb.y,
                        WHITE,
                        DrawTextureParams {
                            dest_size: Some(vec2(logical_w * lb.scale, logical_h * lb.scale)),
                            ..Default::default()
                        },
                    );
                }
                DrawCommand::Text { text, font, color, left, baseline } => {
                    draw_text_ex(
                        text,
                        lb.x + left * lb.scale,
                        lb.y + baseline * lb.scale,
                        TextParams {
                            font: Some(self.fonts.get(*font)),
                            font_size: font.size(),
                            font_scale: lb.scale,
                            color: *color,
                            ..Default::default()
                        },
                    );
                }
            }
        }
    }
}
