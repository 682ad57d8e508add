//! Background/scenery compositor
//!
//! Every operation re-fills its layer, composites it onto the screen and
//! presents right away.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::debug;

use super::{scale_to_height, FontStyle, Layer, Screen, TextExtent};
use crate::config::{HEIGHT, WIDTH};
use crate::error::GameError;
use crate::level::Rgb;

/// Decode an image file, missing files are reported as such
pub fn load_image(path: &Path) -> Result<RgbaImage, GameError> {
    let bytes = std::fs::read(path).map_err(|e| GameError::asset_io(path.to_path_buf(), e))?;
    let img = image::load_from_memory(&bytes).map_err(|source| GameError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// Owns the background and scenery layers and the screen
pub struct SceneCompositor {
    screen: Box<dyn Screen>,
    background: Layer,
    scenery: Layer,
    /// Root for background and scenery image paths
    backgrounds_dir: PathBuf,
}

impl SceneCompositor {
    pub fn new(screen: Box<dyn Screen>, backgrounds_dir: impl Into<PathBuf>) -> Self {
        Self {
            screen,
            background: Layer::new(WIDTH, HEIGHT),
            scenery: Layer::new(WIDTH, HEIGHT),
            backgrounds_dir: backgrounds_dir.into(),
        }
    }

    #[cfg(test)]
    pub fn background(&self) -> &Layer {
        &self.background
    }

    #[cfg(test)]
    pub fn scenery(&self) -> &Layer {
        &self.scenery
    }

    /// Solid `color` with `image_path` tiled over it along the top edge
    pub fn set_background(&mut self, color: Rgb, image_path: &str) -> Result<(), GameError> {
        let path = self.backgrounds_dir.join(image_path);
        let tile = scale_to_height(&load_image(&path)?, HEIGHT);

        self.background.fill(color);
        let placed = self.background.tile_row(&tile, 0);
        debug!("Background {} tiled {} times ({}px wide)", path.display(), placed.len(), tile.width());

        self.screen.blit_layer(&self.background);
        self.screen.present();
        Ok(())
    }

    /// `image_path` tiled along the bottom edge, over the background
    pub fn set_scenery(&mut self, image_path: &str) -> Result<(), GameError> {
        let path = self.backgrounds_dir.join(image_path);
        let tile = scale_to_height(&load_image(&path)?, HEIGHT);

        self.scenery.clear();
        let top = HEIGHT as i64 - tile.height() as i64;
        let placed = self.scenery.tile_row(&tile, top);
        debug!("Scenery {} tiled {} times ({}px wide)", path.display(), placed.len(), tile.width());

        self.screen.blit_layer(&self.scenery);
        self.screen.present();
        Ok(())
    }

    /// Draw `text` centered on `anchor.0`, top edge at `anchor.1`
    ///
    /// Returns the rendered size so a second line can be stacked below.
    pub fn write_centered_text(&mut self, text: &str, font: FontStyle, color: Rgb, anchor: (f32, f32)) -> TextExtent {
        let extent = self.screen.measure_text(text, font);
        let left = anchor.0 - extent.width / 2.0;
        self.screen.draw_text(text, font, color, left, anchor.1);
        self.screen.present();
        extent
    }

    /// Present the retained screen again (once per frame)
    pub fn refresh(&mut self) {
        self.screen.present();
    }
}
