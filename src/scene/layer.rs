//! Full-viewport drawing layers
//!
//! Layers are CPU-side RGBA images. Images placed on a layer are scaled to
//! the layer height and tiled left to right until the width is covered.

use image::{imageops, imageops::FilterType, Rgba, RgbaImage};

use crate::level::Rgb;

/// Width of `width x height` scaled to `target_height`, aspect preserved
///
/// Never returns 0 so tiling always advances.
pub fn scaled_width(width: u32, height: u32, target_height: u32) -> u32 {
    if height == 0 {
        return 1;
    }
    let scaled = (width as f64 * target_height as f64 / height as f64).round() as u32;
    scaled.max(1)
}

/// Left edges of tiles of width `tile_width` covering `0..viewport_width`
///
/// The last tile may hang past the right edge; there is never a gap.
pub fn tile_offsets(viewport_width: u32, tile_width: u32) -> impl Iterator<Item = u32> {
    (0..viewport_width).step_by(tile_width.max(1) as usize)
}

/// Rescale `img` to `target_height`, keeping its aspect ratio
pub fn scale_to_height(img: &RgbaImage, target_height: u32) -> RgbaImage {
    let width = scaled_width(img.width(), img.height(), target_height);
    imageops::resize(img, width, target_height, FilterType::Lanczos3)
}

/// A persistent, alpha-capable full-viewport surface
#[derive(Debug, Clone)]
pub struct Layer {
    image: RgbaImage,
    /// Every pixel has full alpha (set by `fill`, survives tiling)
    opaque: bool,
}

impl Layer {
    /// Fully transparent layer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            opaque: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Replace every pixel with an opaque color
    pub fn fill(&mut self, color: Rgb) {
        let pixel = color.to_rgba();
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
        self.opaque = true;
    }

    /// Reset to fully transparent
    pub fn clear(&mut self) {
        for p in self.image.pixels_mut() {
            *p = Rgba([0, 0, 0, 0]);
        }
        self.opaque = false;
    }

    /// Blend `tile` across the whole width with its top edge at `top`
    ///
    /// Returns the left edge of every tile placed.
    pub fn tile_row(&mut self, tile: &RgbaImage, top: i64) -> Vec<u32> {
        let offsets: Vec<u32> = tile_offsets(self.width(), tile.width()).collect();
        for &x in &offsets {
            imageops::overlay(&mut self.image, tile, x as i64, top);
        }
        offsets
    }
}
