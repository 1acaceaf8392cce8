//! Program image loading

use anyhow::{Context, Result};
use image::RgbImage;
use std::path::Path;
use tessel_core::{Color, PixelGrid};

/// Open an image file and reduce it to a pixel grid
pub fn load(path: &Path) -> Result<PixelGrid> {
    let image = image::open(path)
        .with_context(|| format!("failed to open image {}", path.display()))?
        .to_rgb8();
    to_grid(&image).with_context(|| format!("invalid program image {}", path.display()))
}

/// Convert decoded RGB pixels into a grid, row-major
pub fn to_grid(image: &RgbImage) -> Result<PixelGrid> {
    let pixels = image
        .pixels()
        .map(|pixel| Color::from_rgb(pixel[0], pixel[1], pixel[2]))
        .collect();
    Ok(PixelGrid::new(image.width() as usize, image.height() as usize, pixels)?)
}
