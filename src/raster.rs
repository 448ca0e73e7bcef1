use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{imageops, DynamicImage, ImageFormat, ImageResult, RgbaImage};

/// Fraction of the code's width given to the logo.
pub const LOGO_SCALE: f64 = 0.25;

/// Square region the logo occupies on the code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// Centered square of side `floor(LOGO_SCALE * width)`.
pub fn logo_placement(width: u32, height: u32) -> Placement {
    let size = (width as f64 * LOGO_SCALE).floor() as u32;
    Placement {
        x: width.saturating_sub(size) / 2,
        y: height.saturating_sub(size) / 2,
        size,
    }
}

pub fn decode_image_bytes(bytes: &[u8]) -> ImageResult<DynamicImage> {
    image::load_from_memory(bytes)
}

/// Draw `overlay` scaled to the placement square on a copy of `base`.
///
/// The overlay is resized with a triangle (bilinear) filter and alpha-blended,
/// the way a canvas `drawImage` with smoothing behaves.
pub fn composite(base: &RgbaImage, overlay: &DynamicImage, placement: Placement) -> RgbaImage {
    let mut surface = base.clone();
    if placement.size == 0 {
        return surface;
    }

    let logo = imageops::resize(
        &overlay.to_rgba8(),
        placement.size,
        placement.size,
        imageops::FilterType::Triangle,
    );
    imageops::overlay(
        &mut surface,
        &logo,
        i64::from(placement.x),
        i64::from(placement.y),
    );
    surface
}

pub fn encode_png(image: &RgbaImage) -> ImageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn data_uri(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(png)
    )
}
