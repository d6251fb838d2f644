//! Image serialization.
//!
//! Colors are clamped to [0, 1], scaled by 255 and truncated. `.ppm` files
//! are written as binary PPM (P6); `.png` files go through the `image`
//! crate.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbImage};
use thiserror::Error;
use whitted_math::{Color, Interval};

use crate::ImageBuffer;

/// Errors that can occur while saving an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0} (expected .ppm or .png)")]
    UnsupportedFormat(String),

    #[error("Pixel data does not match {width}x{height}")]
    SizeMismatch { width: u32, height: u32 },
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let to_byte = |c: f32| (Interval::UNIT.clamp(c) * 255.0) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

impl ImageBuffer {
    /// Convert to packed RGB bytes, row-major from the top-left.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels().len() * 3);
        for color in self.pixels() {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }
}

/// Write an image as binary PPM (P6).
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> Result<(), OutputError> {
    write!(writer, "P6\n{} {}\n255\n", image.width, image.height)?;
    writer.write_all(&image.to_rgb8())?;
    Ok(())
}

/// Save an image, choosing the format from the file extension.
pub fn save_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> Result<(), OutputError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_ppm(image, &mut writer)?;
            writer.flush()?;
        }
        "png" => {
            let rgb = RgbImage::from_raw(image.width, image.height, image.to_rgb8()).ok_or(
                OutputError::SizeMismatch {
                    width: image.width,
                    height: image.height,
                },
            )?;
            rgb.save_with_format(path, ImageFormat::Png)?;
        }
        _ => return Err(OutputError::UnsupportedFormat(path.display().to_string())),
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
