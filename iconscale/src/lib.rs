use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::io::{Seek, Write};
use std::path::Path;

/// Resampling filter used for every output size.
pub const FILTER: FilterType = FilterType::Lanczos3;

/// Holds the canonical master image: RGBA, square, never modified after
/// construction. Every resized output is derived from it directly.
pub struct Scaler {
    img: RgbaImage,
}

impl Scaler {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            anyhow::bail!("source image not found: {}", path.display());
        }
        let img = ImageReader::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?
            .with_guessed_format()?
            .decode()
            .with_context(|| format!("failed to decode {}", path.display()))?;
        Self::new(img)
    }

    /// Converts `img` to RGBA and crops it to its centered square.
    pub fn new(img: DynamicImage) -> Result<Self> {
        let img = img.to_rgba8();
        let (width, height) = img.dimensions();
        anyhow::ensure!(width > 0 && height > 0, "source image is empty");
        let img = if width == height {
            img
        } else {
            let side = width.min(height);
            let x = (width - side) / 2;
            let y = (height - side) / 2;
            log::debug!(
                "cropping {}x{} source to {}x{} at ({}, {})",
                width,
                height,
                side,
                side,
                x,
                y
            );
            image::imageops::crop_imm(&img, x, y, side, side).to_image()
        };
        Ok(Self { img })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn side(&self) -> u32 {
        self.img.width()
    }

    pub fn resize(&self, width: u32, height: u32) -> RgbaImage {
        image::imageops::resize(&self.img, width, height, FILTER)
    }

    pub fn resize_square(&self, size: u32) -> RgbaImage {
        self.resize(size, size)
    }

    /// Encodes a `width`x`height` rendition as PNG.
    pub fn write<W: Write + Seek>(&self, w: &mut W, width: u32, height: u32) -> Result<()> {
        self.resize(width, height).write_to(w, ImageFormat::Png)?;
        Ok(())
    }
}
