//! Multi-size icon containers: reading the size hint of an existing file and
//! encoding a fresh container from the master image.
use anyhow::{Context, Result};
use iconscale::Scaler;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

pub const ICO_FALLBACK_SIZES: [u32; 7] = [16, 24, 32, 48, 64, 128, 256];
pub const ICNS_FALLBACK_SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

/// Largest image an ico directory entry can describe.
const ICO_MAX_SIZE: u32 = 256;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Container {
    Ico,
    Icns,
}

impl Container {
    pub fn fallback_sizes(self) -> &'static [u32] {
        match self {
            Self::Ico => &ICO_FALLBACK_SIZES,
            Self::Icns => &ICNS_FALLBACK_SIZES,
        }
    }

    /// Returns the sizes embedded in the container at `path`, sorted and
    /// de-duplicated. `None` if the file can't be parsed or holds no images.
    pub fn read_sizes(self, path: &Path) -> Option<Vec<u32>> {
        let r = BufReader::new(File::open(path).ok()?);
        let sizes: Vec<u32> = match self {
            Self::Ico => ico::IconDir::read(r)
                .ok()?
                .entries()
                .iter()
                .map(|entry| entry.width())
                .collect(),
            Self::Icns => icns::IconFamily::read(r)
                .ok()?
                .available_icons()
                .into_iter()
                .map(|ty| ty.pixel_width())
                .collect(),
        };
        normalize(sizes)
    }

    pub fn sizes_or_fallback(self, path: &Path) -> Vec<u32> {
        match self.read_sizes(path) {
            Some(sizes) => sizes,
            None => {
                log::debug!(
                    "no readable size list in {}, using {:?}",
                    path.display(),
                    self.fallback_sizes()
                );
                self.fallback_sizes().to_vec()
            }
        }
    }

    /// Renders one square image per size and packs them into a container.
    pub fn encode(self, scaler: &Scaler, sizes: &[u32]) -> Result<Vec<u8>> {
        let mut buf = vec![];
        match self {
            Self::Ico => {
                let mut dir = ico::IconDir::new(ico::ResourceType::Icon);
                for &size in sizes {
                    anyhow::ensure!(
                        (1..=ICO_MAX_SIZE).contains(&size),
                        "ico images must be between 1 and {} px, got {}",
                        ICO_MAX_SIZE,
                        size
                    );
                    let rgba = scaler.resize_square(size).into_raw();
                    let image = ico::IconImage::from_rgba_data(size, size, rgba);
                    dir.add_entry(ico::IconDirEntry::encode(&image)?);
                }
                dir.write(&mut buf)?;
            }
            Self::Icns => {
                let mut family = icns::IconFamily::new();
                let mut png = vec![];
                for &size in sizes {
                    png.clear();
                    scaler.write(&mut Cursor::new(&mut png), size, size)?;
                    let image = icns::Image::read_png(&*png)?;
                    family
                        .add_icon(&image)
                        .with_context(|| format!("icns can't hold a {0}x{0} image", size))?;
                }
                family.write(&mut buf)?;
            }
        }
        Ok(buf)
    }
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Ico => write!(f, "ico"),
            Self::Icns => write!(f, "icns"),
        }
    }
}

fn normalize(sizes: Vec<u32>) -> Option<Vec<u32>> {
    let sizes: Vec<u32> = sizes.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
    if sizes.is_empty() {
        None
    } else {
        Some(sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn scaler() -> Scaler {
        let img = RgbaImage::from_pixel(64, 64, Rgba([200, 40, 10, 255]));
        Scaler::new(DynamicImage::ImageRgba8(img)).unwrap()
    }

    #[test]
    fn normalize_sorts_and_dedups() {
        assert_eq!(normalize(vec![48, 16, 32, 16]), Some(vec![16, 32, 48]));
        assert_eq!(normalize(vec![]), None);
    }

    #[test]
    fn unreadable_container_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ico");
        std::fs::write(&path, b"definitely not an icon").unwrap();
        assert_eq!(Container::Ico.read_sizes(&path), None);
        assert_eq!(Container::Ico.sizes_or_fallback(&path), ICO_FALLBACK_SIZES);
        assert_eq!(Container::Icns.sizes_or_fallback(&path), ICNS_FALLBACK_SIZES);
    }

    #[test]
    fn missing_container_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.icns");
        assert_eq!(Container::Icns.read_sizes(&path), None);
    }

    #[test]
    fn ico_reads_back_encoded_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.ico");
        let bytes = Container::Ico.encode(&scaler(), &[32, 16, 256]).unwrap();
        std::fs::write(&path, bytes).unwrap();
        assert_eq!(Container::Ico.read_sizes(&path), Some(vec![16, 32, 256]));
    }

    #[test]
    fn icns_reads_back_pixel_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.icns");
        let bytes = Container::Icns.encode(&scaler(), &[16, 64, 128]).unwrap();
        std::fs::write(&path, bytes).unwrap();
        assert_eq!(Container::Icns.read_sizes(&path), Some(vec![16, 64, 128]));
    }

    #[test]
    fn ico_rejects_oversized_entries() {
        let err = Container::Ico.encode(&scaler(), &[16, 512]).unwrap_err();
        assert!(err.to_string().contains("512"));
    }

    #[test]
    fn icns_rejects_unsupported_sizes() {
        assert!(Container::Icns.encode(&scaler(), &[20]).is_err());
    }
}
