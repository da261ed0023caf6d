use crate::container::Container;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// An existing icon file together with the size(s) it gets regenerated at.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Destination {
    Png {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    Ico {
        path: PathBuf,
        sizes: Vec<u32>,
    },
    Icns {
        path: PathBuf,
        sizes: Vec<u32>,
    },
}

impl Destination {
    /// Inspects `path` and records what it needs to be rendered at. Returns
    /// `None` for files that aren't icons.
    pub fn classify(path: &Path) -> Result<Option<Self>> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let dest = match ext.as_deref() {
            Some("png") => {
                let (width, height) = image::image_dimensions(path)
                    .with_context(|| format!("failed to read size of {}", path.display()))?;
                Self::Png {
                    path: path.to_path_buf(),
                    width,
                    height,
                }
            }
            Some("ico") => Self::Ico {
                path: path.to_path_buf(),
                sizes: Container::Ico.sizes_or_fallback(path),
            },
            Some("icns") => Self::Icns {
                path: path.to_path_buf(),
                sizes: Container::Icns.sizes_or_fallback(path),
            },
            _ => return Ok(None),
        };
        Ok(Some(dest))
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Png { path, .. } | Self::Ico { path, .. } | Self::Icns { path, .. } => path,
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Png {
                path,
                width,
                height,
            } => write!(f, "{} ({}x{})", path.display(), width, height),
            Self::Ico { path, sizes } | Self::Icns { path, sizes } => {
                write!(f, "{} {:?}", path.display(), sizes)
            }
        }
    }
}

/// Work list of a run, in write order: pngs, then ico, then icns.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Destinations {
    pub pngs: Vec<Destination>,
    pub ico: Option<Destination>,
    pub icns: Option<Destination>,
}

impl Destinations {
    /// Scans the immediate entries of `icons_dir` in path order.
    pub fn scan(icons_dir: &Path) -> Result<Self> {
        if !icons_dir.is_dir() {
            anyhow::bail!("icons directory not found: {}", icons_dir.display());
        }
        let mut paths = std::fs::read_dir(icons_dir)
            .with_context(|| format!("failed to list {}", icons_dir.display()))?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        paths.sort();

        let mut destinations = Self::default();
        for path in paths {
            if !path.is_file() {
                continue;
            }
            match Destination::classify(&path)? {
                Some(dest) => {
                    log::debug!("found {}", dest);
                    destinations.push(dest)?;
                }
                None => log::debug!("ignoring {}", path.display()),
            }
        }
        Ok(destinations)
    }

    pub fn push(&mut self, dest: Destination) -> Result<()> {
        let (slot, format) = match dest {
            Destination::Png { .. } => {
                self.pngs.push(dest);
                return Ok(());
            }
            Destination::Ico { .. } => (&mut self.ico, Container::Ico),
            Destination::Icns { .. } => (&mut self.icns, Container::Icns),
        };
        if let Some(prev) = slot {
            anyhow::bail!(
                "found both {} and {}, an icons directory may only hold one {} file",
                prev.path().display(),
                dest.path().display(),
                format
            );
        }
        *slot = Some(dest);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.pngs.iter().chain(self.ico.iter()).chain(self.icns.iter())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
