use anyhow::Result;
use iconscale::Scaler;
use std::path::PathBuf;

pub mod container;
pub mod scan;
pub mod write;

pub use container::Container;
pub use scan::{Destination, Destinations};

/// Master image shipped next to this crate.
pub const DEFAULT_SOURCE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/master.png");
/// Icons directory of the app this workspace lives in.
pub const DEFAULT_ICONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../src-tauri/icons");

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub source: PathBuf,
    pub icons_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.into(),
            icons_dir: DEFAULT_ICONS_DIR.into(),
        }
    }
}

/// Loads the master image and rewrites every icon found in the icons
/// directory at the sizes it already has. Returns what was rewritten.
pub fn generate_icons(config: &Config) -> Result<Destinations> {
    let scaler = Scaler::open(&config.source)?;
    log::info!(
        "loaded {} as a {}x{} master",
        config.source.display(),
        scaler.side(),
        scaler.side()
    );
    let destinations = Destinations::scan(&config.icons_dir)?;
    if destinations.is_empty() {
        log::warn!("no icons to regenerate in {}", config.icons_dir.display());
    }
    write::regenerate(&scaler, &destinations)?;
    Ok(destinations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_anchored_at_the_crate() {
        let config = Config::default();
        assert!(config.source.ends_with("assets/master.png"));
        assert!(config.icons_dir.ends_with("src-tauri/icons"));
        assert!(config.source.starts_with(env!("CARGO_MANIFEST_DIR")));
    }

    #[test]
    fn missing_source_fails_before_scanning() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            source: dir.path().join("master.png"),
            icons_dir: dir.path().join("icons"),
        };
        let err = generate_icons(&config).unwrap_err();
        assert!(err.to_string().contains("source image not found"));
    }
}
