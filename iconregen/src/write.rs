use crate::container::Container;
use crate::scan::{Destination, Destinations};
use anyhow::{Context, Result};
use iconscale::Scaler;
use std::io::Cursor;

/// Encodes the file contents for `dest` from the master image.
pub fn render(scaler: &Scaler, dest: &Destination) -> Result<Vec<u8>> {
    match dest {
        Destination::Png { width, height, .. } => {
            let mut buf = Cursor::new(vec![]);
            scaler.write(&mut buf, *width, *height)?;
            Ok(buf.into_inner())
        }
        Destination::Ico { sizes, .. } => Container::Ico.encode(scaler, sizes),
        Destination::Icns { sizes, .. } => Container::Icns.encode(scaler, sizes),
    }
}

/// Overwrites every destination in write order. Stops at the first failure,
/// files rewritten before it stay rewritten.
pub fn regenerate(scaler: &Scaler, destinations: &Destinations) -> Result<()> {
    for dest in destinations.iter() {
        let bytes = render(scaler, dest)
            .with_context(|| format!("failed to render {}", dest.path().display()))?;
        std::fs::write(dest.path(), bytes)
            .with_context(|| format!("failed to write {}", dest.path().display()))?;
        log::info!("regenerated {}", dest);
    }
    Ok(())
}
