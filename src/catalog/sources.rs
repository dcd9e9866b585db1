use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::AssetManifest;
use crate::error::AssetError;
use crate::palette::Palette;
use crate::surface::PixelSurface;

/// Decoded resources a [`SpriteCatalog`](super::SpriteCatalog) is built from.
#[derive(Clone, Debug)]
pub struct AtlasSources {
    pub palette: Palette,
    /// One row of 24 × 24 cells.
    pub sprites: PixelSurface,
    /// Digits 0..=9 at 8 × 8, then one 16 × 8 glyph.
    pub font: PixelSurface,
    pub start_marker: PixelSurface,
}

impl AtlasSources {
    /// Decode resources held in memory: a Mega Drive palette dump and three
    /// indexed PNGs.
    pub fn from_bytes(
        palette: &[u8],
        sprites_png: &[u8],
        font_png: &[u8],
        start_marker_png: &[u8],
    ) -> Result<Self, AssetError> {
        Ok(Self {
            palette: Palette::from_md_bytes(palette)?,
            sprites: PixelSurface::from_png(sprites_png)?,
            font: PixelSurface::from_png(font_png)?,
            start_marker: PixelSurface::from_png(start_marker_png)?,
        })
    }

    /// Read every file named in `manifest` from `dir`.
    pub fn load_dir(dir: &Path, manifest: &AssetManifest) -> Result<Self, AssetError> {
        info!("loading atlas resources from {}", dir.display());
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read(&path).map_err(|source| AssetError::Io { path, source })
        };
        Self::from_bytes(
            &read(&manifest.palette)?,
            &read(&manifest.sprites)?,
            &read(&manifest.font)?,
            &read(&manifest.start_marker)?,
        )
    }
}
