pub mod catalog;
pub mod config;
pub mod error;
pub mod layout;
pub mod palette;
pub mod render;
pub mod surface;

pub use catalog::{AtlasSources, SpriteCatalog};
pub use config::{AssetManifest, Config, RenderConfig};
pub use error::{AssetError, ConfigError, LayoutError};
pub use layout::{LayoutGrid, StartPosition, TileSelection, TileSource};
pub use palette::Palette;
pub use render::LayoutRenderer;
pub use surface::PixelSurface;
