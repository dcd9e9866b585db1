//! Error types for layout parsing, asset loading and configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::Glyph;

// ── LayoutError ───────────────────────────────────────────────────────────────

/// Failures while constructing a [`LayoutGrid`](crate::layout::LayoutGrid)
/// from raw buffers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// No layout buffer was supplied.
    #[error("layout data is missing")]
    MissingLayout,

    /// The layout buffer is not exactly one byte per grid cell.
    #[error("invalid layout data length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A start position was required but no buffer was supplied.
    #[error("start position data is missing")]
    MissingStartPosition,

    /// The start position buffer is too short to hold both coordinates.
    #[error("invalid start position data: expected at least {expected} bytes, got {actual}")]
    InvalidStartPosition { expected: usize, actual: usize },
}

// ── AssetError ────────────────────────────────────────────────────────────────

/// Failures while loading atlas resources or building the sprite catalog.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode PNG: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid palette data: {0}")]
    InvalidPalette(String),

    /// A raw pixel buffer does not match its declared dimensions.
    #[error("pixel buffer holds {actual} pixels, expected {expected}")]
    PixelCount { expected: usize, actual: usize },

    #[error("sprite sheet has {found} cells, the tile table needs {needed}")]
    NotEnoughCells { needed: usize, found: usize },

    #[error("sprite sheet is {found}px tall, cells need {needed}px")]
    SheetTooShort { needed: u32, found: u32 },

    #[error("font sheet is {width}x{height}, need at least 96x8")]
    FontTooSmall { width: u32, height: u32 },

    /// A tile's unlabeled fallback names a tag the table never defines.
    #[error("tag {tag} falls back to tag {base}, which has no entry")]
    DanglingBase { tag: u8, base: u8 },

    #[error("tag {tag} uses glyph {glyph:?}, which the font sheet does not contain")]
    UnknownGlyph { tag: u8, glyph: Glyph },

    /// More entries were pushed than there are tags.
    #[error("tile table ran out of tags; {dropped} entries dropped")]
    TableOverflow { dropped: usize },
}

// ── ConfigError ───────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
