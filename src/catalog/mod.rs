//! Tag → bitmap catalog cut from the packed sprite and font sheets.

pub mod recipe;
pub mod sources;

use std::sync::Arc;

use tracing::debug;

use crate::error::AssetError;
use crate::palette::Palette;
use crate::surface::PixelSurface;

pub use recipe::{Glyph, TileEntry, TileRecipe, TileTable};
pub use sources::AtlasSources;

/// Side length of one tile cell in pixels.
pub const CELL_SIZE: u32 = 24;
/// Side length of a digit glyph.
pub const GLYPH_SIZE: u32 = 8;
/// Width of the trailing wide glyph.
pub const WIDE_GLYPH_WIDTH: u32 = 16;

const DIGIT_COUNT: u32 = 10;
const FONT_MIN_WIDTH: u32 = DIGIT_COUNT * GLYPH_SIZE + WIDE_GLYPH_WIDTH;
const TAG_COUNT: usize = 256;

type BitmapSet = Vec<Option<Arc<PixelSurface>>>;

// ── Sheet slicing ─────────────────────────────────────────────────────────────

/// Cut `sheet` into `sheet.width() / cell_w` cells, left to right.
pub fn slice_cells(sheet: &PixelSurface, cell_w: u32, cell_h: u32) -> Vec<PixelSurface> {
    (0..sheet.width() / cell_w)
        .map(|i| sheet.section(i * cell_w, 0, cell_w, cell_h))
        .collect()
}

/// Font glyphs: ten 8 × 8 digits followed by the 16 × 8 wide glyph.
#[derive(Clone, Debug)]
pub struct FontGlyphs {
    digits: Vec<PixelSurface>,
    wide: PixelSurface,
}

impl FontGlyphs {
    pub fn slice(font: &PixelSurface) -> Result<Self, AssetError> {
        if font.width() < FONT_MIN_WIDTH || font.height() < GLYPH_SIZE {
            return Err(AssetError::FontTooSmall {
                width: font.width(),
                height: font.height(),
            });
        }
        let digits = slice_cells(font, GLYPH_SIZE, GLYPH_SIZE)
            .into_iter()
            .take(DIGIT_COUNT as usize)
            .collect();
        let wide = font.section(DIGIT_COUNT * GLYPH_SIZE, 0, WIDE_GLYPH_WIDTH, GLYPH_SIZE);
        Ok(Self { digits, wide })
    }

    /// Bitmap for `glyph`, `None` for digits above 9.
    pub fn get(&self, glyph: Glyph) -> Option<&PixelSurface> {
        match glyph {
            Glyph::Digit(d) => self.digits.get(d as usize),
            Glyph::Wide => Some(&self.wide),
        }
    }
}

// ── SpriteCatalog ─────────────────────────────────────────────────────────────

/// Immutable tag → bitmap lookup built once from [`AtlasSources`].
///
/// Two parallel sets are kept: `labeled`, where numbered walls carry their
/// digit, and `unlabeled`, where each numbered wall shares its group's plain
/// base bitmap.  Both sets hold exactly the same tags.  Bitmaps are
/// reference-counted so the catalog can be shared across threads.
#[derive(Clone, Debug)]
pub struct SpriteCatalog {
    labeled: BitmapSet,
    unlabeled: BitmapSet,
    start_marker: PixelSurface,
    palette: Palette,
}

impl SpriteCatalog {
    /// Build with the standard Special Stage tag table.
    pub fn build(sources: &AtlasSources) -> Result<Self, AssetError> {
        Self::build_with_table(sources, &TileTable::standard())
    }

    /// Build from an explicit tag table.
    ///
    /// The sheets are validated against the table before anything is cut, so
    /// a failure never leaves a partially filled catalog behind.
    pub fn build_with_table(sources: &AtlasSources, table: &TileTable) -> Result<Self, AssetError> {
        let sheet = &sources.sprites;
        if sheet.height() < CELL_SIZE {
            return Err(AssetError::SheetTooShort {
                needed: CELL_SIZE,
                found: sheet.height(),
            });
        }
        let cells = slice_cells(sheet, CELL_SIZE, CELL_SIZE);
        if let Some(max) = table.max_cell() {
            if max >= cells.len() {
                return Err(AssetError::NotEnoughCells {
                    needed: max + 1,
                    found: cells.len(),
                });
            }
        }
        if table.dropped() > 0 {
            return Err(AssetError::TableOverflow { dropped: table.dropped() });
        }
        for entry in table.entries() {
            if let Some(base) = entry.unlabeled {
                if table.get(base).is_none() {
                    return Err(AssetError::DanglingBase { tag: entry.tag, base });
                }
            }
        }
        let font = FontGlyphs::slice(&sources.font)?;

        let mut labeled: BitmapSet = vec![None; TAG_COUNT];
        for entry in table.entries() {
            let bitmap = cook(entry, &cells, &font)?;
            labeled[entry.tag as usize] = Some(Arc::new(bitmap));
        }

        let mut unlabeled = labeled.clone();
        for entry in table.entries() {
            if let Some(base) = entry.unlabeled {
                unlabeled[entry.tag as usize] = labeled[base as usize].clone();
            }
        }

        debug!(
            "sprite catalog: {} cells, {} tags",
            cells.len(),
            labeled.iter().flatten().count()
        );

        Ok(Self {
            labeled,
            unlabeled,
            start_marker: sources.start_marker.clone(),
            palette: sources.palette.clone(),
        })
    }

    /// Bitmap for `tag` from the labeled or unlabeled set.
    pub fn get(&self, tag: u8, show_labels: bool) -> Option<&PixelSurface> {
        let set = if show_labels { &self.labeled } else { &self.unlabeled };
        set[tag as usize].as_deref()
    }

    pub fn labeled(&self, tag: u8) -> Option<&PixelSurface> {
        self.get(tag, true)
    }

    pub fn unlabeled(&self, tag: u8) -> Option<&PixelSurface> {
        self.get(tag, false)
    }

    pub fn contains(&self, tag: u8) -> bool {
        self.labeled[tag as usize].is_some()
    }

    /// All tags present, ascending.
    pub fn tags(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(|&t| self.contains(t))
    }

    /// `true` when `tag` renders differently with labels hidden.
    pub fn is_labeled_variant(&self, tag: u8) -> bool {
        match (&self.labeled[tag as usize], &self.unlabeled[tag as usize]) {
            (Some(a), Some(b)) => !Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn start_marker(&self) -> &PixelSurface {
        &self.start_marker
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn cell_size(&self) -> u32 {
        CELL_SIZE
    }
}

fn cook(entry: &TileEntry, cells: &[PixelSurface], font: &FontGlyphs) -> Result<PixelSurface, AssetError> {
    let bitmap = match entry.recipe {
        TileRecipe::Blank => PixelSurface::new(CELL_SIZE, CELL_SIZE),
        TileRecipe::Cell { cell, shift } => cells[cell].shifted(shift),
        TileRecipe::Labeled { cell, shift, glyph, offset: (x, y) } => {
            let label = font
                .get(glyph)
                .ok_or(AssetError::UnknownGlyph { tag: entry.tag, glyph })?;
            let mut bitmap = cells[cell].shifted(shift);
            bitmap.draw_composited(label, x, y);
            bitmap
        }
    };
    Ok(bitmap)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
