// ── Tile recipe table ─────────────────────────────────────────────────────────
//
// The Special Stage assigns fixed meanings to tag IDs.  Rather than encoding
// that assignment in control flow, each tag gets an explicit `TileEntry` that
// says which sprite-sheet cell it is cut from, which palette line it uses and
// whether a font glyph is stamped on top.

use crate::palette::PALETTE_LINE;

/// Number of palette-line variants for walls, diamonds and emeralds.
pub const PALETTE_VARIANTS: u8 = 4;
/// Numbered copies per wall variant (digits 1..=8).
pub const WALL_LABELS: u8 = 8;
/// Where a digit is stamped on a wall cell.
pub const WALL_LABEL_OFFSET: (i32, i32) = (16, 16);
/// Where the wide glyph is stamped on the barrier cell.
pub const WIDE_LABEL_OFFSET: (i32, i32) = (4, 8);
/// Tag of the labelled barrier.
pub const LABELED_BARRIER_TAG: u8 = 0x4A;

/// A glyph cut from the font sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    /// 8 × 8 digit `0..=9`.
    Digit(u8),
    /// The trailing 16 × 8 two-character glyph.
    Wide,
}

/// How to produce one catalog bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileRecipe {
    /// Empty cell-sized bitmap.
    Blank,
    /// Sheet cell `cell` with every non-zero index shifted by `shift`.
    Cell { cell: usize, shift: u8 },
    /// A `Cell` with `glyph` composited at `offset`.
    Labeled {
        cell: usize,
        shift: u8,
        glyph: Glyph,
        offset: (i32, i32),
    },
}

impl TileRecipe {
    /// Sprite-sheet cell this recipe reads, if any.
    pub fn cell(&self) -> Option<usize> {
        match *self {
            TileRecipe::Blank => None,
            TileRecipe::Cell { cell, .. } | TileRecipe::Labeled { cell, .. } => Some(cell),
        }
    }
}

/// One row of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileEntry {
    pub tag: u8,
    pub recipe: TileRecipe,
    /// For numbered walls: the tag whose bitmap replaces this one when labels
    /// are hidden.
    pub unlabeled: Option<u8>,
}

// ── TileTable ─────────────────────────────────────────────────────────────────

/// Ordered list of tag recipes.
///
/// Entries are appended with an auto-incrementing tag cursor; `skip` leaves
/// reserved tags absent and `insert_at` places an entry at a fixed tag without
/// moving the cursor.  Once the cursor passes tag 255 further pushes are
/// dropped and counted, never wrapped onto an existing tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileTable {
    entries: Vec<TileEntry>,
    next_tag: u16,
    dropped: usize,
}

impl TileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The Sonic 1 Special Stage tag assignment.
    ///
    /// | tags      | contents                                                   |
    /// |-----------|------------------------------------------------------------|
    /// | 0         | blank                                                      |
    /// | 1..=36    | walls: 4 palette lines × (base + digits 1..=8)             |
    /// | 37..=42   | bumper, W, GOAL, 1UP, UP, DOWN (cells 1..=6)               |
    /// | 43        | R block (cell 7, line 1)                                   |
    /// | 44        | red/white block (cell 8)                                   |
    /// | 45..=48   | diamonds (cell 9, lines 0..=3)                             |
    /// | 49..=51   | reserved, absent                                           |
    /// | 52..=57   | ZONE 1..6 blocks (cells 10..=15)                           |
    /// | 58        | ring (cell 16, line 1)                                     |
    /// | 59..=62   | emeralds (cell 19, lines 0..=3)                            |
    /// | 63, 64    | red and gray emeralds (cells 17, 18)                       |
    /// | 65        | pass-through barrier (cell 20)                             |
    /// | 0x4A      | barrier with the wide glyph                                |
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.push(TileRecipe::Blank);

        for variant in 0..PALETTE_VARIANTS {
            let shift = variant * PALETTE_LINE;
            let Some(base) = table.push(TileRecipe::Cell { cell: 0, shift }) else {
                continue;
            };
            for digit in 1..=WALL_LABELS {
                table.push_unlabeled(
                    TileRecipe::Labeled {
                        cell: 0,
                        shift,
                        glyph: Glyph::Digit(digit),
                        offset: WALL_LABEL_OFFSET,
                    },
                    base,
                );
            }
        }

        for cell in 1..=6 {
            table.push(TileRecipe::Cell { cell, shift: 0 });
        }

        table.push(TileRecipe::Cell { cell: 7, shift: PALETTE_LINE });
        table.push(TileRecipe::Cell { cell: 8, shift: 0 });
        table.push_variants(9);
        table.skip(3);
        for cell in 10..=15 {
            table.push(TileRecipe::Cell { cell, shift: 0 });
        }
        table.push(TileRecipe::Cell { cell: 16, shift: PALETTE_LINE });
        table.push_variants(19);
        table.push(TileRecipe::Cell { cell: 17, shift: 0 });
        table.push(TileRecipe::Cell { cell: 18, shift: 0 });
        table.push(TileRecipe::Cell { cell: 20, shift: 0 });

        table.insert_at(
            LABELED_BARRIER_TAG,
            TileRecipe::Labeled {
                cell: 20,
                shift: 0,
                glyph: Glyph::Wide,
                offset: WIDE_LABEL_OFFSET,
            },
        );
        table
    }

    /// Append at the cursor and return the tag used, `None` once tags run out.
    pub fn push(&mut self, recipe: TileRecipe) -> Option<u8> {
        self.push_entry(recipe, None)
    }

    /// Append a labelled entry that falls back to `unlabeled` when labels are hidden.
    pub fn push_unlabeled(&mut self, recipe: TileRecipe, unlabeled: u8) -> Option<u8> {
        self.push_entry(recipe, Some(unlabeled))
    }

    /// Append one entry per palette line for `cell`, line 0 first.
    pub fn push_variants(&mut self, cell: usize) {
        for variant in 0..PALETTE_VARIANTS {
            self.push(TileRecipe::Cell { cell, shift: variant * PALETTE_LINE });
        }
    }

    /// Leave `count` tags unassigned.
    pub fn skip(&mut self, count: u8) {
        self.next_tag = self.next_tag.saturating_add(count as u16);
    }

    /// Assign `tag` directly, replacing any earlier entry for it.
    pub fn insert_at(&mut self, tag: u8, recipe: TileRecipe) {
        self.entries.retain(|e| e.tag != tag);
        self.entries.push(TileEntry { tag, recipe, unlabeled: None });
    }

    /// Pushes that found no free tag.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn entries(&self) -> &[TileEntry] {
        &self.entries
    }

    pub fn get(&self, tag: u8) -> Option<&TileEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    /// Highest sprite-sheet cell any entry reads.
    pub fn max_cell(&self) -> Option<usize> {
        self.entries.iter().filter_map(|e| e.recipe.cell()).max()
    }

    fn push_entry(&mut self, recipe: TileRecipe, unlabeled: Option<u8>) -> Option<u8> {
        let Ok(tag) = u8::try_from(self.next_tag) else {
            self.dropped += 1;
            return None;
        };
        self.next_tag += 1;
        self.entries.retain(|e| e.tag != tag);
        self.entries.push(TileEntry { tag, recipe, unlabeled });
        Some(tag)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
