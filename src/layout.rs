// ── Special Stage layout data ─────────────────────────────────────────────────
//
// A stage is a fixed 64 × 64 grid of 8-bit tile tags stored on disk as 4096
// bytes, row-major (index = y * 64 + x).  Tag 0 is an empty cell.  A layout
// may carry the player's start position, which lives in level-absolute pixel
// space rather than grid space.

use crate::error::LayoutError;

/// Grid width and height in cells.
pub const LAYOUT_SIZE: usize = 0x40;
/// Total number of cells, and the exact length of a serialized layout.
pub const LAYOUT_BYTES: usize = LAYOUT_SIZE * LAYOUT_SIZE;
/// Length of a serialized start position record.
pub const START_POSITION_BYTES: usize = 4;

// ── TileSource ────────────────────────────────────────────────────────────────

/// Read-only view of a rectangular grid of tile tags.
///
/// `tag_at` returns `None` for "no tile present".  Renderers treat `None`
/// and `Some(0)` identically.
pub trait TileSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn tag_at(&self, x: usize, y: usize) -> Option<u8>;

    /// Level-absolute start coordinate to draw over the grid, if any.
    fn start_position(&self) -> Option<StartPosition> {
        None
    }
}

// ── StartPosition ─────────────────────────────────────────────────────────────

/// Player start coordinate in level-absolute pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StartPosition {
    pub x: u16,
    pub y: u16,
}

impl StartPosition {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Decode a big-endian `(x, y)` pair.  Bytes past the first four are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LayoutError> {
        let Some(&[x0, x1, y0, y1]) = bytes.first_chunk::<START_POSITION_BYTES>() else {
            return Err(LayoutError::InvalidStartPosition {
                expected: START_POSITION_BYTES,
                actual: bytes.len(),
            });
        };
        Ok(Self {
            x: u16::from_be_bytes([x0, x1]),
            y: u16::from_be_bytes([y0, y1]),
        })
    }

    pub fn to_bytes(&self) -> [u8; START_POSITION_BYTES] {
        let [x0, x1] = self.x.to_be_bytes();
        let [y0, y1] = self.y.to_be_bytes();
        [x0, x1, y0, y1]
    }
}

// ── LayoutGrid ────────────────────────────────────────────────────────────────

/// A full 64 × 64 stage layout plus optional start position.
///
/// `Clone` is a deep copy: the clone shares nothing with the original.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutGrid {
    /// Row-major tags, identical to the serialized byte order.
    tiles: Box<[u8; LAYOUT_BYTES]>,
    start_position: Option<StartPosition>,
}

impl LayoutGrid {
    /// Empty layout: every cell is tag 0 and there is no start position.
    pub fn new() -> Self {
        Self {
            tiles: Box::new([0; LAYOUT_BYTES]),
            start_position: None,
        }
    }

    /// Parse a serialized layout.
    ///
    /// Fails with [`LayoutError::MissingLayout`] when `layout` is `None` and
    /// with [`LayoutError::InvalidLength`] unless it is exactly 4096 bytes.
    pub fn parse(layout: Option<&[u8]>) -> Result<Self, LayoutError> {
        let bytes = layout.ok_or(LayoutError::MissingLayout)?;
        let tiles: [u8; LAYOUT_BYTES] =
            bytes.try_into().map_err(|_| LayoutError::InvalidLength {
                expected: LAYOUT_BYTES,
                actual: bytes.len(),
            })?;
        Ok(Self {
            tiles: Box::new(tiles),
            start_position: None,
        })
    }

    /// Parse a serialized layout together with its start position record.
    ///
    /// The layout buffer is validated first; a missing position buffer then
    /// fails with [`LayoutError::MissingStartPosition`].
    pub fn parse_with_start(
        layout: Option<&[u8]>,
        start: Option<&[u8]>,
    ) -> Result<Self, LayoutError> {
        let mut grid = Self::parse(layout)?;
        let start = start.ok_or(LayoutError::MissingStartPosition)?;
        grid.start_position = Some(StartPosition::from_bytes(start)?);
        Ok(grid)
    }

    pub fn from_bytes(layout: &[u8]) -> Result<Self, LayoutError> {
        Self::parse(Some(layout))
    }

    /// Serialize to exactly 4096 bytes in row-major order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.tiles.to_vec()
    }

    /// Row-major tag slice.
    pub fn tiles(&self) -> &[u8] {
        &self.tiles[..]
    }

    /// Iterate rows top to bottom, each a 64-tag slice.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.tiles.chunks_exact(LAYOUT_SIZE)
    }

    /// Tag at `(x, y)`, `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        (x < LAYOUT_SIZE && y < LAYOUT_SIZE).then(|| self.tiles[y * LAYOUT_SIZE + x])
    }

    /// Set the tag at `(x, y)`.  Returns `false` outside the grid.
    pub fn set(&mut self, x: usize, y: usize, tag: u8) -> bool {
        if x >= LAYOUT_SIZE || y >= LAYOUT_SIZE {
            return false;
        }
        self.tiles[y * LAYOUT_SIZE + x] = tag;
        true
    }

    pub fn start_position(&self) -> Option<StartPosition> {
        self.start_position
    }

    pub fn set_start_position(&mut self, start: Option<StartPosition>) {
        self.start_position = start;
    }
}

impl Default for LayoutGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&[u8]> for LayoutGrid {
    type Error = LayoutError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl TileSource for LayoutGrid {
    fn width(&self) -> usize {
        LAYOUT_SIZE
    }

    fn height(&self) -> usize {
        LAYOUT_SIZE
    }

    fn tag_at(&self, x: usize, y: usize) -> Option<u8> {
        self.get(x, y)
    }

    fn start_position(&self) -> Option<StartPosition> {
        self.start_position
    }
}

// ── TileSelection ─────────────────────────────────────────────────────────────

/// A rectangular block of optional tags, as produced by an editor selection.
///
/// `None` cells mean "no tile present" and are skipped when the selection is
/// stamped back onto a layout.  A selection is never larger than the layout
/// it comes from: both sides are capped at [`LAYOUT_SIZE`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileSelection {
    width: usize,
    height: usize,
    cells: Vec<Option<u8>>,
}

impl TileSelection {
    /// Selection of `width × height` cells, all `None`.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.min(LAYOUT_SIZE);
        let height = height.min(LAYOUT_SIZE);
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Copy a region of `grid`.  Cells outside the grid become `None`.
    pub fn copy_from(grid: &LayoutGrid, x: usize, y: usize, width: usize, height: usize) -> Self {
        let mut sel = Self::new(width, height);
        for dy in 0..sel.height {
            for dx in 0..sel.width {
                sel.cells[dy * sel.width + dx] = grid.get(x.saturating_add(dx), y.saturating_add(dy));
            }
        }
        sel
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    /// Set or clear a cell.  Returns `false` outside the selection.
    pub fn set(&mut self, x: usize, y: usize, tag: Option<u8>) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y * self.width + x] = tag;
        true
    }

    /// Stamp every `Some` cell onto `grid` with the selection's top-left at
    /// `(x, y)`.  Cells landing outside the grid are dropped.
    pub fn apply_to(&self, grid: &mut LayoutGrid, x: usize, y: usize) {
        for dy in 0..self.height {
            for dx in 0..self.width {
                if let Some(tag) = self.cells[dy * self.width + dx] {
                    grid.set(x.saturating_add(dx), y.saturating_add(dy), tag);
                }
            }
        }
    }
}

impl TileSource for TileSelection {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn tag_at(&self, x: usize, y: usize) -> Option<u8> {
        self.get(x, y)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
