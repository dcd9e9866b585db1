// ── Indexed colour palette ────────────────────────────────────────────────────
//
// Every `PixelSurface` stores palette indices, not colours.  A `Palette` maps
// those indices to RGBA for display.  Index 0 is the alpha key: it is always
// fully transparent, whatever the source data says.

use image::Rgba;
use tracing::warn;

use crate::error::AssetError;

/// Number of entries in an 8-bit palette.
pub const PALETTE_SIZE: usize = 256;

/// Number of colours in one Mega Drive palette line.  Index-shifting a bitmap
/// by a multiple of this selects another line with the same shape.
pub const PALETTE_LINE: u8 = 16;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const OPAQUE_BLACK: Rgba<u8> = Rgba([0, 0, 0, 0xFF]);

// ── Palette ───────────────────────────────────────────────────────────────────

/// 256-entry RGBA colour table with a transparent entry 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: [Rgba<u8>; PALETTE_SIZE],
}

impl Palette {
    /// Build a palette from already decoded colours.
    ///
    /// Colours fill the table from index 0 upwards; unfilled entries are opaque
    /// black and anything past 256 colours is dropped.  Entry 0 is then forced
    /// to transparent.
    pub fn from_colors<I>(colors: I) -> Self
    where
        I: IntoIterator<Item = Rgba<u8>>,
    {
        let mut entries = [OPAQUE_BLACK; PALETTE_SIZE];
        let mut count = 0usize;
        for color in colors {
            if count == PALETTE_SIZE {
                warn!("palette: more than {PALETTE_SIZE} colours supplied; extra entries ignored");
                break;
            }
            entries[count] = color;
            count += 1;
        }
        entries[0] = TRANSPARENT;
        Self { entries }
    }

    /// Decode a Mega Drive CRAM dump: big-endian 16-bit words laid out as
    /// `0000 BBB0 GGG0 RRR0`.
    ///
    /// Fails on an odd byte count.  An empty buffer yields an all-black
    /// palette (entry 0 still transparent).
    pub fn from_md_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        if bytes.len() % 2 != 0 {
            return Err(AssetError::InvalidPalette(format!(
                "length {} is not a whole number of 16-bit colours",
                bytes.len()
            )));
        }
        let colors = bytes
            .chunks_exact(2)
            .map(|word| md_color_to_rgba(u16::from_be_bytes([word[0], word[1]])));
        Ok(Self::from_colors(colors))
    }

    /// Colour for `index`.
    pub fn color(&self, index: u8) -> Rgba<u8> {
        self.entries[index as usize]
    }

    /// All 256 entries in index order.
    pub fn entries(&self) -> &[Rgba<u8>; PALETTE_SIZE] {
        &self.entries
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_colors(std::iter::empty())
    }
}

/// Expand one 9-bit Mega Drive colour to 8-bit RGBA.  Each 3-bit channel
/// maps linearly onto 0..=252 in steps of 36.
pub fn md_color_to_rgba(word: u16) -> Rgba<u8> {
    let channel = |shift: u16| (((word >> shift) & 0x0E) as u8) * 0x12;
    Rgba([channel(0), channel(4), channel(8), 0xFF])
}

// ── Tests ─────────────────────────────────────────────────────────────────────
