use std::io::Cursor;

use image::RgbaImage;

use crate::error::AssetError;
use crate::palette::Palette;

// ── PixelSurface ──────────────────────────────────────────────────────────────

/// An 8-bit indexed bitmap.
///
/// Pixels are palette indices stored row-major.  Index 0 is the alpha key:
/// [`draw_composited`](Self::draw_composited) never copies it, and
/// [`increment_indexes`](Self::increment_indexes) never shifts it.
///
/// `Clone` produces a fully independent copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelSurface {
    /// Blank `width × height` surface, every pixel index 0.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major index buffer.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, AssetError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(AssetError::PixelCount { expected, actual: pixels.len() });
        }
        Ok(Self { width, height, pixels })
    }

    /// Decode a palettised PNG, keeping the raw palette indices.
    ///
    /// Indexed and grayscale images of 1, 2, 4 or 8 bits per pixel are
    /// accepted; sub-byte depths are unpacked to one index per pixel.  The
    /// PNG's own palette is ignored, colours come from the catalog palette.
    pub fn from_png(bytes: &[u8]) -> Result<Self, AssetError> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::IDENTITY);
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;

        match info.color_type {
            png::ColorType::Indexed | png::ColorType::Grayscale => {}
            other => {
                return Err(AssetError::UnsupportedFormat(format!(
                    "colour type {other:?}, expected an indexed image"
                )));
            }
        }
        let bits = match info.bit_depth {
            png::BitDepth::One => 1,
            png::BitDepth::Two => 2,
            png::BitDepth::Four => 4,
            png::BitDepth::Eight => 8,
            png::BitDepth::Sixteen => {
                return Err(AssetError::UnsupportedFormat("16-bit samples".into()));
            }
        };

        let (width, height) = (info.width, info.height);
        let per_byte = 8 / bits;
        let mask = ((1u16 << bits) - 1) as u8;
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in buf.chunks(info.line_size).take(height as usize) {
            for x in 0..width as usize {
                let byte = row[x / per_byte];
                let shift = 8 - bits * (x % per_byte + 1);
                pixels.push((byte >> shift) & mask);
            }
        }
        Self::from_pixels(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major palette indices.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Index at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        (x < self.width && y < self.height).then(|| self.pixels[self.offset(x, y)])
    }

    /// Write one pixel.  Returns `false` (and does nothing) outside the surface.
    pub fn set_pixel(&mut self, x: u32, y: u32, index: u8) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = self.offset(x, y);
        self.pixels[i] = index;
        true
    }

    /// `true` when every pixel is index 0.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == 0)
    }

    /// Copy the `width × height` rectangle at `(x, y)` into a new surface.
    ///
    /// Parts of the rectangle that fall outside this surface read as index 0.
    pub fn section(&self, x: u32, y: u32, width: u32, height: u32) -> Self {
        let mut out = Self::new(width, height);
        for dy in 0..height {
            let sy = y.saturating_add(dy);
            if sy >= self.height {
                break;
            }
            let sx_end = x.saturating_add(width).min(self.width);
            if x >= sx_end {
                break;
            }
            let src = self.offset(x, sy);
            let len = (sx_end - x) as usize;
            let dst = out.offset(0, dy);
            out.pixels[dst..dst + len].copy_from_slice(&self.pixels[src..src + len]);
        }
        out
    }

    /// Add `amount` to every non-zero index, wrapping at 256.
    ///
    /// Used to select another palette line for the same artwork.
    pub fn increment_indexes(&mut self, amount: u8) {
        for p in self.pixels.iter_mut().filter(|p| **p != 0) {
            *p = p.wrapping_add(amount);
        }
    }

    /// Copy of this surface with [`increment_indexes`](Self::increment_indexes) applied.
    pub fn shifted(&self, amount: u8) -> Self {
        let mut out = self.clone();
        out.increment_indexes(amount);
        out
    }

    /// Alpha-key overlay of `src` with its top-left corner at `(x, y)`.
    ///
    /// Source pixels with index 0 leave the destination untouched.  Offsets may
    /// be negative or push `src` past the right/bottom edges; only the
    /// overlapping region is drawn.
    pub fn draw_composited(&mut self, src: &PixelSurface, x: i32, y: i32) {
        // Clip the source rectangle against the destination in i64 so extreme
        // offsets cannot overflow.
        let (x, y) = (x as i64, y as i64);
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + src.width as i64).min(self.width as i64);
        let y1 = (y + src.height as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for dy in y0..y1 {
            let src_row = src.offset((x0 - x) as u32, (dy - y) as u32);
            let dst_row = self.offset(x0 as u32, dy as u32);
            let len = (x1 - x0) as usize;
            let src_px = &src.pixels[src_row..src_row + len];
            let dst_px = &mut self.pixels[dst_row..dst_row + len];
            for (d, &s) in dst_px.iter_mut().zip(src_px) {
                if s != 0 {
                    *d = s;
                }
            }
        }
    }

    /// Resolve indices through `palette` into an RGBA image.
    pub fn to_rgba(&self, palette: &Palette) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            palette.color(self.pixels[self.offset(x, y)])
        })
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
