#![allow(dead_code)]

use sslayout::catalog::{AtlasSources, CELL_SIZE};
use sslayout::{Palette, PixelSurface};

/// Cells in the synthetic sprite sheet.
pub const CELLS: u32 = 21;
/// Index painted by the wide glyph.
pub const WIDE_INDEX: u8 = 120;
/// Index painted by the start marker.
pub const MARKER_INDEX: u8 = 200;
pub const MARKER_SIZE: u32 = 16;

/// Cell `i` of the synthetic sheet: index `i + 1`, with every third diagonal
/// left transparent.
pub fn cell(i: u32) -> PixelSurface {
    let mut s = PixelSurface::new(CELL_SIZE, CELL_SIZE);
    for y in 0..CELL_SIZE {
        for x in 0..CELL_SIZE {
            if (x + y) % 3 != 0 {
                s.set_pixel(x, y, i as u8 + 1);
            }
        }
    }
    s
}

pub fn sprite_sheet(cells: u32) -> PixelSurface {
    let mut sheet = PixelSurface::new(cells * CELL_SIZE, CELL_SIZE);
    for i in 0..cells {
        sheet.draw_composited(&cell(i), (i * CELL_SIZE) as i32, 0);
    }
    sheet
}

/// Index painted by digit `d`.
pub fn digit_index(d: u8) -> u8 {
    100 + d
}

/// Digit glyphs are checkerboards of `100 + d`; the wide glyph is solid.
pub fn font_sheet() -> PixelSurface {
    let mut font = PixelSurface::new(96, 8);
    for d in 0..10u32 {
        for y in 0..8 {
            for x in 0..8 {
                if (x + y) % 2 == 0 {
                    font.set_pixel(d * 8 + x, y, digit_index(d as u8));
                }
            }
        }
    }
    for y in 0..8 {
        for x in 80..96 {
            font.set_pixel(x, y, WIDE_INDEX);
        }
    }
    font
}

pub fn start_marker() -> PixelSurface {
    PixelSurface::from_pixels(
        MARKER_SIZE,
        MARKER_SIZE,
        vec![MARKER_INDEX; (MARKER_SIZE * MARKER_SIZE) as usize],
    )
    .unwrap()
}

/// 64 Mega Drive colours; colour 0 is white so transparency forcing is visible.
pub fn palette_bytes() -> Vec<u8> {
    let mut bytes = vec![0x0E, 0xEE];
    for i in 1..64u16 {
        bytes.extend_from_slice(&(i & 0x0EEE).to_be_bytes());
    }
    bytes
}

pub fn sources() -> AtlasSources {
    AtlasSources {
        palette: Palette::from_md_bytes(&palette_bytes()).unwrap(),
        sprites: sprite_sheet(CELLS),
        font: font_sheet(),
        start_marker: start_marker(),
    }
}

/// Encode raw samples as a PNG with the given colour type and depth.
pub fn encode_png(
    width: u32,
    height: u32,
    color: png::ColorType,
    depth: png::BitDepth,
    data: &[u8],
) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        if color == png::ColorType::Indexed {
            let entries = match depth {
                png::BitDepth::One => 2,
                png::BitDepth::Two => 4,
                png::BitDepth::Four => 16,
                _ => 256,
            };
            encoder.set_palette(vec![0u8; entries * 3]);
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    out
}

/// 8-bit indexed PNG of `surface`.
pub fn indexed_png(surface: &PixelSurface) -> Vec<u8> {
    encode_png(
        surface.width(),
        surface.height(),
        png::ColorType::Indexed,
        png::BitDepth::Eight,
        surface.pixels(),
    )
}
