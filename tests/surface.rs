mod common;

use image::Rgba;
use sslayout::{AssetError, Palette, PixelSurface};

fn solid(width: u32, height: u32, index: u8) -> PixelSurface {
    PixelSurface::from_pixels(width, height, vec![index; (width * height) as usize]).unwrap()
}

// ── Alpha-key overlay ─────────────────────────────────────────────────────────

#[test]
fn composite_skips_index_zero() {
    let mut dst = solid(4, 1, 5);
    let src = PixelSurface::from_pixels(4, 1, vec![0, 9, 0, 9]).unwrap();
    dst.draw_composited(&src, 0, 0);
    assert_eq!(dst.pixels(), &[5, 9, 5, 9]);
}

#[test]
fn composite_does_not_touch_source() {
    let mut dst = solid(4, 4, 1);
    let src = solid(2, 2, 7);
    let before = src.clone();
    dst.draw_composited(&src, 1, 1);
    assert_eq!(src, before);
}

#[test]
fn composite_clips_negative_offset() {
    let mut dst = PixelSurface::new(4, 4);
    let src = solid(3, 3, 8);
    dst.draw_composited(&src, -2, -1);
    // Only the bottom-right column/rows of the source land on the canvas.
    assert_eq!(dst.pixel(0, 0), Some(8));
    assert_eq!(dst.pixel(0, 1), Some(8));
    assert_eq!(dst.pixel(1, 0), Some(0));
    assert_eq!(dst.pixel(0, 2), Some(0));
    assert_eq!(dst.pixels().iter().filter(|&&p| p != 0).count(), 2);
}

#[test]
fn composite_clips_past_far_edge() {
    let mut dst = PixelSurface::new(4, 4);
    let src = solid(3, 3, 8);
    dst.draw_composited(&src, 3, 2);
    assert_eq!(dst.pixel(3, 2), Some(8));
    assert_eq!(dst.pixel(3, 3), Some(8));
    assert_eq!(dst.pixels().iter().filter(|&&p| p != 0).count(), 2);
}

#[test]
fn composite_fully_outside_is_a_no_op() {
    let mut dst = PixelSurface::new(4, 4);
    let src = solid(3, 3, 8);
    dst.draw_composited(&src, -3, 0);
    dst.draw_composited(&src, 4, 0);
    dst.draw_composited(&src, 0, 100);
    assert!(dst.is_blank());
}

#[test]
fn composite_larger_source_than_destination() {
    let mut dst = PixelSurface::new(2, 2);
    let src = solid(10, 10, 3);
    dst.draw_composited(&src, -4, -4);
    assert_eq!(dst.pixels(), &[3, 3, 3, 3]);
}

// ── Extraction and index shifting ─────────────────────────────────────────────

#[test]
fn section_does_not_share_storage() {
    let src = solid(8, 8, 4);
    let mut sec = src.section(2, 2, 4, 4);
    sec.set_pixel(0, 0, 99);
    sec.increment_indexes(16);
    assert!(src.pixels().iter().all(|&p| p == 4));
}

#[test]
fn clone_does_not_share_storage() {
    let src = solid(2, 2, 4);
    let mut copy = src.clone();
    copy.set_pixel(1, 1, 0);
    assert_eq!(src.pixel(1, 1), Some(4));
}

#[test]
fn increment_keeps_zero_transparent() {
    let mut s = PixelSurface::from_pixels(3, 1, vec![0, 1, 15]).unwrap();
    s.increment_indexes(32);
    assert_eq!(s.pixels(), &[0, 33, 47]);
}

// ── PNG decoding ──────────────────────────────────────────────────────────────

#[test]
fn decodes_8bit_indexed_png() {
    let original = common::cell(4);
    let decoded = PixelSurface::from_png(&common::indexed_png(&original)).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn decodes_4bit_indexed_png() {
    // Two rows of three pixels: 1 2 3 / 15 0 7, each row padded to a whole byte.
    let data = [0x12, 0x30, 0xF0, 0x70];
    let png = common::encode_png(3, 2, png::ColorType::Indexed, png::BitDepth::Four, &data);
    let s = PixelSurface::from_png(&png).unwrap();
    assert_eq!((s.width(), s.height()), (3, 2));
    assert_eq!(s.pixels(), &[1, 2, 3, 15, 0, 7]);
}

#[test]
fn decodes_1bit_grayscale_png() {
    let data = [0b1010_0000];
    let png = common::encode_png(3, 1, png::ColorType::Grayscale, png::BitDepth::One, &data);
    let s = PixelSurface::from_png(&png).unwrap();
    assert_eq!(s.pixels(), &[1, 0, 1]);
}

#[test]
fn rgb_png_is_unsupported() {
    let data = [0u8; 2 * 2 * 3];
    let png = common::encode_png(2, 2, png::ColorType::Rgb, png::BitDepth::Eight, &data);
    assert!(matches!(
        PixelSurface::from_png(&png),
        Err(AssetError::UnsupportedFormat(_))
    ));
}

#[test]
fn garbage_is_a_decode_error() {
    assert!(matches!(
        PixelSurface::from_png(b"not a png"),
        Err(AssetError::Decode(_))
    ));
}

// ── RGBA export ───────────────────────────────────────────────────────────────

#[test]
fn to_rgba_uses_palette_with_transparent_zero() {
    let palette = Palette::from_md_bytes(&[0x0E, 0xEE, 0x00, 0x0E]).unwrap();
    let s = PixelSurface::from_pixels(2, 1, vec![0, 1]).unwrap();
    let img = s.to_rgba(&palette);
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    assert_eq!(*img.get_pixel(1, 0), Rgba([252, 0, 0, 255]));
}
