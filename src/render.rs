// ── Layout rasterisation ──────────────────────────────────────────────────────
//
// Walks any `TileSource`, looks each tag up in the catalog and overlays the
// bitmap at its cell position.  Tags the catalog doesn't know are skipped, so
// layouts using tags from another game revision still render.

use image::RgbaImage;
use tracing::debug;

use crate::catalog::SpriteCatalog;
use crate::config::RenderConfig;
use crate::layout::{StartPosition, TileSource};
use crate::surface::PixelSurface;

/// Sources wider or taller than this many cells are rendered cropped.
pub const MAX_RENDER_CELLS: usize = 1024;

/// Renders tile grids against a borrowed, read-only [`SpriteCatalog`].
#[derive(Clone, Debug)]
pub struct LayoutRenderer<'a> {
    catalog: &'a SpriteCatalog,
    config: RenderConfig,
}

impl<'a> LayoutRenderer<'a> {
    pub fn new(catalog: &'a SpriteCatalog) -> Self {
        Self::with_config(catalog, RenderConfig::default())
    }

    pub fn with_config(catalog: &'a SpriteCatalog, config: RenderConfig) -> Self {
        Self { catalog, config }
    }

    /// Composite `source` into a fresh `(width × 24) × (height × 24)` surface.
    ///
    /// `show_labels` picks the numbered or plain wall bitmaps.  If the source
    /// carries a start position the marker is drawn last, centred on it.
    /// Each dimension is capped at [`MAX_RENDER_CELLS`].
    pub fn render<S: TileSource + ?Sized>(&self, source: &S, show_labels: bool) -> PixelSurface {
        let cell = self.catalog.cell_size();
        let cols = source.width().min(MAX_RENDER_CELLS);
        let rows = source.height().min(MAX_RENDER_CELLS);
        if (cols, rows) != (source.width(), source.height()) {
            debug!(
                "render: {}x{} source cropped to {cols}x{rows} cells",
                source.width(),
                source.height()
            );
        }
        let mut canvas = PixelSurface::new(cols as u32 * cell, rows as u32 * cell);

        let mut unknown = 0usize;
        for y in 0..rows {
            for x in 0..cols {
                let tag = match source.tag_at(x, y) {
                    Some(tag) if tag != 0 => tag,
                    _ => continue,
                };
                let Some(bitmap) = self.catalog.get(tag, show_labels) else {
                    unknown += 1;
                    continue;
                };
                canvas.draw_composited(bitmap, (x as u32 * cell) as i32, (y as u32 * cell) as i32);
            }
        }
        if unknown > 0 {
            debug!("render: skipped {unknown} cells with unknown tags");
        }

        if let Some(start) = source.start_position() {
            let (x, y) = self.start_marker_offset(start);
            canvas.draw_composited(self.catalog.start_marker(), x, y);
        }
        canvas
    }

    /// [`render`](Self::render) resolved through the catalog palette.
    pub fn render_rgba<S: TileSource + ?Sized>(&self, source: &S, show_labels: bool) -> RgbaImage {
        self.render(source, show_labels).to_rgba(self.catalog.palette())
    }

    /// Canvas position of the marker's top-left corner for `start`.
    ///
    /// Saturates at the `i32` range, which is far off any canvas.
    pub fn start_marker_offset(&self, start: StartPosition) -> (i32, i32) {
        let marker = self.catalog.start_marker();
        (
            marker_axis(start.x, self.config.origin_x, marker.width()),
            marker_axis(start.y, self.config.origin_y, marker.height()),
        )
    }
}

fn marker_axis(coord: u16, origin: i32, size: u32) -> i32 {
    let offset = i64::from(coord) - i64::from(origin) - i64::from(size / 2);
    offset.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
