//! Page rasterizer: turns a unit photo and a layout spec into one
//! print-ready page bitmap.

use super::grid::{compute_grid, cover_fit_crop};
use super::spec::PrintLayoutSpec;
use crate::bitmap::{Bitmap, Rgba};

const PAGE_BACKGROUND: Rgba = [255, 255, 255, 255];
const CUT_LINE_COLOR: Rgba = [255, 0, 0, 255];
const BORDER_COLOR: Rgba = [0, 0, 0, 255];

/// Dash pattern for cut lines: 5 px on, 5 px off, 2 px thick.
const DASH_ON: u32 = 5;
const DASH_PERIOD: u32 = 10;
const CUT_LINE_THICKNESS: u32 = 2;

/// Render the print page: white background, `min(copies, capacity)`
/// cover-fit copies of `unit` in row-major order, optional dashed cut
/// lines per cell, and a solid 1 px border around the page.
///
/// A grid with zero capacity (unit photo larger than the page) renders a
/// valid blank, bordered page — degenerate, not an error.
pub fn render_layout(unit: &Bitmap, spec: &PrintLayoutSpec) -> Bitmap {
    let grid = compute_grid(spec);
    let mut page = Bitmap::filled(grid.page_width, grid.page_height, PAGE_BACKGROUND);

    let placed = if unit.width() == 0 || unit.height() == 0 {
        0
    } else {
        grid.placed_copies(spec.copies)
    };

    if placed > 0 {
        let window = cover_fit_crop(unit.width(), unit.height(), grid.cell_width, grid.cell_height);
        let cell = unit
            .cropped(window.x, window.y, window.width, window.height)
            .resized(grid.cell_width, grid.cell_height);

        for copy in 0..placed {
            let (x, y) = grid.cell_origin(copy);
            page.draw(&cell, x as i64, y as i64);
            if spec.show_cut_lines {
                stroke_dashed_rect(&mut page, x, y, grid.cell_width, grid.cell_height);
            }
        }
    }

    stroke_border(&mut page);
    page
}

/// Dashed rectangle outline, drawn inward from the given bounds.
fn stroke_dashed_rect(page: &mut Bitmap, x: u32, y: u32, w: u32, h: u32) {
    for t in 0..CUT_LINE_THICKNESS.min(h) {
        for dx in 0..w {
            if dx % DASH_PERIOD < DASH_ON {
                put(page, x + dx, y + t, CUT_LINE_COLOR);
                put(page, x + dx, y + h - 1 - t, CUT_LINE_COLOR);
            }
        }
    }
    for t in 0..CUT_LINE_THICKNESS.min(w) {
        for dy in 0..h {
            if dy % DASH_PERIOD < DASH_ON {
                put(page, x + t, y + dy, CUT_LINE_COLOR);
                put(page, x + w - 1 - t, y + dy, CUT_LINE_COLOR);
            }
        }
    }
}

/// Solid 1 px border around the full page.
fn stroke_border(page: &mut Bitmap) {
    let w = page.width();
    let h = page.height();
    if w == 0 || h == 0 {
        return;
    }
    for x in 0..w {
        put(page, x, 0, BORDER_COLOR);
        put(page, x, h - 1, BORDER_COLOR);
    }
    for y in 0..h {
        put(page, 0, y, BORDER_COLOR);
        put(page, w - 1, y, BORDER_COLOR);
    }
}

fn put(page: &mut Bitmap, x: u32, y: u32, color: Rgba) {
    if x < page.width() && y < page.height() {
        page.set(x, y, color);
    }
}
