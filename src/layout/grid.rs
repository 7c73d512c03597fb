//! Pure grid and crop arithmetic. No pixels touched here.

use super::spec::{Orientation, PrintLayoutSpec};

/// Fraction of the excess height cropped from the top when a source is
/// taller than its cell. 20% instead of a centered 50% keeps a head near
/// the top of a portrait inside the frame.
pub const HEADROOM_BIAS: f32 = 0.2;

/// Pixel-space layout grid derived from a [`PrintLayoutSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub page_width: u32,
    pub page_height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub margin: u32,
    pub spacing: u32,
}

impl Grid {
    /// Grid capacity; zero for a degenerate (unit larger than page) grid.
    pub fn capacity(&self) -> u32 {
        self.rows * self.columns
    }

    /// How many copies actually fit.
    pub fn placed_copies(&self, requested: u32) -> u32 {
        requested.min(self.capacity())
    }

    /// Top-left pixel of the cell holding `copy_index`, row-major
    /// (row outer, column inner).
    pub fn cell_origin(&self, copy_index: u32) -> (u32, u32) {
        let row = copy_index / self.columns;
        let col = copy_index % self.columns;
        (
            self.margin + col * (self.cell_width + self.spacing),
            self.margin + row * (self.cell_height + self.spacing),
        )
    }
}

/// Derive the pixel grid for a layout spec.
///
/// A portrait-authored page rendered landscape swaps its dimensions.
/// Grid dimensions use floor division — partial cells don't print.
///
/// ```
/// # use photoid::layout::{grid, PrintLayoutSpec};
/// // 4x6" at 300 DPI, 1.38x1.77" unit, 0.1" margin:
/// let g = grid::compute_grid(&PrintLayoutSpec::default());
/// assert_eq!(g.columns, 2); // floor((1200 - 60) / 414)
/// assert_eq!(g.rows, 3);    // floor((1800 - 60) / 531)
/// ```
pub fn compute_grid(spec: &PrintLayoutSpec) -> Grid {
    let dpi = spec.dpi as f32;
    let (mut page_w, mut page_h) = (spec.page_width, spec.page_height);
    if spec.orientation == Orientation::Landscape && page_w < page_h {
        std::mem::swap(&mut page_w, &mut page_h);
    }

    let page_width = (page_w * dpi).round() as u32;
    let page_height = (page_h * dpi).round() as u32;
    let cell_width = (spec.unit_width * dpi).round() as u32;
    let cell_height = (spec.unit_height * dpi).round() as u32;
    let margin = (spec.margin * dpi).round() as u32;
    let spacing = (spec.spacing * dpi).round() as u32;

    let usable_w = page_width.saturating_sub(2 * margin);
    let usable_h = page_height.saturating_sub(2 * margin);
    let columns = if cell_width == 0 {
        0
    } else {
        (usable_w + spacing) / (cell_width + spacing)
    };
    let rows = if cell_height == 0 {
        0
    } else {
        (usable_h + spacing) / (cell_height + spacing)
    };

    Grid {
        page_width,
        page_height,
        cell_width,
        cell_height,
        columns,
        rows,
        margin,
        spacing,
    }
}

/// A source-space crop window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Cover-fit crop: the largest window of the source matching the cell's
/// aspect ratio.
///
/// A source wider than the cell is cropped symmetrically at the sides. A
/// taller source is cropped top and bottom, but the window sits at
/// [`HEADROOM_BIAS`] of the excess from the top rather than centered.
///
/// ```
/// # use photoid::layout::grid::cover_fit_crop;
/// // 4:3 source into a square cell crops 50px off each side:
/// let w = cover_fit_crop(400, 300, 300, 300);
/// assert_eq!((w.x, w.y, w.width, w.height), (50, 0, 300, 300));
/// ```
pub fn cover_fit_crop(source_w: u32, source_h: u32, cell_w: u32, cell_h: u32) -> CropWindow {
    let source_aspect = source_w as f32 / source_h as f32;
    let cell_aspect = cell_w as f32 / cell_h as f32;

    if source_aspect > cell_aspect {
        // Wider than the cell: full height, centered horizontal window.
        let width = (source_h as f32 * cell_aspect).round() as u32;
        let width = width.min(source_w);
        CropWindow {
            x: (source_w - width) / 2,
            y: 0,
            width,
            height: source_h,
        }
    } else if source_aspect < cell_aspect {
        // Taller than the cell: full width, window biased toward the top.
        let height = (source_w as f32 / cell_aspect).round() as u32;
        let height = height.min(source_h);
        CropWindow {
            x: 0,
            y: ((source_h - height) as f32 * HEADROOM_BIAS).round() as u32,
            width: source_w,
            height,
        }
    } else {
        CropWindow {
            x: 0,
            y: 0,
            width: source_w,
            height: source_h,
        }
    }
}
