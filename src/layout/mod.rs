//! Print layout: tiling photo copies onto a printable page.
//!
//! Split the same way as the adjustment module: `spec` describes the
//! page, [`grid`] is pure arithmetic (grid dimensions, cell origins,
//! cover-fit crop windows — all unit-testable without pixels), and
//! `engine` rasterizes the result into one page-sized bitmap.

mod engine;
pub mod grid;
mod spec;

pub use engine::render_layout;
pub use spec::{Orientation, PagePreset, PrintLayoutSpec, PAGE_PRESETS};
