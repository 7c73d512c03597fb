//! Print layout parameters.
//!
//! Physical units throughout — inches for the page, the unit photo, and
//! the margin; `dpi` converts to pixels at render time. 300 DPI is the
//! print-fidelity default everywhere in this crate.

/// Page orientation. A portrait-authored page is swapped to wide when
/// rendered landscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Everything the layout engine needs to tile a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintLayoutSpec {
    /// Page width in inches (as authored; orientation may swap it).
    pub page_width: f32,
    /// Page height in inches.
    pub page_height: f32,
    /// Unit photo width in inches.
    pub unit_width: f32,
    /// Unit photo height in inches.
    pub unit_height: f32,
    /// Requested copy count; actual placement is capped by the grid.
    pub copies: u32,
    pub orientation: Orientation,
    /// Dashed guides around each placed photo for scissor work.
    pub show_cut_lines: bool,
    /// Pixels per inch.
    pub dpi: u32,
    /// Page-edge margin in inches.
    pub margin: f32,
    /// Gap between cells in inches. Zero packs cells edge to edge.
    pub spacing: f32,
}

impl Default for PrintLayoutSpec {
    /// 4×6" page of standard 35×45 mm passport photos.
    fn default() -> Self {
        Self {
            page_width: 4.0,
            page_height: 6.0,
            unit_width: 1.38,
            unit_height: 1.77,
            copies: 6,
            orientation: Orientation::Portrait,
            show_cut_lines: true,
            dpi: 300,
            margin: 0.1,
            spacing: 0.0,
        }
    }
}

impl PrintLayoutSpec {
    /// Spec for a standard page preset, keeping the default unit photo.
    pub fn for_page(preset: &PagePreset) -> Self {
        Self {
            page_width: preset.width,
            page_height: preset.height,
            copies: preset.copies,
            ..Self::default()
        }
    }
}

/// A standard paper size with its usual copy count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePreset {
    pub name: &'static str,
    /// Width in inches.
    pub width: f32,
    /// Height in inches.
    pub height: f32,
    pub copies: u32,
}

pub const PAGE_PRESETS: &[PagePreset] = &[
    PagePreset {
        name: "4x6\" - 6 copies",
        width: 4.0,
        height: 6.0,
        copies: 6,
    },
    PagePreset {
        name: "A4 - 8 copies",
        width: 8.27,
        height: 11.69,
        copies: 8,
    },
    PagePreset {
        name: "5x7\" - 4 copies",
        width: 5.0,
        height: 7.0,
        copies: 4,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_a_passport_sheet() {
        let spec = PrintLayoutSpec::default();
        assert_eq!(spec.page_width, 4.0);
        assert_eq!(spec.page_height, 6.0);
        assert_eq!(spec.unit_width, 1.38);
        assert_eq!(spec.unit_height, 1.77);
        assert_eq!(spec.dpi, 300);
        assert_eq!(spec.margin, 0.1);
        assert_eq!(spec.spacing, 0.0);
        assert!(spec.show_cut_lines);
    }

    #[test]
    fn page_presets_cover_the_standard_papers() {
        assert_eq!(PAGE_PRESETS.len(), 3);
        assert_eq!(PAGE_PRESETS[1].name, "A4 - 8 copies");
        assert_eq!(PAGE_PRESETS[1].copies, 8);
    }

    #[test]
    fn for_page_takes_paper_and_copies_from_preset() {
        let spec = PrintLayoutSpec::for_page(&PAGE_PRESETS[2]);
        assert_eq!(spec.page_width, 5.0);
        assert_eq!(spec.page_height, 7.0);
        assert_eq!(spec.copies, 4);
        // Unit photo stays the passport default.
        assert_eq!(spec.unit_width, 1.38);
    }
}
