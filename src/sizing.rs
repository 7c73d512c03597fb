//! Standardized ID photo dimensions.
//!
//! Resizing to a document size is exact — the target pixel dimensions are
//! what the issuing authority expects at 300 DPI, even when that bends
//! the source aspect (cropping to a matching aspect happens earlier, in
//! the editor). A light
//! unsharp pass follows the resample to restore the crispness Lanczos
//! filtering softens, the same treatment thumbnails traditionally get.

use image::imageops;

use crate::bitmap::Bitmap;

/// A standard ID/passport photo size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePreset {
    pub name: &'static str,
    /// Output width in pixels at `dpi`.
    pub width: u32,
    /// Output height in pixels at `dpi`.
    pub height: u32,
    pub dpi: u32,
}

/// Common document photo sizes, all at print-fidelity 300 DPI.
pub const SIZE_PRESETS: &[SizePreset] = &[
    SizePreset {
        name: "Passport (35x45mm)",
        width: 413,
        height: 531,
        dpi: 300,
    },
    SizePreset {
        name: "2x2 inches",
        width: 600,
        height: 600,
        dpi: 300,
    },
    SizePreset {
        name: "3.5x4.5 cm",
        width: 413,
        height: 531,
        dpi: 300,
    },
    SizePreset {
        name: "5x5 cm",
        width: 591,
        height: 591,
        dpi: 300,
    },
    SizePreset {
        name: "Visa Photo",
        width: 600,
        height: 600,
        dpi: 300,
    },
];

/// Post-resample sharpening: sigma of the unsharp blur and the minimum
/// brightness difference that gets sharpened.
const SHARPEN_SIGMA: f32 = 0.5;
const SHARPEN_THRESHOLD: i32 = 0;

/// Resample to exactly `width` × `height` (Lanczos3) with a light
/// unsharp pass, returning a fresh bitmap.
pub fn resize_exact(image: &Bitmap, width: u32, height: u32) -> Bitmap {
    let resized = image.resized(width, height);
    let sharpened = imageops::unsharpen(&resized.to_image(), SHARPEN_SIGMA, SHARPEN_THRESHOLD);
    Bitmap::from_image(sharpened)
}

/// Resample to a preset's pixel dimensions.
pub fn resize_to_preset(image: &Bitmap, preset: &SizePreset) -> Bitmap {
    resize_exact(image, preset.width, preset.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> Bitmap {
        let mut bmp = Bitmap::new(w, h);
        for y in 0..h {
            for x in 0..w {
                bmp.set(x, y, [(x * 5 % 250) as u8, (y * 9 % 250) as u8, 60, 255]);
            }
        }
        bmp
    }

    #[test]
    fn presets_cover_the_standard_documents() {
        let names: Vec<&str> = SIZE_PRESETS.iter().map(|p| p.name).collect();
        assert!(names.contains(&"Passport (35x45mm)"));
        assert!(names.contains(&"Visa Photo"));
    }

    #[test]
    fn passport_preset_is_413_by_531_at_300dpi() {
        let passport = SIZE_PRESETS[0];
        assert_eq!(passport.width, 413);
        assert_eq!(passport.height, 531);
        assert_eq!(passport.dpi, 300);
    }

    #[test]
    fn every_preset_is_print_resolution() {
        for preset in SIZE_PRESETS {
            assert_eq!(preset.dpi, 300, "{} is not 300 DPI", preset.name);
        }
    }

    #[test]
    fn resize_hits_exact_target_dimensions() {
        let out = resize_exact(&gradient(200, 150), 97, 131);
        assert_eq!(out.width(), 97);
        assert_eq!(out.height(), 131);
    }

    #[test]
    fn resize_to_preset_matches_preset_dimensions() {
        let preset = SIZE_PRESETS[0];
        let out = resize_to_preset(&gradient(800, 1000), &preset);
        assert_eq!(out.width(), preset.width);
        assert_eq!(out.height(), preset.height);
    }

    #[test]
    fn resize_does_not_preserve_aspect() {
        // Exact document dimensions win over the source aspect ratio.
        let out = resize_exact(&gradient(100, 100), 50, 200);
        assert_eq!(out.width(), 50);
        assert_eq!(out.height(), 200);
    }

    #[test]
    fn source_is_untouched() {
        let src = gradient(64, 48);
        let copy = src.clone();
        let _ = resize_exact(&src, 32, 24);
        assert_eq!(src, copy);
    }
}
