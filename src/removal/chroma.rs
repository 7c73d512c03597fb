//! Local background removal by corner-color estimation.
//!
//! The degraded-mode fallback when no remote provider path exists: sample
//! the four corner pixels (almost always background in an ID photo),
//! average them, and knock out every pixel within a fixed RGB distance of
//! that average. Deterministic, offline, and it cannot fail — the only
//! thing it can be is wrong, which is the accepted trade for a photo
//! pipeline that still works without network or credits.

use crate::bitmap::{Bitmap, Rgba};

/// Euclidean RGB distance below which a pixel counts as background.
const BACKGROUND_DISTANCE: f32 = 30.0;

/// Average color of the four corner pixels.
///
/// # Panics
/// Panics on an empty (zero-sized) bitmap.
pub fn estimate_background_color(image: &Bitmap) -> Rgba {
    let w = image.width();
    let h = image.height();
    let corners = [
        image.get(0, 0),
        image.get(w - 1, 0),
        image.get(0, h - 1),
        image.get(w - 1, h - 1),
    ];

    let mut sum = [0u32; 3];
    for corner in &corners {
        for c in 0..3 {
            sum[c] += corner[c] as u32;
        }
    }
    [
        (sum[0] / 4) as u8,
        (sum[1] / 4) as u8,
        (sum[2] / 4) as u8,
        255,
    ]
}

/// Zero the alpha of every pixel close to the estimated background color.
pub fn remove_background_by_color(image: &Bitmap) -> Bitmap {
    if image.width() == 0 || image.height() == 0 {
        return image.clone();
    }

    let background = estimate_background_color(image);
    let mut out = image.clone();
    let threshold_sq = BACKGROUND_DISTANCE * BACKGROUND_DISTANCE;

    for px in out.pixels_mut().chunks_exact_mut(4) {
        let dr = px[0] as f32 - background[0] as f32;
        let dg = px[1] as f32 - background[1] as f32;
        let db = px[2] as f32 - background[2] as f32;
        if dr * dr + dg * dg + db * db < threshold_sq {
            px[3] = 0;
        }
    }
    out
}
