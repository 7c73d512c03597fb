//! The adjustment renderer.
//!
//! Two passes over the RGBA plane, both row-parallel:
//!
//! 1. **Color pass** — brightness, contrast, saturation, and hue rotation
//!    composed into one 3×3 matrix plus offset, applied in that fixed
//!    order. Saturation and hue use the standard filter-chain color
//!    matrices, so output matches what the browser compositor produces
//!    for the same slider values.
//! 2. **Pixel pass** — exposure gain (`2^(v/100)`) and the white-balance
//!    gain triplet, multiplied per channel and clamped once per pixel;
//!    then the unsharp-style sharpen kernel, which reads a frozen
//!    snapshot of the buffer so no pixel ever sees a neighbor's already
//!    sharpened value.
//!
//! Either pass is skipped entirely when its sliders are at identity, and
//! alpha passes through untouched everywhere.

use rayon::prelude::*;

use super::AdjustmentParams;
use crate::bitmap::Bitmap;

/// Render `base` with `params` applied, producing a fresh bitmap.
///
/// Deterministic and side-effect free; identity parameters return a
/// pixel-identical copy.
pub fn render(base: &Bitmap, params: &AdjustmentParams) -> Bitmap {
    let params = params.clamped();
    if base.width() == 0 || base.height() == 0 {
        return base.clone();
    }
    let mut out = base.clone();

    if params.needs_color_pass() {
        apply_color_pass(&mut out, &params);
    }
    if params.needs_pixel_pass() {
        apply_exposure_and_balance(&mut out, &params);
    }
    if params.sharpness > 0.0 {
        out = apply_sharpen(&out, params.sharpness);
    }

    out
}

/// Luminance weights shared by the saturation and hue-rotation matrices.
const LUM_R: f32 = 0.213;
const LUM_G: f32 = 0.715;
const LUM_B: f32 = 0.072;

/// Saturation color matrix for factor `s` (1.0 = identity).
fn saturation_matrix(s: f32) -> [[f32; 3]; 3] {
    [
        [LUM_R + (1.0 - LUM_R) * s, LUM_G - LUM_G * s, LUM_B - LUM_B * s],
        [LUM_R - LUM_R * s, LUM_G + (1.0 - LUM_G) * s, LUM_B - LUM_B * s],
        [LUM_R - LUM_R * s, LUM_G - LUM_G * s, LUM_B + (1.0 - LUM_B) * s],
    ]
}

/// Hue-rotation color matrix for `degrees`.
fn hue_matrix(degrees: f32) -> [[f32; 3]; 3] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            LUM_R + cos * (1.0 - LUM_R) - sin * LUM_R,
            LUM_G - cos * LUM_G - sin * LUM_G,
            LUM_B - cos * LUM_B + sin * (1.0 - LUM_B),
        ],
        [
            LUM_R - cos * LUM_R + sin * 0.143,
            LUM_G + cos * (1.0 - LUM_G) + sin * 0.140,
            LUM_B - cos * LUM_B - sin * 0.283,
        ],
        [
            LUM_R - cos * LUM_R - sin * (1.0 - LUM_R),
            LUM_G - cos * LUM_G + sin * LUM_G,
            LUM_B + cos * (1.0 - LUM_B) + sin * LUM_B,
        ],
    ]
}

fn matrix_product(a: [[f32; 3]; 3], b: [[f32; 3]; 3]) -> [[f32; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (row, out_row) in out.iter_mut().enumerate() {
        for (col, cell) in out_row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[row][k] * b[k][col]).sum();
        }
    }
    out
}

/// Brightness → contrast → saturation → hue, fused into `out = M·(k·c) + o`.
///
/// Brightness scales every channel by `k_b`; contrast scales by `k_c`
/// around mid-gray, contributing the constant offset. Both commute
/// through the saturation/hue matrices because those matrices map gray
/// to gray (each row sums to 1), so the offset survives unchanged.
fn apply_color_pass(bitmap: &mut Bitmap, params: &AdjustmentParams) {
    let k_b = (100.0 + params.brightness) / 100.0;
    let k_c = (100.0 + params.contrast) / 100.0;
    let scale = k_b * k_c;
    let offset = 127.5 * (1.0 - k_c);
    let m = matrix_product(
        hue_matrix(params.hue),
        saturation_matrix((100.0 + params.saturation) / 100.0),
    );

    let stride = bitmap.width() as usize * 4;
    bitmap
        .pixels_mut()
        .par_chunks_mut(stride)
        .for_each(|row| {
            for px in row.chunks_exact_mut(4) {
                let r = px[0] as f32 * scale;
                let g = px[1] as f32 * scale;
                let b = px[2] as f32 * scale;
                px[0] = (m[0][0] * r + m[0][1] * g + m[0][2] * b + offset)
                    .round()
                    .clamp(0.0, 255.0) as u8;
                px[1] = (m[1][0] * r + m[1][1] * g + m[1][2] * b + offset)
                    .round()
                    .clamp(0.0, 255.0) as u8;
                px[2] = (m[2][0] * r + m[2][1] * g + m[2][2] * b + offset)
                    .round()
                    .clamp(0.0, 255.0) as u8;
            }
        });
}

/// Exposure gain and white-balance gains, one clamp per pixel.
fn apply_exposure_and_balance(bitmap: &mut Bitmap, params: &AdjustmentParams) {
    let exposure = 2f32.powf(params.exposure / 100.0);
    let temp = params.temperature / 100.0;
    let tint = params.tint / 100.0;
    // Warm raises red and lowers blue; tint trades green against magenta.
    let r_gain = exposure * (1.0 + 0.12 * temp + 0.08 * tint);
    let g_gain = exposure * (1.0 - 0.06 * temp - 0.10 * tint);
    let b_gain = exposure * (1.0 - 0.12 * temp + 0.08 * tint);

    let stride = bitmap.width() as usize * 4;
    bitmap
        .pixels_mut()
        .par_chunks_mut(stride)
        .for_each(|row| {
            for px in row.chunks_exact_mut(4) {
                px[0] = (px[0] as f32 * r_gain).round().clamp(0.0, 255.0) as u8;
                px[1] = (px[1] as f32 * g_gain).round().clamp(0.0, 255.0) as u8;
                px[2] = (px[2] as f32 * b_gain).round().clamp(0.0, 255.0) as u8;
            }
        });
}

/// Unsharp-style kernel: push each channel away from its 4-neighbor
/// average. Neighbors sample the frozen input with replicated borders;
/// output goes to a separate buffer.
fn apply_sharpen(src: &Bitmap, sharpness: f32) -> Bitmap {
    let amount = sharpness / 100.0 * 0.6;
    let w = src.width() as usize;
    let h = src.height() as usize;
    let input = src.pixels();
    let stride = w * 4;

    let mut out = Bitmap::new(src.width(), src.height());
    out.pixels_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            let up = y.saturating_sub(1);
            let down = (y + 1).min(h - 1);
            for x in 0..w {
                let left = x.saturating_sub(1);
                let right = (x + 1).min(w - 1);
                let i = x * 4;
                for c in 0..3 {
                    let center = input[y * stride + i + c] as f32;
                    let avg = (input[y * stride + left * 4 + c] as f32
                        + input[y * stride + right * 4 + c] as f32
                        + input[up * stride + i + c] as f32
                        + input[down * stride + i + c] as f32)
                        / 4.0;
                    row_out[i + c] =
                        (center + (center - avg) * amount).round().clamp(0.0, 255.0) as u8;
                }
                row_out[i + 3] = input[y * stride + i + 3];
            }
        });
    out
}
