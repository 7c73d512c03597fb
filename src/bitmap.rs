//! RGBA pixel buffer shared by every pipeline stage.
//!
//! A [`Bitmap`] is a decoded image: width, height, and a row-major RGBA
//! plane (4 bytes per pixel, 0–255). It is immutable by convention — every
//! stage reads one bitmap and returns a fresh one. The transforms here
//! (`rotated`, `flipped_*`, `over_background`, `cropped`, `resized`)
//! follow that rule; the only `&mut` surface is `set`, used while a stage
//! fills the buffer it is about to return.
//!
//! Decoding goes through the `image` crate (JPEG, PNG, WebP). Accepted
//! upload formats beyond that are the host's problem — this crate receives
//! bytes that decode or a bitmap that already did.

use image::imageops::FilterType;
use image::RgbaImage;
use thiserror::Error;

/// One RGBA pixel, channel order R, G, B, A.
pub type Rgba = [u8; 4];

#[derive(Error, Debug)]
pub enum BitmapError {
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("failed to encode image: {0}")]
    Encode(String),
    #[error("pixel buffer is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// A decoded image: RGBA8, row-major, top-left origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Fully transparent bitmap of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Bitmap filled with a single color.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            pixels.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap an existing RGBA plane, validating its length.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BitmapError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(BitmapError::BufferSize {
                width,
                height,
                expected: usize::MAX,
                actual: pixels.len(),
            })?;
        if pixels.len() != expected {
            return Err(BitmapError::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode encoded image bytes (JPEG, PNG, WebP) into a bitmap.
    ///
    /// This is the pipeline's single decode point; everything downstream
    /// works on the RGBA plane.
    pub fn decode(bytes: &[u8]) -> Result<Self, BitmapError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| BitmapError::Decode(e.to_string()))?;
        Ok(Self::from_image(decoded.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGBA plane, row-major, 4 bytes per pixel.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Read one pixel.
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the bitmap.
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        let i = self.index(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Write one pixel.
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the bitmap.
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        let i = self.index(x, y);
        self.pixels[i..i + 4].copy_from_slice(&color);
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Source-over composite `src` onto this bitmap with its top-left
    /// corner at `(x, y)`. Pixels falling outside are clipped.
    pub fn draw(&mut self, src: &Bitmap, x: i64, y: i64) {
        for sy in 0..src.height {
            let dy = y + sy as i64;
            if dy < 0 || dy >= self.height as i64 {
                continue;
            }
            for sx in 0..src.width {
                let dx = x + sx as i64;
                if dx < 0 || dx >= self.width as i64 {
                    continue;
                }
                let p = src.get(sx, sy);
                let composited = blend_over(self.get(dx as u32, dy as u32), p);
                self.set(dx as u32, dy as u32, composited);
            }
        }
    }

    /// Copy of the sub-rectangle `(x, y, w, h)`, clamped to the bitmap.
    pub fn cropped(&self, x: u32, y: u32, w: u32, h: u32) -> Bitmap {
        let w = w.min(self.width.saturating_sub(x));
        let h = h.min(self.height.saturating_sub(y));
        if w == 0 || h == 0 {
            return Bitmap::new(w, h);
        }
        let mut out = Bitmap::new(w, h);
        for row in 0..h {
            let src_start = self.index(x, y + row);
            let dst_start = row as usize * w as usize * 4;
            out.pixels[dst_start..dst_start + w as usize * 4]
                .copy_from_slice(&self.pixels[src_start..src_start + w as usize * 4]);
        }
        out
    }

    /// Resample to exactly `width` × `height` (Lanczos3).
    pub fn resized(&self, width: u32, height: u32) -> Bitmap {
        let resized = image::imageops::resize(&self.to_image(), width, height, FilterType::Lanczos3);
        Self::from_image(resized)
    }

    /// Rotate by `degrees` (clockwise) into a square canvas whose side is
    /// the larger source dimension, so no orientation is clipped. The
    /// uncovered area stays transparent.
    pub fn rotated(&self, degrees: f32) -> Bitmap {
        let side = self.width.max(self.height);
        let mut out = Bitmap::new(side, side);

        let theta = degrees.to_radians();
        let (sin, cos) = theta.sin_cos();
        let cx = side as f32 / 2.0;
        let cy = side as f32 / 2.0;
        let half_w = self.width as f32 / 2.0;
        let half_h = self.height as f32 / 2.0;

        for y in 0..side {
            for x in 0..side {
                // Inverse-rotate the destination pixel back into source space.
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let sx = dx * cos + dy * sin + half_w;
                let sy = -dx * sin + dy * cos + half_h;
                if sx >= 0.0 && sy >= 0.0 && sx < self.width as f32 && sy < self.height as f32 {
                    out.set(x, y, self.get(sx as u32, sy as u32));
                }
            }
        }
        out
    }

    /// Mirror left-to-right.
    pub fn flipped_horizontal(&self) -> Bitmap {
        let mut out = Bitmap::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.set(self.width - 1 - x, y, self.get(x, y));
            }
        }
        out
    }

    /// Mirror top-to-bottom.
    pub fn flipped_vertical(&self) -> Bitmap {
        let mut out = Bitmap::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.set(x, self.height - 1 - y, self.get(x, y));
            }
        }
        out
    }

    /// Flatten onto a solid backdrop: fill with `color`, then composite
    /// this bitmap over it. This is how a removed background becomes a
    /// studio color.
    pub fn over_background(&self, color: Rgba) -> Bitmap {
        let mut out = Bitmap::filled(self.width, self.height, color);
        out.draw(self, 0, 0);
        out
    }

    pub(crate) fn to_image(&self) -> RgbaImage {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .expect("bitmap plane length matches dimensions")
    }

    pub(crate) fn from_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }
}

/// Source-over alpha compositing of `top` onto `bottom`, byte channels.
fn blend_over(bottom: Rgba, top: Rgba) -> Rgba {
    let ta = top[3] as u32;
    if ta == 255 {
        return top;
    }
    if ta == 0 {
        return bottom;
    }
    let ba = bottom[3] as u32;
    let out_a = ta + ba * (255 - ta) / 255;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        let t = top[c] as u32;
        let b = bottom[c] as u32;
        out[c] = ((t * ta * 255 + b * ba * (255 - ta)) / (out_a * 255)) as u8;
    }
    out[3] = out_a as u8;
    out
}
