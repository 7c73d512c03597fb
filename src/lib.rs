//! # Photoid
//!
//! An ID/passport photo processing pipeline. Everything runs against
//! in-memory RGBA buffers: no server-side pixel work, no persistence, no
//! temp files. The host application supplies a decoded photo and drives
//! the tools; this crate owns the pixel math and the provider plumbing.
//!
//! # Architecture: One Image Flowing Through Tools
//!
//! ```text
//! decode  →  [ background removal | sizing | adjustments (preview ⇄ commit) ]  →  layout  →  export
//!                        user-directed, each tool yields a NEW bitmap
//! ```
//!
//! The central invariant: **stages never mutate a shared buffer**. Every
//! tool reads one [`Bitmap`] and produces a fresh one, so a preview render
//! racing a commit can never corrupt the committed image. The
//! [`EditSession`](preview::EditSession) holds the committed bitmap and a
//! transient preview; a tool's output only replaces the committed state
//! when the caller commits it, and failures leave the session untouched.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`bitmap`] | RGBA pixel buffer: decode/encode, pixel access, region draw, rotate/flip/flatten |
//! | [`adjust`] | The eight-slider parameter set and the two-pass adjustment renderer |
//! | [`preview`] | Coalescing preview scheduler + edit session (commit/cancel lifecycle) |
//! | [`removal`] | Remote segmentation providers, rotation registry, fallback chroma key |
//! | [`sizing`] | Standard ID photo dimensions and exact resampling |
//! | [`layout`] | Print sheet tiling: grid math, cover-fit cropping, cut lines |
//! | [`export`] | PNG/JPEG bytes and fixed-physical-size PDF documents |
//! | [`config`] | Provider configuration (`providers.toml`) |
//!
//! # Design Decisions
//!
//! ## Sequential Provider Fallback
//!
//! Background removal tries remote providers one at a time, never
//! concurrently — racing providers would double-bill quota on every
//! photo. The registry remembers which provider last succeeded and starts
//! there next time, so a provider with exhausted credits stops being the
//! first thing every photo waits on. When every remote path fails there
//! is a deterministic local fallback (corner-color chroma key) that
//! cannot fail and needs no network.
//!
//! ## Tick-Driven Preview
//!
//! Slider drags produce dozens of parameter changes per second; rendering
//! each would melt the UI. [`PreviewScheduler`](preview::PreviewScheduler)
//! coalesces them: `schedule` replaces whatever was pending, and the host
//! pumps `tick` once per frame, which renders at most once per frame
//! interval. Last write wins — stale renders are never queued.
//!
//! ## Pure Math Separated From Pixels
//!
//! Grid arithmetic and crop windows ([`layout::grid`]) are pure functions
//! over numbers, unit-tested without touching an image. The rasterizer
//! ([`layout::render_layout`]) is a thin consumer of those results. The
//! same split applies to adjustment parameters vs the renderer.

pub mod adjust;
pub mod bitmap;
pub mod config;
pub mod export;
pub mod layout;
pub mod preview;
pub mod removal;
pub mod sizing;

pub use adjust::{render, AdjustmentParams};
pub use bitmap::{Bitmap, BitmapError, Rgba};
pub use layout::{render_layout, Orientation, PrintLayoutSpec};
pub use preview::{EditSession, PreviewScheduler};
pub use removal::{
    remove_background, remove_background_by_color, BackgroundProvider, ProviderRegistry,
    RemovalError, RemovalOutcome,
};
