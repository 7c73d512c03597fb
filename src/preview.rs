//! Live preview scheduling and the edit session.
//!
//! A slider drag emits a burst of parameter changes. Rendering each one
//! would saturate the frame budget, so [`PreviewScheduler`] coalesces:
//! `schedule` overwrites whatever request was pending (last write wins,
//! nothing queues), and `tick` — pumped by the host once per frame —
//! executes at most one render per frame interval. Ordering is
//! supersede-by-recency, not FIFO: a stale result is simply replaced by
//! the next completed one.
//!
//! [`EditSession`] owns the committed bitmap and the transient preview.
//! Previews never touch the committed image; `commit` bakes the freshest
//! render into a new base and resets the sliders to identity, because the
//! adjustments are now part of the image. Tool results (background
//! removal, sizing, rotate...) enter through [`EditSession::commit_image`]
//! and follow the same rule: the base is only replaced by a successfully
//! produced bitmap.

use std::time::{Duration, Instant};

use crate::adjust::{render, AdjustmentParams};
use crate::bitmap::Bitmap;

/// Target cadence for preview renders — one display frame at 60 Hz.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Coalesces parameter changes into at most one render per frame.
#[derive(Debug)]
pub struct PreviewScheduler {
    pending: Option<AdjustmentParams>,
    frame_interval: Duration,
    last_render: Option<Instant>,
}

impl PreviewScheduler {
    pub fn new() -> Self {
        Self::with_frame_interval(FRAME_INTERVAL)
    }

    /// Scheduler with a custom frame interval. Tests pass
    /// `Duration::ZERO` to make every `tick` eligible to render.
    pub fn with_frame_interval(frame_interval: Duration) -> Self {
        Self {
            pending: None,
            frame_interval,
            last_render: None,
        }
    }

    /// Request a preview for `params`, replacing any not-yet-started
    /// request. Never blocks and never renders by itself.
    pub fn schedule(&mut self, params: AdjustmentParams) {
        self.pending = Some(params);
    }

    /// Discard the pending request, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn take_pending(&mut self) -> Option<AdjustmentParams> {
        self.pending.take()
    }

    /// Run at most one pending render against `base`.
    ///
    /// Returns the rendered preview when a request was pending and the
    /// frame interval has elapsed since the previous render; `None`
    /// otherwise. The request stays pending while throttled.
    pub fn tick(&mut self, base: &Bitmap) -> Option<Bitmap> {
        self.pending.as_ref()?;
        if let Some(last) = self.last_render {
            if last.elapsed() < self.frame_interval {
                return None;
            }
        }
        let params = self.pending.take()?;
        self.last_render = Some(Instant::now());
        Some(render(base, &params))
    }
}

impl Default for PreviewScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// The durable edit state: committed base, transient preview, active
/// sliders.
#[derive(Debug)]
pub struct EditSession {
    base: Bitmap,
    preview: Option<Bitmap>,
    params: AdjustmentParams,
    scheduler: PreviewScheduler,
}

impl EditSession {
    pub fn new(base: Bitmap) -> Self {
        Self::with_scheduler(base, PreviewScheduler::new())
    }

    pub fn with_scheduler(base: Bitmap, scheduler: PreviewScheduler) -> Self {
        Self {
            base,
            preview: None,
            params: AdjustmentParams::identity(),
            scheduler,
        }
    }

    /// The last committed image.
    pub fn base(&self) -> &Bitmap {
        &self.base
    }

    /// The uncommitted live preview, if one has been rendered.
    pub fn preview(&self) -> Option<&Bitmap> {
        self.preview.as_ref()
    }

    /// What the UI should display: the preview when present, otherwise
    /// the committed base.
    pub fn current(&self) -> &Bitmap {
        self.preview.as_ref().unwrap_or(&self.base)
    }

    pub fn params(&self) -> &AdjustmentParams {
        &self.params
    }

    /// Update the active sliders and schedule a preview render.
    pub fn set_params(&mut self, params: AdjustmentParams) {
        self.params = params;
        self.scheduler.schedule(params);
    }

    /// Pump the scheduler; call once per frame. Returns true when a new
    /// preview was rendered.
    pub fn tick(&mut self) -> bool {
        match self.scheduler.tick(&self.base) {
            Some(preview) => {
                self.preview = Some(preview);
                true
            }
            None => false,
        }
    }

    /// Drop the preview and any pending render, reverting the display to
    /// the committed base. The sliders keep their values.
    pub fn cancel_preview(&mut self) {
        self.scheduler.cancel();
        self.preview = None;
    }

    /// Reset the sliders to identity and drop the preview.
    pub fn reset_params(&mut self) {
        self.params = AdjustmentParams::identity();
        self.cancel_preview();
    }

    /// Bake the current adjustments into a new committed base.
    ///
    /// Uses the freshest state available: a still-pending parameter set
    /// is rendered now so no slider movement is lost; otherwise the
    /// rendered preview is promoted as-is. Sliders reset to identity —
    /// the adjustments are part of the image from here on.
    pub fn commit(&mut self) {
        let committed = match (self.scheduler.take_pending(), self.preview.take()) {
            (Some(params), _) => render(&self.base, &params),
            (None, Some(preview)) => preview,
            (None, None) => render(&self.base, &self.params),
        };
        self.base = committed;
        self.params = AdjustmentParams::identity();
        self.scheduler.cancel();
    }

    /// Commit a tool result (background removal, resize, rotate, flip,
    /// background fill) as the new base. Discards any preview state and
    /// resets the sliders.
    pub fn commit_image(&mut self, image: Bitmap) {
        self.base = image;
        self.preview = None;
        self.params = AdjustmentParams::identity();
        self.scheduler.cancel();
    }
}
