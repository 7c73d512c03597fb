//! The eight-slider adjustment parameter set.
//!
//! Pure data: comparable for equality, serializable, and together with a
//! base bitmap it fully determines the adjustment output. Zero is the
//! identity for every slider.

use serde::{Deserialize, Serialize};

/// Valid slider ranges:
///
/// | Slider | Range | Unit |
/// |---|---|---|
/// | `exposure` | -100..100 | ~stops × 100 (gain is `2^(v/100)`) |
/// | `brightness` | -100..100 | percent offset from 100% |
/// | `contrast` | -100..100 | percent offset from 100% |
/// | `saturation` | -100..100 | percent offset from 100% |
/// | `hue` | -180..180 | degrees |
/// | `temperature` | -100..100 | cool..warm |
/// | `tint` | -100..100 | green..magenta |
/// | `sharpness` | 0..100 | strength |
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentParams {
    pub exposure: f32,
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub hue: f32,
    pub temperature: f32,
    pub tint: f32,
    pub sharpness: f32,
}

impl AdjustmentParams {
    /// All sliders at zero — the no-op parameter set.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Whether rendering with these parameters would change any pixel.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Copy with every slider clamped to its valid range. The engine
    /// clamps on entry so out-of-range UI values degrade gracefully.
    pub fn clamped(&self) -> Self {
        Self {
            exposure: self.exposure.clamp(-100.0, 100.0),
            brightness: self.brightness.clamp(-100.0, 100.0),
            contrast: self.contrast.clamp(-100.0, 100.0),
            saturation: self.saturation.clamp(-100.0, 100.0),
            hue: self.hue.clamp(-180.0, 180.0),
            temperature: self.temperature.clamp(-100.0, 100.0),
            tint: self.tint.clamp(-100.0, 100.0),
            sharpness: self.sharpness.clamp(0.0, 100.0),
        }
    }

    /// Serialize for host-side persistence of a saved editing state.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a previously saved parameter set.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// True when the composited color pass (brightness/contrast/
    /// saturation/hue) has work to do.
    pub(crate) fn needs_color_pass(&self) -> bool {
        self.brightness != 0.0 || self.contrast != 0.0 || self.saturation != 0.0 || self.hue != 0.0
    }

    /// True when the per-pixel pass (exposure/white balance) has work to do.
    pub(crate) fn needs_pixel_pass(&self) -> bool {
        self.exposure != 0.0 || self.temperature != 0.0 || self.tint != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        assert!(AdjustmentParams::default().is_identity());
        assert!(AdjustmentParams::identity().is_identity());
    }

    #[test]
    fn any_nonzero_slider_breaks_identity() {
        let params = AdjustmentParams {
            tint: 1.0,
            ..Default::default()
        };
        assert!(!params.is_identity());
    }

    #[test]
    fn clamped_limits_each_slider() {
        let params = AdjustmentParams {
            exposure: -500.0,
            brightness: 101.0,
            contrast: -101.0,
            saturation: 1000.0,
            hue: 270.0,
            temperature: -200.0,
            tint: 150.0,
            sharpness: -5.0,
        }
        .clamped();

        assert_eq!(params.exposure, -100.0);
        assert_eq!(params.brightness, 100.0);
        assert_eq!(params.contrast, -100.0);
        assert_eq!(params.saturation, 100.0);
        assert_eq!(params.hue, 180.0);
        assert_eq!(params.temperature, -100.0);
        assert_eq!(params.tint, 100.0);
        assert_eq!(params.sharpness, 0.0);
    }

    #[test]
    fn clamped_passes_valid_values_through() {
        let params = AdjustmentParams {
            exposure: 25.0,
            hue: -180.0,
            sharpness: 100.0,
            ..Default::default()
        };
        assert_eq!(params.clamped(), params);
    }

    #[test]
    fn serde_roundtrip() {
        let params = AdjustmentParams {
            exposure: 1.5,
            contrast: 20.0,
            saturation: -10.0,
            ..Default::default()
        };

        let json = params.to_json().unwrap();
        let restored = AdjustmentParams::from_json(&json).unwrap();

        assert_eq!(params, restored);
        assert!(!restored.is_identity());
    }

    #[test]
    fn deserializes_sparse_json() {
        let restored: AdjustmentParams = serde_json::from_str(r#"{"brightness": 12.0}"#).unwrap();
        assert_eq!(restored.brightness, 12.0);
        assert_eq!(restored.exposure, 0.0);
    }
}
