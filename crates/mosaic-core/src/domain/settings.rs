//! Normalized mosaic parameters.
//!
//! [`MosaicSettings`] is an immutable value: every constructor and `with_*`
//! method clamps or normalizes its input, so a `MosaicSettings` can never hold
//! an out-of-range field.  Inputs that cannot be normalized at all (`NaN`, or
//! an infinite rotation) leave the previous value in place.

use serde::Serialize;

/// Smallest legal panel count along either axis.
pub const MIN_PANELS: u32 = 1;
/// Largest legal panel count along either axis.
pub const MAX_PANELS: u32 = 20;
/// Smallest legal overlap between adjacent panels, in percent.
pub const MIN_OVERLAP_PERCENT: f64 = 0.0;
/// Largest legal overlap between adjacent panels, in percent.
///
/// Staying below 100% keeps the stride between panel centers strictly positive.
pub const MAX_OVERLAP_PERCENT: f64 = 50.0;

const FULL_TURN_DEG: f64 = 360.0;
const DEFAULT_OVERLAP_PERCENT: f64 = 20.0;

/// The parameters that define a mosaic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MosaicSettings {
    enabled: bool,
    panels_x: u32,
    panels_y: u32,
    overlap_percent: f64,
    rotation_deg: f64,
}

impl Default for MosaicSettings {
    /// A disabled single-panel mosaic with 20% overlap and no rotation.
    fn default() -> Self {
        Self {
            enabled: false,
            panels_x: MIN_PANELS,
            panels_y: MIN_PANELS,
            overlap_percent: DEFAULT_OVERLAP_PERCENT,
            rotation_deg: 0.0,
        }
    }
}

impl MosaicSettings {
    /// Builds settings from raw values, normalizing each one.
    ///
    /// Non-finite overlap or rotation values fall back to the defaults.
    pub fn new(
        enabled: bool,
        panels_x: i32,
        panels_y: i32,
        overlap_percent: f64,
        rotation_deg: f64,
    ) -> Self {
        Self::default()
            .with_enabled(enabled)
            .with_panels_x(panels_x)
            .with_panels_y(panels_y)
            .with_overlap_percent(overlap_percent)
            .with_rotation_deg(rotation_deg)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn panels_x(&self) -> u32 {
        self.panels_x
    }

    pub fn panels_y(&self) -> u32 {
        self.panels_y
    }

    /// Overlap between adjacent panels in percent, within `[0, 50]`.
    pub fn overlap_percent(&self) -> f64 {
        self.overlap_percent
    }

    /// Rotation of the whole grid in degrees, within `[0, 360)`.
    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    /// Total number of panels in the grid.
    pub fn panel_count(&self) -> usize {
        self.panels_x as usize * self.panels_y as usize
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_panels_x(mut self, n: i32) -> Self {
        self.panels_x = clamp_panel_count(n);
        self
    }

    pub fn with_panels_y(mut self, n: i32) -> Self {
        self.panels_y = clamp_panel_count(n);
        self
    }

    /// Returns a copy with the overlap clamped to `[0, 50]`; `NaN` is ignored.
    pub fn with_overlap_percent(mut self, percent: f64) -> Self {
        if let Some(p) = clamp_overlap_percent(percent) {
            self.overlap_percent = p;
        }
        self
    }

    /// Returns a copy with the rotation wrapped into `[0, 360)`; non-finite
    /// angles are ignored.
    pub fn with_rotation_deg(mut self, angle: f64) -> Self {
        if let Some(a) = normalize_rotation_deg(angle) {
            self.rotation_deg = a;
        }
        self
    }
}

/// Clamps a requested panel count into `[MIN_PANELS, MAX_PANELS]`.
pub fn clamp_panel_count(n: i32) -> u32 {
    n.clamp(MIN_PANELS as i32, MAX_PANELS as i32) as u32
}

/// Clamps an overlap percentage into `[0, 50]`.
///
/// Returns `None` for `NaN`.  Infinities clamp to the nearest bound.
pub fn clamp_overlap_percent(percent: f64) -> Option<f64> {
    if percent.is_nan() {
        return None;
    }
    let clamped = percent.clamp(MIN_OVERLAP_PERCENT, MAX_OVERLAP_PERCENT);
    // -0.0 would compare equal to 0.0 but carry a different bit pattern.
    Some(if clamped == 0.0 { 0.0 } else { clamped })
}

/// Wraps an angle in degrees into `[0, 360)` using `((a mod 360) + 360) mod 360`.
///
/// Returns `None` for `NaN` and infinities.
pub fn normalize_rotation_deg(angle: f64) -> Option<f64> {
    if !angle.is_finite() {
        return None;
    }
    let wrapped = angle.rem_euclid(FULL_TURN_DEG);
    // A tiny negative angle rounds up to exactly 360.0 after wrapping.
    if wrapped >= FULL_TURN_DEG || wrapped == 0.0 {
        Some(0.0)
    } else {
        Some(wrapped)
    }
}
