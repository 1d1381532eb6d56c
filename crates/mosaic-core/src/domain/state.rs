//! Mutable mosaic settings with change detection.
//!
//! [`MosaicState`] owns the current [`MosaicSettings`] and exposes one setter
//! per parameter.  Each setter normalizes its input, stores it, and reports
//! whether the stored value actually changed.  Every effective change bumps a
//! generation counter; a setter that receives the value already stored is a
//! no-op and leaves the generation untouched.
//!
//! Owners of a panel grid cache use the returned flag (or the generation) to
//! decide when to invalidate.

use tracing::warn;

use super::settings::{clamp_overlap_percent, normalize_rotation_deg, MosaicSettings};

/// The session's mosaic configuration.
#[derive(Debug, Clone, Default)]
pub struct MosaicState {
    settings: MosaicSettings,
    generation: u64,
}

impl MosaicState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already-normalized settings value.
    pub fn with_settings(settings: MosaicSettings) -> Self {
        Self {
            settings,
            generation: 0,
        }
    }

    /// Returns a copy of the current settings.
    pub fn settings(&self) -> MosaicSettings {
        self.settings
    }

    /// Number of effective changes since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn enabled(&self) -> bool {
        self.settings.enabled()
    }

    pub fn panels_x(&self) -> u32 {
        self.settings.panels_x()
    }

    pub fn panels_y(&self) -> u32 {
        self.settings.panels_y()
    }

    pub fn overlap_percent(&self) -> f64 {
        self.settings.overlap_percent()
    }

    pub fn rotation_deg(&self) -> f64 {
        self.settings.rotation_deg()
    }

    /// Stores the mosaic-mode flag.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        self.replace(self.settings.with_enabled(enabled))
    }

    /// Stores `n` clamped to `[1, 20]`.
    pub fn set_panels_x(&mut self, n: i32) -> bool {
        self.replace(self.settings.with_panels_x(n))
    }

    /// Stores `n` clamped to `[1, 20]`.
    pub fn set_panels_y(&mut self, n: i32) -> bool {
        self.replace(self.settings.with_panels_y(n))
    }

    /// Stores `percent` clamped to `[0, 50]`.  `NaN` is rejected as a no-op.
    pub fn set_overlap_percent(&mut self, percent: f64) -> bool {
        if clamp_overlap_percent(percent).is_none() {
            warn!(percent, "ignoring non-finite mosaic overlap");
            return false;
        }
        self.replace(self.settings.with_overlap_percent(percent))
    }

    /// Stores `angle` wrapped into `[0, 360)`.  Non-finite angles are
    /// rejected as a no-op.
    pub fn set_rotation_deg(&mut self, angle: f64) -> bool {
        if normalize_rotation_deg(angle).is_none() {
            warn!(angle, "ignoring non-finite mosaic rotation");
            return false;
        }
        self.replace(self.settings.with_rotation_deg(angle))
    }

    /// Applies every field of `settings` through the individual setters.
    ///
    /// Returns `true` if any field changed.
    pub fn apply(&mut self, settings: &MosaicSettings) -> bool {
        // Non-short-circuiting `|` so every setter runs.
        self.set_enabled(settings.enabled())
            | self.set_panels_x(settings.panels_x() as i32)
            | self.set_panels_y(settings.panels_y() as i32)
            | self.set_overlap_percent(settings.overlap_percent())
            | self.set_rotation_deg(settings.rotation_deg())
    }

    fn replace(&mut self, next: MosaicSettings) -> bool {
        if next == self.settings {
            return false;
        }
        self.settings = next;
        self.generation += 1;
        true
    }
}
