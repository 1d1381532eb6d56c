//! Angular field of view of the currently selected equipment.
//!
//! The field of view is supplied from outside the core (an eyepiece, a camera
//! sensor, or a fixed override).  "Nothing selected" is modelled as
//! `Option<FieldOfView>::None` by callers, never as a zero-sized field.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when constructing a [`FieldOfView`].
#[derive(Debug, Error, PartialEq)]
pub enum FieldOfViewError {
    /// An extent was zero, negative, `NaN` or infinite.
    #[error("invalid field of view {width_deg}° × {height_deg}°: extents must be finite and positive")]
    InvalidExtent { width_deg: f64, height_deg: f64 },
}

/// Angular width and height of a field of view, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldOfView {
    width_deg: f64,
    height_deg: f64,
}

impl FieldOfView {
    /// Creates a rectangular field of view.
    ///
    /// # Errors
    ///
    /// Returns [`FieldOfViewError::InvalidExtent`] unless both extents are
    /// finite and strictly positive.
    pub fn new(width_deg: f64, height_deg: f64) -> Result<Self, FieldOfViewError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width_deg) || !valid(height_deg) {
            return Err(FieldOfViewError::InvalidExtent {
                width_deg,
                height_deg,
            });
        }
        Ok(Self {
            width_deg,
            height_deg,
        })
    }

    /// Creates a square field of view, as used for circular eyepiece fields.
    ///
    /// # Errors
    ///
    /// See [`FieldOfView::new`].
    pub fn square(diameter_deg: f64) -> Result<Self, FieldOfViewError> {
        Self::new(diameter_deg, diameter_deg)
    }

    pub fn width_deg(&self) -> f64 {
        self.width_deg
    }

    pub fn height_deg(&self) -> f64 {
        self.height_deg
    }
}
