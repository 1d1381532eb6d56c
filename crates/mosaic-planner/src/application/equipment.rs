//! Equipment selection: where the mosaic's field of view comes from.
//!
//! The planner never asks "which eyepiece is selected?" directly.  It only
//! needs the answer to one question, expressed by [`FieldOfViewProvider`]:
//! *what is the angular field of view right now, if any?*
//!
//! [`EquipmentCatalog`] is the provider used by the CLI.  It holds named
//! equipment entries and an optional selection, and converts the selected
//! optics into a [`FieldOfView`]:
//!
//! | Equipment  | True field of view                                   |
//! |------------|------------------------------------------------------|
//! | `Eyepiece` | `apparent_fov * eyepiece_focal / telescope_focal`    |
//! | `Sensor`   | `2 * atan(sensor_size / (2 * telescope_focal))` each axis |
//! | `Fixed`    | the stored width and height                          |

use mosaic_core::FieldOfView;
use thiserror::Error;
use tracing::warn;

/// Error type for equipment catalog operations.
#[derive(Debug, Error, PartialEq)]
pub enum EquipmentError {
    /// No entry with the requested name exists in the catalog.
    #[error("unknown equipment: {0}")]
    UnknownEquipment(String),
}

/// Supplies the field of view of the currently selected equipment.
///
/// Returns `None` when nothing is selected; that is a normal state, not an error.
#[cfg_attr(test, mockall::automock)]
pub trait FieldOfViewProvider {
    fn current_field_of_view(&self) -> Option<FieldOfView>;
}

/// Optical equipment whose field of view can be computed.
#[derive(Debug, Clone, PartialEq)]
pub enum Equipment {
    /// A visual eyepiece on a telescope.
    Eyepiece {
        telescope_focal_mm: f64,
        eyepiece_focal_mm: f64,
        apparent_fov_deg: f64,
    },
    /// A camera sensor at the telescope's focal plane.
    Sensor {
        telescope_focal_mm: f64,
        sensor_width_mm: f64,
        sensor_height_mm: f64,
    },
    /// A field of view given directly (binoculars, finder, manual override).
    Fixed { width_deg: f64, height_deg: f64 },
}

impl Equipment {
    /// Computes the true field of view of this equipment.
    ///
    /// Returns `None` (and logs a warning) when the optical parameters do not
    /// yield a finite, positive field.
    pub fn field_of_view(&self) -> Option<FieldOfView> {
        let result = match *self {
            Equipment::Eyepiece {
                telescope_focal_mm,
                eyepiece_focal_mm,
                apparent_fov_deg,
            } => FieldOfView::square(apparent_fov_deg * eyepiece_focal_mm / telescope_focal_mm),
            Equipment::Sensor {
                telescope_focal_mm,
                sensor_width_mm,
                sensor_height_mm,
            } => FieldOfView::new(
                sensor_angle_deg(sensor_width_mm, telescope_focal_mm),
                sensor_angle_deg(sensor_height_mm, telescope_focal_mm),
            ),
            Equipment::Fixed {
                width_deg,
                height_deg,
            } => FieldOfView::new(width_deg, height_deg),
        };

        match result {
            Ok(fov) => Some(fov),
            Err(e) => {
                warn!(equipment = ?self, "equipment has no usable field of view: {e}");
                None
            }
        }
    }
}

/// Angle subtended by a sensor dimension at the given focal length.
fn sensor_angle_deg(size_mm: f64, focal_mm: f64) -> f64 {
    if focal_mm <= 0.0 {
        return f64::NAN;
    }
    (2.0 * (size_mm / (2.0 * focal_mm)).atan()).to_degrees()
}

/// A catalog entry: equipment plus the name the user selects it by.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedEquipment {
    pub name: String,
    pub equipment: Equipment,
}

/// Named equipment with at most one entry selected.
#[derive(Debug, Clone, Default)]
pub struct EquipmentCatalog {
    entries: Vec<NamedEquipment>,
    selected: Option<usize>,
}

impl EquipmentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, replacing any existing entry with the same name.
    ///
    /// Replacing the selected entry keeps it selected, so its new field of
    /// view takes effect on the next grid request.
    pub fn insert(&mut self, name: impl Into<String>, equipment: Equipment) {
        let name = name.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.equipment = equipment,
            None => self.entries.push(NamedEquipment { name, equipment }),
        }
    }

    /// Selects the entry called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EquipmentError::UnknownEquipment`] if no such entry exists;
    /// the previous selection is kept.
    pub fn select(&mut self, name: &str) -> Result<(), EquipmentError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| EquipmentError::UnknownEquipment(name.to_string()))?;
        self.selected = Some(index);
        Ok(())
    }

    /// Deselects all equipment.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Returns the selected entry, if any.
    pub fn selected(&self) -> Option<&NamedEquipment> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    pub fn entries(&self) -> &[NamedEquipment] {
        &self.entries
    }
}

impl FieldOfViewProvider for EquipmentCatalog {
    fn current_field_of_view(&self) -> Option<FieldOfView> {
        self.selected()?.equipment.field_of_view()
    }
}
