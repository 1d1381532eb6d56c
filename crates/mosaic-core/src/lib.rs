//! # mosaic-core
//!
//! Shared library for the mosaic planner containing the panel grid geometry,
//! the normalized mosaic settings, and the single-slot grid cache.
//!
//! It has zero dependencies on OS APIs, UI frameworks, or the file system.
//!
//! # Architecture overview (for beginners)
//!
//! A *mosaic* is a grid of overlapping observation panels that together cover
//! a patch of sky larger than one eyepiece or camera field of view.  Each
//! panel is pointed at an angular offset from the mosaic center; a renderer
//! draws the panel footprints on top of the sky view.
//!
//! This crate (`mosaic-core`) is the pure foundation.  It defines:
//!
//! - **`domain::settings`** – The [`MosaicSettings`] value: panel counts,
//!   overlap, rotation and the enabled flag, always clamped/normalized.
//!
//! - **`domain::state`** – [`MosaicState`], the mutable holder of the settings
//!   with change detection and a generation counter.
//!
//! - **`domain::field_of_view`** – The angular size of the selected equipment.
//!
//! - **`domain::panel_grid`** – The pure function that lays out the panels.
//!
//! - **`domain::cache`** – [`PanelGridCache`], which memoizes the last grid
//!   together with the exact inputs that produced it.

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `mosaic_core::MosaicSettings` instead of `mosaic_core::domain::settings::MosaicSettings`.
pub use domain::cache::{CacheStats, GridKey, PanelGridCache};
pub use domain::field_of_view::{FieldOfView, FieldOfViewError};
pub use domain::panel_grid::{
    compute_panel_grid, mosaic_extent, AngularOffset, MosaicExtent, PanelDescriptor,
};
pub use domain::settings::{
    MosaicSettings, MAX_OVERLAP_PERCENT, MAX_PANELS, MIN_OVERLAP_PERCENT, MIN_PANELS,
};
pub use domain::state::MosaicState;
