//! Domain entities for the mosaic planner.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of a Clean Architecture codebase is the **domain**.
//! Domain code has no imports from OS APIs, file formats, or UI frameworks and
//! can be tested on any platform without setup.  Here that means: the rules
//! for which mosaic parameters are legal, how panels are laid out on the sky,
//! and when a previously computed layout may be reused.
//!
//! Outer layers (the planner's application and infrastructure modules) depend
//! on the domain, but the domain never depends on them.

/// Single-slot memoization of the last computed panel grid.
pub mod cache;
/// Angular field of view of the selected equipment.
pub mod field_of_view;
/// Panel grid geometry: the core domain computation.
///
/// See [`panel_grid::compute_panel_grid`] for the main entry point.
pub mod panel_grid;
/// Normalized mosaic parameters.
pub mod settings;
/// Mutable settings holder with change detection.
pub mod state;
