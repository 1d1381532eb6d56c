//! Infrastructure layer for the mosaic planner.
//!
//! Contains outward-facing adapters: settings file storage and the panel
//! report renderer used by the CLI.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `mosaic_core`, but MUST NOT be imported by the `application` or domain layers.

pub mod render;
pub mod storage;
