//! Storage infrastructure: settings file persistence.
//!
//! The `config` sub-module handles:
//!
//! - Reading the TOML settings file from the platform-appropriate directory
//!   (or an explicit path).
//! - Writing the current mosaic settings and equipment selection back to disk.
//! - Providing defaults when the file does not exist yet (first run).
//!
//! Persisted values are never trusted verbatim: they are applied through the
//! same validated setters the UI uses, so a file written by an older version
//! with out-of-range values is normalized on load.

pub mod config;
