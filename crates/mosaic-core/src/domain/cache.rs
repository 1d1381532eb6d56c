//! Single-slot memoization of the panel grid.
//!
//! The cache stores the last computed grid together with a [`GridKey`]: an
//! exact snapshot of every input that produced it.  Floating-point inputs are
//! compared bit-for-bit.  That is sound because they only ever change through
//! the normalizing setters, never through free arithmetic, so two equal
//! settings always carry identical bit patterns.
//!
//! The grid is handed out as an `Arc<[PanelDescriptor]>`; a cache hit returns a
//! clone of the same `Arc`, which lets callers (and tests) detect reuse with
//! [`Arc::ptr_eq`].

use std::sync::Arc;

use tracing::debug;

use super::field_of_view::FieldOfView;
use super::panel_grid::{compute_panel_grid, PanelDescriptor};
use super::settings::MosaicSettings;

/// Exact snapshot of the inputs to [`compute_panel_grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridKey {
    enabled: bool,
    panels_x: u32,
    panels_y: u32,
    overlap_bits: u64,
    rotation_bits: u64,
    /// `(width, height)` bit patterns, `None` when no equipment is selected.
    fov_bits: Option<(u64, u64)>,
}

impl GridKey {
    /// Captures the full input tuple.
    ///
    /// The enabled flag is part of the key: toggling mosaic mode always
    /// produces a fresh grid for the new mode.
    pub fn new(settings: &MosaicSettings, fov: Option<FieldOfView>) -> Self {
        Self {
            enabled: settings.enabled(),
            panels_x: settings.panels_x(),
            panels_y: settings.panels_y(),
            overlap_bits: settings.overlap_percent().to_bits(),
            rotation_bits: settings.rotation_deg().to_bits(),
            fov_bits: fov.map(|f| (f.width_deg().to_bits(), f.height_deg().to_bits())),
        }
    }
}

/// Hit/miss counters for a [`PanelGridCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the stored grid.
    pub hits: u64,
    /// Lookups that had to run the geometry.
    pub misses: u64,
}

#[derive(Debug)]
struct CachedGrid {
    key: GridKey,
    panels: Arc<[PanelDescriptor]>,
}

/// Memoizes the most recent panel grid.
#[derive(Debug, Default)]
pub struct PanelGridCache {
    slot: Option<CachedGrid>,
    stats: CacheStats,
}

impl PanelGridCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the grid for the given inputs, recomputing only when the
    /// stored snapshot differs from them or the slot is empty.
    pub fn get_or_compute(
        &mut self,
        settings: &MosaicSettings,
        fov: Option<FieldOfView>,
    ) -> Arc<[PanelDescriptor]> {
        let key = GridKey::new(settings, fov);

        if let Some(cached) = &self.slot {
            if cached.key == key {
                self.stats.hits += 1;
                debug!(panels = cached.panels.len(), "panel grid cache hit");
                return Arc::clone(&cached.panels);
            }
        }

        self.stats.misses += 1;
        let panels: Arc<[PanelDescriptor]> = compute_panel_grid(settings, fov).into();
        debug!(
            panels = panels.len(),
            panels_x = settings.panels_x(),
            panels_y = settings.panels_y(),
            overlap_percent = settings.overlap_percent(),
            rotation_deg = settings.rotation_deg(),
            has_fov = fov.is_some(),
            "panel grid recomputed"
        );
        self.slot = Some(CachedGrid {
            key,
            panels: Arc::clone(&panels),
        });
        panels
    }

    /// Drops the stored grid so the next lookup recomputes.
    pub fn invalidate(&mut self) {
        if self.slot.take().is_some() {
            debug!("panel grid cache invalidated");
        }
    }

    /// Returns `true` when a grid is stored.
    pub fn is_populated(&self) -> bool {
        self.slot.is_some()
    }

    /// Returns the snapshot the stored grid was computed from.
    pub fn cached_key(&self) -> Option<GridKey> {
        self.slot.as_ref().map(|c| c.key)
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
