//! PlanMosaicUseCase: the panel grid a renderer asks for before each redraw.
//!
//! [`MosaicPlanner`] owns the three pieces that must agree with each other:
//!
//! - the [`MosaicState`] holding the user's settings,
//! - the [`PanelGridCache`] holding the last computed grid,
//! - the [`FieldOfViewProvider`] reporting the selected equipment.
//!
//! Every setter goes through the state; when the state reports an effective
//! change the cache is invalidated before the setter returns.  The provider is
//! queried on every [`MosaicPlanner::compute_panels`] call and its answer is
//! part of the cache key, so an equipment change is picked up without any
//! notification from the equipment side.
//!
//! # Why both invalidation and a keyed cache? (for beginners)
//!
//! Explicit invalidation covers settings changes the planner sees directly.
//! The key comparison covers inputs the planner does not own (the field of
//! view).  Either mechanism alone would let a stale grid escape in some case.

use std::sync::Arc;

use mosaic_core::{
    mosaic_extent, CacheStats, FieldOfView, MosaicExtent, MosaicSettings, MosaicState,
    PanelDescriptor, PanelGridCache,
};
use tracing::debug;

use super::equipment::FieldOfViewProvider;

/// Everything a renderer needs to draw the mosaic once.
#[derive(Debug, Clone)]
pub struct MosaicPlan {
    pub settings: MosaicSettings,
    pub field_of_view: Option<FieldOfView>,
    pub extent: Option<MosaicExtent>,
    pub panels: Arc<[PanelDescriptor]>,
}

/// Settings + grid cache + equipment provider for one session.
pub struct MosaicPlanner<P> {
    state: MosaicState,
    cache: PanelGridCache,
    provider: P,
}

impl<P: FieldOfViewProvider> MosaicPlanner<P> {
    /// Creates a planner with default settings.
    pub fn new(provider: P) -> Self {
        Self::with_state(MosaicState::new(), provider)
    }

    /// Creates a planner starting from an existing state.
    pub fn with_state(state: MosaicState, provider: P) -> Self {
        Self {
            state,
            cache: PanelGridCache::new(),
            provider,
        }
    }

    /// Returns a copy of the current settings.
    pub fn settings(&self) -> MosaicSettings {
        self.state.settings()
    }

    pub fn state(&self) -> &MosaicState {
        &self.state
    }

    /// Runs `mutate` against the state and invalidates the cache if it
    /// reports a change.  Returns what `mutate` returned.
    pub fn update(&mut self, mutate: impl FnOnce(&mut MosaicState) -> bool) -> bool {
        let changed = mutate(&mut self.state);
        if changed {
            debug!(generation = self.state.generation(), "mosaic settings changed");
            self.cache.invalidate();
        }
        changed
    }

    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        self.update(|s| s.set_enabled(enabled))
    }

    pub fn set_panels_x(&mut self, n: i32) -> bool {
        self.update(|s| s.set_panels_x(n))
    }

    pub fn set_panels_y(&mut self, n: i32) -> bool {
        self.update(|s| s.set_panels_y(n))
    }

    pub fn set_overlap_percent(&mut self, percent: f64) -> bool {
        self.update(|s| s.set_overlap_percent(percent))
    }

    pub fn set_rotation_deg(&mut self, angle: f64) -> bool {
        self.update(|s| s.set_rotation_deg(angle))
    }

    /// Applies a whole settings value through the validated setters.
    pub fn apply_settings(&mut self, settings: &MosaicSettings) -> bool {
        self.update(|s| s.apply(settings))
    }

    /// Field of view currently reported by the provider.
    pub fn field_of_view(&self) -> Option<FieldOfView> {
        self.provider.current_field_of_view()
    }

    /// Returns the panel grid for the current settings and equipment.
    ///
    /// Empty when no equipment is selected.  Consecutive calls with nothing
    /// changed in between return the same `Arc`.
    pub fn compute_panels(&mut self) -> Arc<[PanelDescriptor]> {
        let fov = self.provider.current_field_of_view();
        self.cache.get_or_compute(&self.state.settings(), fov)
    }

    /// Returns the panels together with the inputs that produced them.
    ///
    /// The provider is queried once, so the panels, extent and field of view
    /// in the plan are always consistent.
    pub fn plan(&mut self) -> MosaicPlan {
        let settings = self.state.settings();
        let field_of_view = self.provider.current_field_of_view();
        MosaicPlan {
            settings,
            field_of_view,
            extent: mosaic_extent(&settings, field_of_view),
            panels: self.cache.get_or_compute(&settings, field_of_view),
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the equipment provider.
    ///
    /// Equipment changes need no explicit invalidation; the next
    /// [`compute_panels`](Self::compute_panels) sees the new field of view.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::equipment::MockFieldOfViewProvider;

    fn fov(deg: f64) -> FieldOfView {
        FieldOfView::square(deg).unwrap()
    }

    fn planner_with_fov(deg: f64) -> MosaicPlanner<MockFieldOfViewProvider> {
        let mut provider = MockFieldOfViewProvider::new();
        provider
            .expect_current_field_of_view()
            .return_const(Some(fov(deg)));
        MosaicPlanner::new(provider)
    }

    fn planner_without_equipment() -> MosaicPlanner<MockFieldOfViewProvider> {
        let mut provider = MockFieldOfViewProvider::new();
        provider
            .expect_current_field_of_view()
            .return_const(None::<FieldOfView>);
        MosaicPlanner::new(provider)
    }

    #[test]
    fn test_compute_panels_without_equipment_is_empty() {
        let mut planner = planner_without_equipment();
        planner.set_panels_x(3);
        planner.set_panels_y(3);
        planner.set_overlap_percent(20.0);

        assert!(planner.compute_panels().is_empty());
    }

    #[test]
    fn test_compute_panels_reuses_grid_when_nothing_changed() {
        let mut planner = planner_with_fov(1.0);
        planner.set_panels_x(3);

        let first = planner.compute_panels();
        let second = planner.compute_panels();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(planner.cache_stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_idempotent_setters_do_not_invalidate() {
        let mut planner = planner_with_fov(1.0);
        planner.set_panels_x(3);
        planner.set_panels_y(2);
        planner.set_overlap_percent(20.0);
        planner.set_rotation_deg(45.0);
        let first = planner.compute_panels();

        assert!(!planner.set_panels_x(3));
        assert!(!planner.set_panels_y(2));
        assert!(!planner.set_overlap_percent(20.0));
        assert!(!planner.set_rotation_deg(45.0));
        assert!(!planner.set_enabled(false));

        assert!(Arc::ptr_eq(&first, &planner.compute_panels()));
    }

    #[test]
    fn test_cache_invalidation_on_panel_change() {
        let mut planner = planner_with_fov(1.0);
        planner.set_panels_x(3);
        planner.set_panels_y(3);
        let before = planner.compute_panels();

        assert!(planner.set_panels_x(5));
        let after_x = planner.compute_panels();
        assert!(!Arc::ptr_eq(&before, &after_x));
        assert_eq!(after_x.len(), 15);

        assert!(planner.set_panels_y(4));
        let after_y = planner.compute_panels();
        assert!(!Arc::ptr_eq(&after_x, &after_y));
        assert_eq!(after_y.len(), 20);
    }

    #[test]
    fn test_cache_invalidation_on_overlap_change() {
        let mut planner = planner_with_fov(1.0);
        planner.set_panels_x(2);
        planner.set_overlap_percent(20.0);
        let before = planner.compute_panels();

        planner.set_overlap_percent(30.0);
        let after = planner.compute_panels();

        assert!(!Arc::ptr_eq(&before, &after));
        assert!((after[1].center.dx - 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_cache_invalidation_on_rotation_change() {
        let mut planner = planner_with_fov(1.0);
        planner.set_panels_x(2);
        planner.set_rotation_deg(0.0);
        let before = planner.compute_panels();

        planner.set_rotation_deg(45.0);

        assert!(!Arc::ptr_eq(&before, &planner.compute_panels()));
    }

    #[test]
    fn test_cache_invalidation_on_mode_change() {
        let mut planner = planner_with_fov(1.0);
        planner.set_panels_x(3);
        planner.set_panels_y(3);
        let before = planner.compute_panels();

        assert!(planner.set_enabled(true));
        let enabled = planner.compute_panels();
        assert!(!Arc::ptr_eq(&before, &enabled));

        assert!(planner.set_enabled(false));
        assert!(!Arc::ptr_eq(&enabled, &planner.compute_panels()));
    }

    #[test]
    fn test_cache_invalidation_on_equipment_change() {
        let mut provider = MockFieldOfViewProvider::new();
        let mut calls = 0;
        provider
            .expect_current_field_of_view()
            .times(3)
            .returning(move || {
                calls += 1;
                // The user swaps equipment before the third request.
                Some(fov(if calls <= 2 { 1.0 } else { 2.0 }))
            });
        let mut planner = MosaicPlanner::new(provider);
        planner.set_panels_x(2);

        let first = planner.compute_panels();
        let second = planner.compute_panels();
        let third = planner.compute_panels();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&second, &third));
        assert!((third[1].center.dx - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_plan_reports_consistent_inputs() {
        let mut planner = planner_with_fov(2.0);
        planner.set_panels_x(2);
        planner.set_overlap_percent(50.0);

        let plan = planner.plan();

        assert_eq!(plan.field_of_view, Some(fov(2.0)));
        assert_eq!(plan.settings, planner.settings());
        assert_eq!(plan.panels.len(), 2);
        assert!((plan.extent.unwrap().width_deg - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_settings_normalizes_through_setters() {
        let mut planner = planner_without_equipment();
        let raw = MosaicSettings::new(true, 40, -3, 99.0, -90.0);

        assert!(planner.apply_settings(&raw));

        let s = planner.settings();
        assert_eq!((s.panels_x(), s.panels_y()), (20, 1));
        assert_eq!(s.overlap_percent(), 50.0);
        assert!((s.rotation_deg() - 270.0).abs() < 1e-9);
    }
}
