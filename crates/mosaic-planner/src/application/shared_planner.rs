//! Thread-safe wrapper around [`MosaicPlanner`].
//!
//! The planner itself is single-threaded.  When settings are edited on one
//! thread and the grid is read on another, the read-check-compute-store
//! sequence must run as one unit: a torn read (new settings, old grid) would
//! silently draw the wrong panels.  [`SharedMosaicPlanner`] therefore guards
//! the whole planner with a single mutex instead of locking its parts.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mosaic_core::PanelDescriptor;

use super::equipment::FieldOfViewProvider;
use super::plan_mosaic::{MosaicPlan, MosaicPlanner};

/// A [`MosaicPlanner`] behind one mutex.
pub struct SharedMosaicPlanner<P> {
    inner: Mutex<MosaicPlanner<P>>,
}

impl<P: FieldOfViewProvider> SharedMosaicPlanner<P> {
    pub fn new(planner: MosaicPlanner<P>) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(planner),
        })
    }

    /// Runs `f` with exclusive access to the planner.
    ///
    /// Any number of setters and grid requests inside `f` observe one
    /// consistent state.
    pub fn with_planner<R>(&self, f: impl FnOnce(&mut MosaicPlanner<P>) -> R) -> R {
        f(&mut self.lock())
    }

    /// Returns the panel grid for the current settings and equipment.
    pub fn compute_panels(&self) -> Arc<[PanelDescriptor]> {
        self.lock().compute_panels()
    }

    /// Returns the panels together with the inputs that produced them.
    pub fn plan(&self) -> MosaicPlan {
        self.lock().plan()
    }

    fn lock(&self) -> MutexGuard<'_, MosaicPlanner<P>> {
        // Every setter leaves the state valid, so a panic on another thread
        // cannot leave a half-updated planner behind.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
