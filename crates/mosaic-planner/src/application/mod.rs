//! Application layer use cases for the mosaic planner.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules in `mosaic-core`) and the infrastructure (files,
//! terminal output).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "give me the
//!   panels to draw for the current equipment").
//! - **Depend on abstractions** (traits) rather than concrete implementations,
//!   so the equipment source can be swapped without changing this code.
//! - **Contain no file system access and no terminal output**.
//!
//! # Sub-modules
//!
//! - **`equipment`**     – The [`equipment::FieldOfViewProvider`] seam plus the
//!   named equipment catalog that converts optics into a field of view.
//!
//! - **`plan_mosaic`**   – [`plan_mosaic::MosaicPlanner`]: settings, grid cache
//!   and equipment provider combined, with invalidation on every effective
//!   change.  This is what a renderer calls before each redraw.
//!
//! - **`shared_planner`** – A mutex-guarded planner for callers on more than
//!   one thread.

pub mod equipment;
pub mod plan_mosaic;
pub mod shared_planner;
