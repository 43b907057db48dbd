//! Workspace placeholder crate.
//!
//! This crate exposes the feature flags that map to the individual workspace
//! crates (`core-service`, `core-runtime`). Host applications can depend on
//! `session-core-workspace` and enable the documented features without wiring
//! each crate individually.

pub use core_runtime::{config::CoreConfig, logging};
pub use core_service::{ApiClient, CoreService, User};
