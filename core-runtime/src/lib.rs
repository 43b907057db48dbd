//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the session core:
//! - Logging and tracing infrastructure
//! - Configuration management with fail-fast capability checks
//!
//! ## Overview
//!
//! Other crates depend on this one for the logging conventions and for the
//! validated [`CoreConfig`](config::CoreConfig) that carries the injected
//! bridge implementations.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
