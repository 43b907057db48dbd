//! # Session Authentication
//!
//! Token lifecycle for a single session per device.
//!
//! ## Overview
//!
//! [`TokenManager`] keeps the access/refresh token pair in a host
//! [`SecureStore`](bridge_traits::storage::SecureStore), reports whether a
//! session exists and mints a new access token from the refresh token when
//! asked. Refresh is reactive only: callers trigger it after an
//! unauthorized response; nothing checks expiry ahead of time.
//!
//! The login and refresh descriptors live in [`endpoints`].

pub mod endpoints;
pub mod error;
pub mod token_manager;
pub mod types;

pub use error::{AuthError, Result};
pub use token_manager::TokenManager;
pub use types::AuthResponse;
