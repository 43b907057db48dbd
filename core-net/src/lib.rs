//! # Networking Core
//!
//! Endpoint descriptors, the bearer-token decorator, and the transport that
//! turns a descriptor into one HTTP exchange.
//!
//! ## Overview
//!
//! - [`ApiEndpoint`] is the capability set every descriptor exposes (base
//!   URL, path, method, headers, query, body, timeout, cache policy);
//!   [`Endpoint`] is the plain immutable value implementing it.
//! - [`with_bearer_token`] wraps any descriptor in an
//!   [`AuthenticatedEndpoint`] that adds an `Authorization` header and
//!   forwards every other field untouched.
//! - [`NetworkService`] executes descriptors through a host
//!   [`HttpClient`](bridge_traits::HttpClient), classifies failures into
//!   [`NetworkError`], validates the status and decodes JSON bodies.
//!
//! ## Error Classification
//!
//! Classification happens in a fixed order:
//! 1. transport failures below HTTP (no connection, timeout, other)
//! 2. status validation (`401` is always [`NetworkError::Unauthorized`])
//! 3. body decoding (only after a 2xx)
//!
//! Every call is a single attempt; callers decide whether to repeat.

pub mod decoding;
pub mod endpoint;
pub mod error;
pub mod service;

pub use endpoint::{
    with_bearer_token, ApiEndpoint, AuthenticatedEndpoint, Endpoint, Headers, QueryParameters,
    DEFAULT_TIMEOUT,
};
pub use error::{NetworkError, Result};
pub use service::{validate_response, NetworkService};

pub use bridge_traits::http::{CachePolicy, HttpMethod};
