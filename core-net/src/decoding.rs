//! Response decoding policy.
//!
//! Every response body goes through [`decode`], so the wire conventions live
//! in one place: keys are snake_case (matching Rust field names, so no
//! renaming is configured) and timestamps are RFC 3339 / ISO-8601 text, the
//! default representation of `chrono::DateTime<Utc>` under serde.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{NetworkError, Result};

/// Decode a JSON response body into `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(NetworkError::DecodingFailed)
}

/// Encode a request body with the same conventions used for decoding.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(NetworkError::EncodingFailed)
}
