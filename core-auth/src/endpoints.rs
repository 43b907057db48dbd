//! Descriptors for the session endpoints.

use core_net::{Endpoint, Result};
use url::Url;

use crate::types::{LoginRequest, RefreshRequest};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REFRESH_PATH: &str = "/auth/refresh";

/// `POST /auth/login` with `{email, password}`.
pub fn login(base_url: &Url, email: &str, password: &str) -> Result<Endpoint> {
    Endpoint::post(base_url, LOGIN_PATH)
        .accept_json()
        .with_json(&LoginRequest { email, password })
}

/// `POST /auth/refresh` with `{refresh_token}`.
pub fn refresh(base_url: &Url, refresh_token: &str) -> Result<Endpoint> {
    Endpoint::post(base_url, REFRESH_PATH)
        .accept_json()
        .with_json(&RefreshRequest { refresh_token })
}
