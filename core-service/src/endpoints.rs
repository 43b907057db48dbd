//! Descriptors for the user resource.

use core_net::{Endpoint, Result};
use url::Url;

use crate::models::User;

/// `GET /users/{id}`
pub fn get_user(base_url: &Url, id: &str) -> Endpoint {
    Endpoint::get(base_url, format!("/users/{}", id)).accept_json()
}

/// `GET /users`
pub fn get_users(base_url: &Url) -> Endpoint {
    Endpoint::get(base_url, "/users").accept_json()
}

/// `PUT /users/{id}` with the user as JSON.
pub fn update_user(base_url: &Url, user: &User) -> Result<Endpoint> {
    Endpoint::put(base_url, format!("/users/{}", user.id.hyphenated()))
        .accept_json()
        .with_json(user)
}
