//! Endpoint descriptors.
//!
//! A descriptor fully determines one HTTP request and carries no mutable
//! state. Domain crates build one per call and drop it afterwards.

use bridge_traits::http::{CachePolicy, HttpMethod, HttpRequest};
use bytes::Bytes;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::decoding;
use crate::error::{NetworkError, Result};

/// Header mapping; keys are unique.
pub type Headers = BTreeMap<String, String>;

/// Query parameter mapping.
pub type QueryParameters = BTreeMap<String, String>;

/// Timeout used when a descriptor does not choose its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const AUTHORIZATION: &str = "Authorization";

/// Capability set of an HTTP call description.
///
/// Only `base_url`, `path` and `method` are mandatory; the rest default to
/// no headers, no query, no body, [`DEFAULT_TIMEOUT`] and the protocol
/// cache policy.
pub trait ApiEndpoint: Send + Sync {
    fn base_url(&self) -> &Url;

    fn path(&self) -> &str;

    fn method(&self) -> HttpMethod;

    fn headers(&self) -> Cow<'_, Headers> {
        Cow::Owned(Headers::new())
    }

    fn query_parameters(&self) -> Option<&QueryParameters> {
        None
    }

    fn body(&self) -> Option<&Bytes> {
        None
    }

    fn timeout(&self) -> Duration {
        DEFAULT_TIMEOUT
    }

    fn cache_policy(&self) -> CachePolicy {
        CachePolicy::default()
    }

    /// Full request URL: `path` appended to the base URL's path, then the
    /// query parameters when there are any.
    fn url(&self) -> Result<Url> {
        let base = self.base_url();
        if base.cannot_be_a_base() {
            return Err(NetworkError::InvalidUrl(base.to_string()));
        }

        let mut url = base.clone();
        let joined = format!(
            "{}/{}",
            base.path().trim_end_matches('/'),
            self.path().trim_start_matches('/')
        );
        url.set_path(&joined);

        if let Some(query) = self.query_parameters().filter(|q| !q.is_empty()) {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        Ok(url)
    }

    /// Wire request built strictly from the descriptor's fields.
    fn to_request(&self) -> Result<HttpRequest> {
        let mut request = HttpRequest::new(self.method(), self.url()?)
            .headers(self.headers().into_owned())
            .timeout(self.timeout())
            .cache_policy(self.cache_policy());

        if let Some(body) = self.body() {
            request = request.body(body.clone());
        }

        Ok(request)
    }
}

/// Immutable endpoint descriptor.
///
/// Built with consuming `with_*` methods; once handed to the transport it is
/// only ever read.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    base_url: Url,
    path: String,
    method: HttpMethod,
    headers: Headers,
    query: Option<QueryParameters>,
    body: Option<Bytes>,
    timeout: Duration,
    cache_policy: CachePolicy,
}

impl Endpoint {
    pub fn new(method: HttpMethod, base_url: &Url, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.clone(),
            path: path.into(),
            method,
            headers: Headers::new(),
            query: None,
            body: None,
            timeout: DEFAULT_TIMEOUT,
            cache_policy: CachePolicy::default(),
        }
    }

    pub fn get(base_url: &Url, path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, base_url, path)
    }

    pub fn post(base_url: &Url, path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, base_url, path)
    }

    pub fn put(base_url: &Url, path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, base_url, path)
    }

    pub fn delete(base_url: &Url, path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, base_url, path)
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Adds `Accept: application/json`.
    pub fn accept_json(self) -> Self {
        self.with_header("Accept", "application/json")
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(QueryParameters::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the JSON body and sets `Content-Type`.
    pub fn with_json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let body = decoding::encode(value)?;
        Ok(self
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }
}

impl ApiEndpoint for Endpoint {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn method(&self) -> HttpMethod {
        self.method
    }

    fn headers(&self) -> Cow<'_, Headers> {
        Cow::Borrowed(&self.headers)
    }

    fn query_parameters(&self) -> Option<&QueryParameters> {
        self.query.as_ref()
    }

    fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn cache_policy(&self) -> CachePolicy {
        self.cache_policy
    }
}

/// Decorator adding `Authorization: Bearer <token>` to a descriptor.
///
/// Every other field is forwarded from the wrapped descriptor, which is
/// never modified.
pub struct AuthenticatedEndpoint<E> {
    endpoint: E,
    access_token: String,
}

impl<E: ApiEndpoint> AuthenticatedEndpoint<E> {
    pub fn new(endpoint: E, access_token: impl Into<String>) -> Self {
        Self {
            endpoint,
            access_token: access_token.into(),
        }
    }

    /// The wrapped descriptor.
    pub fn inner(&self) -> &E {
        &self.endpoint
    }

    pub fn into_inner(self) -> E {
        self.endpoint
    }
}

/// Wrap `endpoint` so it carries `token` as a bearer credential.
pub fn with_bearer_token<E: ApiEndpoint>(
    endpoint: E,
    token: impl Into<String>,
) -> AuthenticatedEndpoint<E> {
    AuthenticatedEndpoint::new(endpoint, token)
}

impl<E: ApiEndpoint> ApiEndpoint for AuthenticatedEndpoint<E> {
    fn base_url(&self) -> &Url {
        self.endpoint.base_url()
    }

    fn path(&self) -> &str {
        self.endpoint.path()
    }

    fn method(&self) -> HttpMethod {
        self.endpoint.method()
    }

    fn headers(&self) -> Cow<'_, Headers> {
        let mut headers = self.endpoint.headers().into_owned();
        // A differently-cased credential from the base would travel twice.
        headers.retain(|key, _| !key.eq_ignore_ascii_case(AUTHORIZATION));
        headers.insert(
            AUTHORIZATION.to_string(),
            format!("Bearer {}", self.access_token),
        );
        Cow::Owned(headers)
    }

    fn query_parameters(&self) -> Option<&QueryParameters> {
        self.endpoint.query_parameters()
    }

    fn body(&self) -> Option<&Bytes> {
        self.endpoint.body()
    }

    fn timeout(&self) -> Duration {
        self.endpoint.timeout()
    }

    fn cache_policy(&self) -> CachePolicy {
        self.endpoint.cache_policy()
    }
}

impl<E: fmt::Debug> fmt::Debug for AuthenticatedEndpoint<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedEndpoint")
            .field("endpoint", &self.endpoint)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.example.com").unwrap()
    }

    #[test]
    fn test_defaults() {
        let endpoint = Endpoint::get(&base(), "/users");

        assert_eq!(endpoint.method(), HttpMethod::Get);
        assert!(endpoint.headers().is_empty());
        assert!(endpoint.query_parameters().is_none());
        assert!(endpoint.body().is_none());
        assert_eq!(endpoint.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(endpoint.cache_policy(), CachePolicy::UseProtocolCachePolicy);
        assert_eq!(endpoint.url().unwrap().as_str(), "https://api.example.com/users");
    }

    #[test]
    fn test_url_appends_to_base_path() {
        let base = Url::parse("https://api.example.com/v1/").unwrap();
        let endpoint = Endpoint::get(&base, "/users/42");
        assert_eq!(
            endpoint.url().unwrap().as_str(),
            "https://api.example.com/v1/users/42"
        );
    }

    #[test]
    fn test_url_with_query_parameters() {
        let endpoint = Endpoint::get(&base(), "/users")
            .with_query("page", "2")
            .with_query("q", "jane doe");
        assert_eq!(
            endpoint.url().unwrap().as_str(),
            "https://api.example.com/users?page=2&q=jane+doe"
        );
    }

    #[test]
    fn test_empty_query_mapping_adds_nothing() {
        struct EmptyQuery {
            base: Url,
            query: QueryParameters,
        }

        impl ApiEndpoint for EmptyQuery {
            fn base_url(&self) -> &Url {
                &self.base
            }
            fn path(&self) -> &str {
                "/users"
            }
            fn method(&self) -> HttpMethod {
                HttpMethod::Get
            }
            fn query_parameters(&self) -> Option<&QueryParameters> {
                Some(&self.query)
            }
        }

        let endpoint = EmptyQuery {
            base: base(),
            query: QueryParameters::new(),
        };
        assert_eq!(endpoint.url().unwrap().as_str(), "https://api.example.com/users");
    }

    #[test]
    fn test_cannot_be_a_base_is_invalid_url() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        let endpoint = Endpoint::get(&base, "/users");
        assert!(matches!(endpoint.url(), Err(NetworkError::InvalidUrl(_))));
        assert!(matches!(endpoint.to_request(), Err(NetworkError::InvalidUrl(_))));
    }

    #[test]
    fn test_with_json_sets_body_and_content_type() {
        let endpoint = Endpoint::post(&base(), "/auth/login")
            .accept_json()
            .with_json(&serde_json::json!({"email": "a@b.com"}))
            .unwrap();

        let headers = endpoint.headers();
        assert_eq!(headers.get("Content-Type").map(String::as_str), Some("application/json"));
        assert_eq!(headers.get("Accept").map(String::as_str), Some("application/json"));
        assert_eq!(
            endpoint.body().cloned(),
            Some(Bytes::from_static(br#"{"email":"a@b.com"}"#))
        );
    }

    #[test]
    fn test_to_request_copies_every_field() {
        let endpoint = Endpoint::put(&base(), "/users/1")
            .with_header("X-Trace", "abc")
            .with_query("dry_run", "true")
            .with_body(Bytes::from_static(b"{}"))
            .with_timeout(Duration::from_secs(5))
            .with_cache_policy(CachePolicy::ReloadIgnoringLocalCacheData);

        let request = endpoint.to_request().unwrap();

        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.url, "https://api.example.com/users/1?dry_run=true");
        assert_eq!(request.headers.get("X-Trace"), Some(&"abc".to_string()));
        assert_eq!(request.body, Some(Bytes::from_static(b"{}")));
        assert_eq!(request.timeout, Some(Duration::from_secs(5)));
        assert_eq!(request.cache_policy, CachePolicy::ReloadIgnoringLocalCacheData);
    }

    #[test]
    fn test_bearer_wrapper_adds_exactly_one_header() {
        let endpoint = Endpoint::get(&base(), "/users/42")
            .accept_json()
            .with_header("X-Trace", "abc");
        let original = endpoint.clone();

        let authenticated = with_bearer_token(endpoint, "AT1");
        let headers = authenticated.headers();

        let base_headers = original.headers();
        assert_eq!(headers.len(), base_headers.len() + 1);
        for (key, value) in base_headers.iter() {
            assert_eq!(headers.get(key), Some(value));
        }
        assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer AT1"));

        // The wrapped descriptor keeps its own headers.
        assert_eq!(authenticated.inner(), &original);
        assert!(!authenticated.inner().headers().contains_key("Authorization"));
    }

    #[test]
    fn test_bearer_wrapper_passes_fields_through() {
        let endpoint = Endpoint::post(&base(), "/users")
            .with_query("page", "1")
            .with_body(Bytes::from_static(b"payload"))
            .with_timeout(Duration::from_secs(7))
            .with_cache_policy(CachePolicy::ReturnCacheDataElseLoad);

        let authenticated = with_bearer_token(endpoint, "AT1");
        let inner = authenticated.inner();

        assert!(std::ptr::eq(authenticated.base_url(), inner.base_url()));
        assert!(std::ptr::eq(authenticated.path(), inner.path()));
        assert!(std::ptr::eq(
            authenticated.query_parameters().unwrap(),
            inner.query_parameters().unwrap()
        ));
        assert!(std::ptr::eq(authenticated.body().unwrap(), inner.body().unwrap()));
        assert_eq!(authenticated.method(), HttpMethod::Post);
        assert_eq!(authenticated.timeout(), Duration::from_secs(7));
        assert_eq!(
            authenticated.cache_policy(),
            CachePolicy::ReturnCacheDataElseLoad
        );
    }

    #[test]
    fn test_bearer_wrapper_replaces_existing_credential() {
        let endpoint = Endpoint::get(&base(), "/users").with_header("authorization", "Basic old");
        let authenticated = with_bearer_token(endpoint, "AT2");
        let headers = authenticated.headers();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer AT2"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let authenticated = with_bearer_token(Endpoint::get(&base(), "/users"), "very-secret");
        let rendered = format!("{:?}", authenticated);
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
