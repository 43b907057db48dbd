//! # Core Configuration Module
//!
//! Provides configuration management for the session core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! holding the API base URL, request defaults, and the bridge implementations
//! the core needs. Validation is fail-fast: a missing capability or a bad
//! setting is reported from [`CoreConfigBuilder::build`], never later.
//!
//! ## Required Dependencies
//!
//! - `HttpClient` - wire transport (desktop default: reqwest)
//! - `SecureStore` - credential persistence (desktop default: OS keyring)
//!
//! When the `desktop-shims` feature is enabled, desktop-ready defaults are
//! injected automatically if not provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .base_url("https://api.example.com")
//!     .request_timeout(Duration::from_secs(15))
//!     .http_client(Arc::new(MyHttpClient))
//!     .secure_store(Arc::new(MySecureStore))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{HttpClient, SecureStore};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest per-request timeout accepted by validation
pub const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Prefix for secure store keys unless overridden
pub const DEFAULT_KEY_NAMESPACE: &str = "com.session-core";

/// User agent sent by the default desktop HTTP client
pub const DEFAULT_USER_AGENT: &str = concat!("session-core/", env!("CARGO_PKG_VERSION"));

/// Core configuration for the session core.
///
/// Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Root of the HTTP API; endpoint paths are joined onto it
    pub base_url: Url,

    /// Timeout applied to every endpoint unless it sets its own
    pub request_timeout: Duration,

    /// Prefix for secure store keys
    pub key_namespace: String,

    pub user_agent: String,

    pub http_client: Arc<dyn HttpClient>,

    pub secure_store: Arc<dyn SecureStore>,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("request_timeout", &self.request_timeout)
            .field("key_namespace", &self.key_namespace)
            .field("user_agent", &self.user_agent)
            .field("http_client", &"HttpClient { ... }")
            .field("secure_store", &"SecureStore { ... }")
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Base URL is an absolute http(s) URL
    /// - Request timeout is > 0 and at most five minutes
    /// - Key namespace is non-empty and free of whitespace
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Base URL must use http or https, got '{}'",
                self.base_url.scheme()
            )));
        }

        if self.base_url.cannot_be_a_base() || self.base_url.host_str().is_none() {
            return Err(Error::Config(format!(
                "Base URL '{}' has no host",
                self.base_url
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        if self.request_timeout > MAX_REQUEST_TIMEOUT {
            return Err(Error::Config(format!(
                "Request timeout exceeds maximum of {} seconds",
                MAX_REQUEST_TIMEOUT.as_secs()
            )));
        }

        if self.key_namespace.is_empty() || self.key_namespace.chars().any(char::is_whitespace) {
            return Err(Error::Config(
                "Key namespace must be non-empty and contain no whitespace".to_string(),
            ));
        }

        Ok(())
    }

    /// Secure store key for `name` inside this config's namespace.
    pub fn storage_key(&self, name: &str) -> String {
        format!("{}.{}", self.key_namespace, name)
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn http_client_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "No HTTP client implementation provided. \
                 Desktop: enable the 'desktop-shims' feature to use ReqwestHttpClient. \
                 Mobile: inject the platform-native adapter."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn secure_store_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "SecureStore".to_string(),
        message: "SecureStore implementation is required for credential persistence. \
                 Desktop: enable the 'desktop-shims' feature to use KeyringSecureStore. \
                 Mobile: inject platform-native secure storage (Keychain/Keystore)."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client(timeout: Duration, user_agent: &str) -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = ReqwestHttpClient::with_options(timeout, user_agent).map_err(|e| {
        Error::CapabilityMissing {
            capability: "HttpClient".to_string(),
            message: format!("Default reqwest client could not be built: {}", e),
        }
    })?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client(
    _timeout: Duration,
    _user_agent: &str,
) -> Result<Arc<dyn HttpClient>> {
    Err(http_client_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_secure_store(namespace: &str) -> Result<Arc<dyn SecureStore>> {
    use bridge_desktop::KeyringSecureStore;

    let store: Arc<dyn SecureStore> = Arc::new(KeyringSecureStore::with_service_name(namespace));
    Ok(store)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_secure_store(_namespace: &str) -> Result<Arc<dyn SecureStore>> {
    Err(secure_store_missing_error())
}

/// Builder for constructing [`CoreConfig`] instances.
#[derive(Default)]
pub struct CoreConfigBuilder {
    base_url: Option<String>,
    request_timeout: Option<Duration>,
    key_namespace: Option<String>,
    user_agent: Option<String>,
    http_client: Option<Arc<dyn HttpClient>>,
    secure_store: Option<Arc<dyn SecureStore>>,
}

impl CoreConfigBuilder {
    /// Sets the API base URL (required).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the default per-request timeout (defaults to 30 seconds).
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the secure store key prefix.
    pub fn key_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.key_namespace = Some(namespace.into());
        self
    }

    /// Sets the user agent used by the default HTTP client.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Injects a custom HTTP client implementation.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Injects a custom secure store implementation.
    pub fn secure_store(mut self, store: Arc<dyn SecureStore>) -> Self {
        self.secure_store = Some(store);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// - `Error::Config` when the base URL is missing or invalid, or a
    ///   setting fails [`CoreConfig::validate`]
    /// - `Error::CapabilityMissing` when a bridge was not injected and no
    ///   platform default is available
    pub fn build(self) -> Result<CoreConfig> {
        let raw_url = self.base_url.ok_or_else(|| {
            Error::Config("Base URL is required. Use .base_url() to set it.".to_string())
        })?;

        let base_url = Url::parse(&raw_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", raw_url, e)))?;

        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let key_namespace = self
            .key_namespace
            .unwrap_or_else(|| DEFAULT_KEY_NAMESPACE.to_string());
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client(request_timeout, &user_agent)?,
        };

        let secure_store = match self.secure_store {
            Some(store) => store,
            None => provide_default_secure_store(&key_namespace)?,
        };

        let config = CoreConfig {
            base_url,
            request_timeout,
            key_namespace,
            user_agent,
            http_client,
            secure_store,
        };

        config.validate()?;

        Ok(config)
    }
}
