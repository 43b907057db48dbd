//! Session Token Manager
//!
//! Owns the access/refresh token pair. Both values live only in the
//! [`SecureStore`]; every query re-reads the store so a revocation made
//! elsewhere is observed without a restart.
//!
//! ## Session State
//!
//! "Authenticated" means a non-empty access token is stored right now.
//! No separate flag is persisted.
//!
//! ## Pair Writes
//!
//! The store only guarantees atomicity per key, so the pair is written as
//! two steps ordered to keep a half-finished write from looking like a
//! session:
//!
//! - [`TokenManager::set_tokens`] writes the refresh token first, then the
//!   access token.
//! - [`TokenManager::clear_tokens`] deletes the access token first, then the
//!   refresh token.
//!
//! ## Example
//!
//! ```no_run
//! use core_auth::TokenManager;
//! # use bridge_traits::storage::SecureStore;
//! # use core_net::NetworkService;
//! # use std::sync::Arc;
//! # async fn example(store: Arc<dyn SecureStore>, network: NetworkService) -> core_auth::Result<()> {
//! let base_url = url::Url::parse("https://api.example.com").unwrap();
//! let tokens = TokenManager::new(store, network, base_url, "com.session-core");
//!
//! tokens.set_tokens("access", "refresh").await?;
//! assert!(tokens.is_authenticated().await);
//!
//! tokens.clear_tokens().await?;
//! # Ok(())
//! # }
//! ```

use bridge_traits::error::StorageError;
use bridge_traits::storage::SecureStore;
use core_net::{NetworkService, DEFAULT_TIMEOUT};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::endpoints;
use crate::error::{AuthError, Result};
use crate::types::AuthResponse;

/// Key suffix of the stored access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Key suffix of the stored refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Token lifecycle over a secure store.
///
/// Holds no token in memory; cloning shares the same store and transport.
#[derive(Clone)]
pub struct TokenManager {
    secure_store: Arc<dyn SecureStore>,
    network: NetworkService,
    base_url: Url,
    access_key: String,
    refresh_key: String,
    request_timeout: Duration,
}

impl TokenManager {
    /// Create a manager whose keys are `<key_namespace>.accessToken` and
    /// `<key_namespace>.refreshToken`.
    pub fn new(
        secure_store: Arc<dyn SecureStore>,
        network: NetworkService,
        base_url: Url,
        key_namespace: &str,
    ) -> Self {
        debug!(key_namespace, "Initializing TokenManager");
        Self {
            secure_store,
            network,
            base_url,
            access_key: format!("{}.{}", key_namespace, ACCESS_TOKEN_KEY),
            refresh_key: format!("{}.{}", key_namespace, REFRESH_TOKEN_KEY),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Timeout applied to the refresh call.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Current access token, read fresh from the store.
    ///
    /// Returns `Ok(None)` when nothing (or an empty value) is stored.
    pub async fn access_token(&self) -> Result<Option<String>> {
        self.read(&self.access_key).await
    }

    async fn refresh_token(&self) -> Result<Option<String>> {
        self.read(&self.refresh_key).await
    }

    /// Whether a non-empty access token is stored at this moment.
    ///
    /// A store that cannot be read counts as signed out.
    pub async fn is_authenticated(&self) -> bool {
        match self.access_token().await {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "Could not read access token, treating session as signed out");
                false
            }
        }
    }

    /// Store a new token pair, replacing any previous one.
    ///
    /// Not transactional: if the second write fails the refresh token is
    /// already replaced while the old access token (if any) remains.
    pub async fn set_tokens(&self, access_token: &str, refresh_token: &str) -> Result<()> {
        self.secure_store
            .set_secret(&self.refresh_key, refresh_token)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to store refresh token");
                AuthError::Storage(e)
            })?;

        self.secure_store
            .set_secret(&self.access_key, access_token)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to store access token");
                AuthError::Storage(e)
            })?;

        info!("Session tokens stored");
        Ok(())
    }

    /// Delete both tokens. Already-absent entries are fine.
    ///
    /// The refresh token is still deleted when deleting the access token
    /// fails; the first failure is returned.
    pub async fn clear_tokens(&self) -> Result<()> {
        let access = self.secure_store.delete_secret(&self.access_key).await;
        let refresh = self.secure_store.delete_secret(&self.refresh_key).await;

        match access.and(refresh) {
            Ok(()) => {
                info!("Session tokens cleared");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to clear session tokens");
                Err(AuthError::Storage(e))
            }
        }
    }

    /// Mint a new access token with the stored refresh token.
    ///
    /// Fails with [`AuthError::NoRefreshToken`] without touching the network
    /// when no refresh token is stored. Transport errors come back unchanged
    /// as [`AuthError::Network`]; either way the caller should treat the
    /// session as over.
    #[instrument(skip(self))]
    pub async fn refresh_access_token(&self) -> Result<String> {
        let refresh_token = self.refresh_token().await?.ok_or_else(|| {
            warn!("Refresh requested without a stored refresh token");
            AuthError::NoRefreshToken
        })?;

        let endpoint =
            endpoints::refresh(&self.base_url, &refresh_token)?.with_timeout(self.request_timeout);
        let response: AuthResponse = self.network.request(&endpoint).await.map_err(|e| {
            warn!(error = %e, "Token refresh call failed");
            AuthError::Network(e)
        })?;

        if response.access_token.is_empty() || response.refresh_token.is_empty() {
            warn!(
                has_access_token = !response.access_token.is_empty(),
                has_refresh_token = !response.refresh_token.is_empty(),
                "Refresh response carried an empty token"
            );
            return Err(AuthError::RefreshFailed);
        }

        self.set_tokens(&response.access_token, &response.refresh_token)
            .await?;

        info!(expires_in = response.expires_in, "Access token refreshed");
        Ok(response.access_token)
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        match self.secure_store.get_secret(key).await {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(StorageError::ItemNotFound(_)) => Ok(None),
            Err(e) => {
                warn!(key, error = %e, "Failed to read from secure storage");
                Err(AuthError::Storage(e))
            }
        }
    }
}
