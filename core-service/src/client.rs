//! API client: domain operations over the transport and token manager.

use core_auth::{endpoints as auth_endpoints, AuthError, AuthResponse, TokenManager};
use core_net::{
    with_bearer_token, ApiEndpoint, AuthenticatedEndpoint, Endpoint, NetworkError, NetworkService,
    DEFAULT_TIMEOUT,
};
use core_runtime::logging::redact_if_sensitive;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::endpoints;
use crate::error::{CoreError, Result};
use crate::models::User;

/// Entry point for session controllers.
///
/// Calls that need a session fail with an unauthorized error before any
/// request is sent when no access token is stored, the same way a 401 from
/// the server is reported. Nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    network: NetworkService,
    tokens: TokenManager,
    base_url: Url,
    request_timeout: Duration,
}

impl ApiClient {
    pub fn new(network: NetworkService, tokens: TokenManager, base_url: Url) -> Self {
        Self {
            network,
            tokens,
            base_url,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Timeout applied to every descriptor this client builds.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.tokens
    }

    /// Sign in and store the returned token pair.
    ///
    /// A 401 from the login endpoint is reported as
    /// [`AuthError::InvalidCredentials`].
    #[instrument(skip(self, email, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<bool> {
        info!(email = %redact_if_sensitive("email", email), "Logging in");

        let endpoint = auth_endpoints::login(&self.base_url, email, password)?
            .with_timeout(self.request_timeout);
        let response: AuthResponse = match self.network.request(&endpoint).await {
            Ok(response) => response,
            Err(NetworkError::Unauthorized) => {
                warn!("Login rejected");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e.into()),
        };

        if response.access_token.is_empty() {
            warn!("Login response carried an empty access token");
            return Err(NetworkError::InvalidResponse.into());
        }

        self.tokens
            .set_tokens(&response.access_token, &response.refresh_token)
            .await?;

        info!(expires_in = response.expires_in, "Logged in");
        Ok(true)
    }

    /// Forget the local session. No request is sent.
    pub async fn logout(&self) -> Result<()> {
        self.tokens.clear_tokens().await?;
        info!("Logged out");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn fetch_user(&self, id: &str) -> Result<User> {
        let endpoint = self.authenticated(endpoints::get_user(&self.base_url, id)).await?;
        Ok(self.network.request(&endpoint).await?)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn update_user(&self, user: &User) -> Result<User> {
        let endpoint = self
            .authenticated(endpoints::update_user(&self.base_url, user)?)
            .await?;
        Ok(self.network.request(&endpoint).await?)
    }

    #[instrument(skip(self))]
    pub async fn fetch_users(&self) -> Result<Vec<User>> {
        let endpoint = self.authenticated(endpoints::get_users(&self.base_url)).await?;
        let users: Vec<User> = self.network.request(&endpoint).await?;
        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    async fn authenticated(&self, endpoint: Endpoint) -> Result<AuthenticatedEndpoint<Endpoint>> {
        match self.tokens.access_token().await? {
            Some(token) => Ok(with_bearer_token(
                endpoint.with_timeout(self.request_timeout),
                token,
            )),
            None => {
                debug!(path = endpoint.path(), "No access token, refusing request");
                Err(CoreError::Network(NetworkError::Unauthorized))
            }
        }
    }
}
