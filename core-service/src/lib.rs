//! Core service façade and bootstrap helpers.
//!
//! This crate wires the host-provided bridges carried by a validated
//! [`CoreConfig`] into the transport, the token manager and the API client.
//! Every component gets its collaborators injected; there is no
//! process-wide session singleton.
//!
//! ```no_run
//! # async fn example() -> core_service::Result<()> {
//! use core_runtime::config::CoreConfig;
//! use core_service::CoreService;
//!
//! let config = CoreConfig::builder()
//!     .base_url("https://api.example.com")
//!     .build()?;
//! let core = CoreService::new(config);
//!
//! core.api_client().login("a@b.com", "secret").await?;
//! let me = core.api_client().fetch_user("42").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;

pub use client::ApiClient;
pub use error::{CoreError, Result};
pub use models::{Activity, User};

use core_auth::TokenManager;
use core_net::NetworkService;
use core_runtime::config::CoreConfig;
use tracing::info;

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct CoreService {
    config: CoreConfig,
    api_client: ApiClient,
}

impl CoreService {
    /// Wire the core from a validated configuration.
    pub fn new(config: CoreConfig) -> Self {
        let network = NetworkService::new(config.http_client.clone());
        let tokens = TokenManager::new(
            config.secure_store.clone(),
            network.clone(),
            config.base_url.clone(),
            &config.key_namespace,
        )
        .with_request_timeout(config.request_timeout);
        let api_client = ApiClient::new(network, tokens, config.base_url.clone())
            .with_request_timeout(config.request_timeout);

        info!(base_url = %config.base_url, "Core service initialized");

        Self { config, api_client }
    }

    pub fn api_client(&self) -> &ApiClient {
        &self.api_client
    }

    pub fn token_manager(&self) -> &TokenManager {
        self.api_client.token_manager()
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }
}
