//! Keygate - credential-gatekeeping reverse proxy for LLM provider APIs
//!
//! Callers authenticate with proxy-issued keys. Keygate substitutes the
//! real upstream credential only for allow-listed callers, forwards the
//! request, and streams the response back verbatim. Real keys never
//! reach callers; caller keys never reach upstreams.

pub mod cli;
pub mod config;
pub mod error;
pub mod proxy;
pub mod routes;
pub mod secret;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;

pub use crate::cli::Cli;
pub use crate::config::Config;
pub use crate::proxy::{CredentialLocation, ProviderConfig, ProviderId, ProxyInstance};
pub use crate::secret::{Secret, SecretFile};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// One forwarding unit per provider, built once at startup.
    pub instances: Vec<Arc<ProxyInstance>>,
}

impl AppState {
    /// Create a new application state, loading the secret store from
    /// the configured file.
    pub fn new(config: Config) -> Result<Self> {
        let secret = Arc::new(Secret::load(&config.secret_file)?);
        Self::with_secret(config, secret)
    }

    /// Build state around an already-loaded secret store, using the
    /// built-in provider registry.
    pub fn with_secret(config: Config, secret: Arc<Secret>) -> Result<Self> {
        let providers = ProviderId::ALL.map(ProviderConfig::builtin).to_vec();
        Self::with_providers(config, secret, providers)
    }

    /// Build state for an explicit provider set. Tests use this to
    /// point upstream URLs at mock servers.
    pub fn with_providers(
        config: Config,
        secret: Arc<Secret>,
        providers: Vec<ProviderConfig>,
    ) -> Result<Self> {
        let egress = config.outbound_proxy_url.as_deref();
        if let Some(proxy_url) = egress {
            info!(proxy = %proxy_url, "Routing upstream connections through outbound proxy");
        }

        let instances = providers
            .into_iter()
            .map(|provider| ProxyInstance::new(provider, secret.clone(), egress).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            config,
            start_time: Instant::now(),
            instances,
        })
    }
}
