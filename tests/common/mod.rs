//! Common test utilities for Keygate
//!
//! Shared fixtures and the proxy test harness used across integration
//! tests: one wiremock upstream per provider sitting behind the real
//! keygate router.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum_test::TestServer;
use wiremock::MockServer;

use keygate::{routes, AppState, Config, ProviderConfig, ProviderId, Secret, SecretFile};

/// Test configuration constants
pub mod constants {
    /// Real upstream keys the proxy should substitute
    pub const OPENAI_REAL_KEY: &str = "sk-real123";
    pub const GEMINI_REAL_KEY: &str = "gm-real456";
    pub const CLAUDE_REAL_KEY: &str = "cl-real789";
    /// Caller credential on the shared allow-list
    pub const ALLOWED_PROXY_KEY: &str = "proxy-abc";
    /// Caller credential absent from every allow-list
    pub const UNLISTED_PROXY_KEY: &str = "proxy-unlisted";
}

/// Secret file fixture with the shared allow-list populated
pub fn default_secret_file() -> SecretFile {
    SecretFile {
        openai_api_key: constants::OPENAI_REAL_KEY.to_string(),
        gemini_api_key: constants::GEMINI_REAL_KEY.to_string(),
        claude_api_key: constants::CLAUDE_REAL_KEY.to_string(),
        proxy_keys: vec![constants::ALLOWED_PROXY_KEY.to_string()],
        ..Default::default()
    }
}

/// A built-in provider config with its upstream pointed at a mock server
pub fn provider_with_upstream(id: ProviderId, upstream_uri: &str) -> ProviderConfig {
    let mut config = ProviderConfig::builtin(id);
    config.upstream_base_url = upstream_uri.to_string();
    config
}

/// Test harness wiring the real router to mock upstreams
pub struct ProxyTestHarness {
    pub server: TestServer,
    pub openai: MockServer,
    pub gemini: MockServer,
    pub claude: MockServer,
}

impl ProxyTestHarness {
    /// Harness with the default secret fixture
    pub async fn new() -> Self {
        Self::with_secret_file(default_secret_file()).await
    }

    /// Harness with a caller-supplied secret fixture
    pub async fn with_secret_file(file: SecretFile) -> Self {
        let openai = MockServer::start().await;
        let gemini = MockServer::start().await;
        let claude = MockServer::start().await;

        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            secret_file: PathBuf::from("secret.json"),
            outbound_proxy_url: None,
        };

        let providers = vec![
            provider_with_upstream(ProviderId::OpenAi, &openai.uri()),
            provider_with_upstream(ProviderId::Gemini, &gemini.uri()),
            provider_with_upstream(ProviderId::Claude, &claude.uri()),
        ];

        let secret = Arc::new(Secret::from_file(file));
        let state = Arc::new(
            AppState::with_providers(config, secret, providers)
                .expect("Failed to build app state"),
        );
        let server =
            TestServer::new(routes::create_router(state)).expect("Failed to create test server");

        Self {
            server,
            openai,
            gemini,
            claude,
        }
    }

    /// All requests the given upstream mock received
    pub async fn requests_for(server: &MockServer) -> Vec<wiremock::Request> {
        server.received_requests().await.unwrap_or_default()
    }
}
