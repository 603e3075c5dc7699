//! Provider registry
//!
//! Static descriptions of the upstream APIs fronted by the proxy. Each
//! provider is fully described by data: the path prefix callers use,
//! the upstream origin, and where its credential travels. Keeping the
//! credential location as data lets one rewrite algorithm serve every
//! provider.

use axum::http::header::{HeaderName, AUTHORIZATION};

/// Upstream APIs supported by the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenAi,
    Gemini,
    Claude,
}

impl ProviderId {
    /// All supported providers, in routing order.
    pub const ALL: [ProviderId; 3] = [ProviderId::OpenAi, ProviderId::Gemini, ProviderId::Claude];

    /// Short name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Gemini => "gemini",
            ProviderId::Claude => "claude",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a provider expects its API credential.
#[derive(Debug, Clone)]
pub enum CredentialLocation {
    /// Credential travels in a request header, optionally wrapped in a
    /// scheme prefix (`Bearer <key>`).
    Header {
        name: HeaderName,
        scheme: Option<&'static str>,
    },
    /// Credential travels as a URL query parameter.
    QueryParam { name: &'static str },
}

/// Per-provider proxy configuration.
///
/// Fields are public so tests can point `upstream_base_url` at a mock
/// server; production code always starts from [`ProviderConfig::builtin`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub id: ProviderId,
    /// Upstream origin (scheme and host, no path).
    pub upstream_base_url: String,
    /// Inbound path segment this provider owns, without a trailing slash.
    pub path_prefix: String,
    pub credential_location: CredentialLocation,
}

impl ProviderConfig {
    /// Built-in configuration for a provider.
    pub fn builtin(id: ProviderId) -> Self {
        match id {
            ProviderId::OpenAi => Self {
                id,
                upstream_base_url: "https://api.openai.com".to_string(),
                path_prefix: "/openai".to_string(),
                credential_location: CredentialLocation::Header {
                    name: AUTHORIZATION,
                    scheme: Some("Bearer"),
                },
            },
            ProviderId::Gemini => Self {
                id,
                upstream_base_url: "https://generativelanguage.googleapis.com".to_string(),
                path_prefix: "/gemini".to_string(),
                credential_location: CredentialLocation::QueryParam { name: "key" },
            },
            ProviderId::Claude => Self {
                id,
                upstream_base_url: "https://api.anthropic.com".to_string(),
                path_prefix: "/claude".to_string(),
                credential_location: CredentialLocation::Header {
                    name: HeaderName::from_static("x-api-key"),
                    scheme: None,
                },
            },
        }
    }
}
