//! Secret store
//!
//! Holds the real upstream API keys and the allow-lists of caller
//! credentials the proxy will honor. Loaded once at startup from a JSON
//! file with environment overrides applied on top; immutable afterwards.
//! Request handlers only ever see it behind an `Arc`.

use std::collections::{HashMap, HashSet};
use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::proxy::provider::ProviderId;

/// On-disk secret file format.
///
/// `proxy_keys` is the shared allow-list. A per-provider list, when
/// present, replaces the shared list for that provider, so deployments
/// can run one shared list, fully split lists, or a mix.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretFile {
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub gemini_api_key: String,
    #[serde(default)]
    pub claude_api_key: String,
    #[serde(default)]
    pub proxy_keys: Vec<String>,
    #[serde(default)]
    pub openai_proxy_keys: Option<Vec<String>>,
    #[serde(default)]
    pub gemini_proxy_keys: Option<Vec<String>>,
    #[serde(default)]
    pub claude_proxy_keys: Option<Vec<String>>,
}

/// Immutable credential store, one per process.
#[derive(Debug)]
pub struct Secret {
    upstream_keys: HashMap<ProviderId, String>,
    shared_allow: HashSet<String>,
    provider_allow: HashMap<ProviderId, HashSet<String>>,
}

impl Secret {
    /// Load the secret file and apply environment overrides
    /// (precedence: environment > file).
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read secret file {}", path.display()))?;
        let mut file: SecretFile = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid secret file {}", path.display()))?;
        apply_env_overrides(&mut file);
        Ok(Self::from_file(file))
    }

    /// Build the store from an already-parsed secret file.
    pub fn from_file(file: SecretFile) -> Self {
        let upstream_keys = HashMap::from([
            (ProviderId::OpenAi, file.openai_api_key),
            (ProviderId::Gemini, file.gemini_api_key),
            (ProviderId::Claude, file.claude_api_key),
        ]);

        let shared_allow = sanitize(file.proxy_keys);

        let mut provider_allow = HashMap::new();
        let overrides = [
            (ProviderId::OpenAi, file.openai_proxy_keys),
            (ProviderId::Gemini, file.gemini_proxy_keys),
            (ProviderId::Claude, file.claude_proxy_keys),
        ];
        for (id, keys) in overrides {
            if let Some(keys) = keys {
                provider_allow.insert(id, sanitize(keys));
            }
        }

        Self {
            upstream_keys,
            shared_allow,
            provider_allow,
        }
    }

    /// The credential gate: check `presented` against the allow-list
    /// applicable to `provider` and hand back the real upstream key on
    /// a match.
    ///
    /// Pure and total; a miss is a normal outcome, not an error. Empty
    /// allow-list entries are stripped at load time, so an empty
    /// presented credential can never authorize.
    pub fn authorize(&self, provider: ProviderId, presented: &str) -> Option<&str> {
        if self.allow_list(provider).contains(presented) {
            Some(self.upstream_key(provider))
        } else {
            None
        }
    }

    /// The real upstream credential for `provider`.
    pub fn upstream_key(&self, provider: ProviderId) -> &str {
        self.upstream_keys
            .get(&provider)
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn allow_list(&self, provider: ProviderId) -> &HashSet<String> {
        self.provider_allow
            .get(&provider)
            .unwrap_or(&self.shared_allow)
    }
}

/// Drop empty entries; an empty string must never authorize anything.
fn sanitize(keys: Vec<String>) -> HashSet<String> {
    if keys.iter().any(|k| k.is_empty()) {
        warn!("Ignoring empty allow-list entries in secret configuration");
    }
    keys.into_iter().filter(|k| !k.is_empty()).collect()
}

/// Environment overrides, mirroring the secret file fields. Allow-list
/// variables are comma-separated.
fn apply_env_overrides(file: &mut SecretFile) {
    if let Ok(val) = env::var("OPENAI_API_KEY") {
        file.openai_api_key = val;
    }
    if let Ok(val) = env::var("GEMINI_API_KEY") {
        file.gemini_api_key = val;
    }
    if let Ok(val) = env::var("CLAUDE_API_KEY") {
        file.claude_api_key = val;
    }
    if let Ok(val) = env::var("PROXY_KEYS") {
        file.proxy_keys = split_keys(&val);
    }
    if let Ok(val) = env::var("OPENAI_PROXY_KEYS") {
        file.openai_proxy_keys = Some(split_keys(&val));
    }
    if let Ok(val) = env::var("GEMINI_PROXY_KEYS") {
        file.gemini_proxy_keys = Some(split_keys(&val));
    }
    if let Ok(val) = env::var("CLAUDE_PROXY_KEYS") {
        file.claude_proxy_keys = Some(split_keys(&val));
    }
}

fn split_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}
