//! Configuration management for Keygate
//!
//! Settings come from command-line flags and environment variables.
//! The environment wins when both are set, matching the secret store's
//! override precedence.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::Cli;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Path to the JSON secret file
    pub secret_file: PathBuf,
    /// Optional egress proxy for all upstream connections
    pub outbound_proxy_url: Option<String>,
}

impl Config {
    /// Merge environment variables over command-line flags.
    pub fn load(cli: &Cli) -> Result<Self> {
        let host = env::var("KEYGATE_HOST")
            .ok()
            .or_else(|| cli.host.clone())
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match env::var("KEYGATE_PORT") {
            Ok(raw) => raw.parse().context("Invalid KEYGATE_PORT")?,
            Err(_) => cli.port.unwrap_or(8080),
        };

        let secret_file = env::var("KEYGATE_SECRET_FILE")
            .ok()
            .map(PathBuf::from)
            .or_else(|| cli.secret_file.clone())
            .unwrap_or_else(|| PathBuf::from("secret.json"));

        let outbound_proxy_url = env::var("OUTBOUND_PROXY_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| cli.outbound_proxy_url.clone())
            .filter(|v| !v.is_empty());

        Ok(Self {
            host,
            port,
            secret_file,
            outbound_proxy_url,
        })
    }
}
