//! Global CLI options shared across all commands
//!
//! Collects the global flags once in `main.rs` so handlers take a single
//! `&GlobalOptions` instead of a long parameter list.

use std::fmt;

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// Credential flags (and their environment variables) override the values
/// loaded from `--profile`.
#[derive(Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json)
    pub format: OutputFormat,

    /// Saved profile to load credentials from
    pub profile: Option<String>,

    /// Custom profile file path (defaults to ~/.usermanager/profiles.json)
    pub config: Option<String>,

    /// Environment ID override
    pub env_id: Option<String>,

    /// Client ID override
    pub client_id: Option<String>,

    /// Client secret override
    pub client_secret: Option<String>,

    /// Custom authentication host
    pub auth_host: Option<String>,

    /// Custom Platform API host
    pub api_host: Option<String>,

    /// Worker pool size
    pub workers: usize,
}

impl fmt::Debug for GlobalOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalOptions")
            .field("format", &self.format)
            .field("profile", &self.profile)
            .field("config", &self.config)
            .field("env_id", &self.env_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("auth_host", &self.auth_host)
            .field("api_host", &self.api_host)
            .field("workers", &self.workers)
            .finish()
    }
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            profile: cli.profile.clone(),
            config: cli.config.clone(),
            env_id: cli.env_id.clone(),
            client_id: cli.client_id.clone(),
            client_secret: cli.client_secret.clone(),
            auth_host: cli.auth_host.clone(),
            api_host: cli.api_host.clone(),
            workers: cli.workers,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get profile override as `Option<&str>`.
    pub fn profile_ref(&self) -> Option<&str> {
        self.profile.as_deref()
    }
}
