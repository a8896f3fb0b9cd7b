//! Command execution context
//!
//! Resolves credentials (profile first, then flag overrides), endpoints and
//! the task runner once per command.

use log::debug;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{Credentials, Endpoints, IdentityClient};
use crate::config::{JsonProfileStore, KeyringSecretStore, Profiles};
use crate::error::{ConfigError, Result};
use crate::tasks::TaskRunner;

/// Profile manager backed by the profile file and the OS vault
pub type AppProfiles = Profiles<JsonProfileStore, KeyringSecretStore>;

/// Open the profile manager for the configured file
pub fn open_profiles(opts: &GlobalOptions) -> Result<AppProfiles> {
    let store = JsonProfileStore::at(opts.config_ref())?;
    Ok(Profiles::new(store, KeyringSecretStore::default()))
}

/// Credential fields as gathered from a profile and flags, before validation
#[derive(Default)]
pub struct PartialCredentials {
    pub env_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl PartialCredentials {
    /// Load `--profile` if given, then apply flag overrides
    pub fn gather(opts: &GlobalOptions) -> Result<Self> {
        let mut partial = match opts.profile_ref() {
            Some(name) => {
                let creds = open_profiles(opts)?.load(name)?;
                debug!("Loaded credentials from profile {}", name);
                Self {
                    env_id: Some(creds.env_id),
                    client_id: Some(creds.client_id),
                    client_secret: Some(creds.client_secret),
                }
            }
            None => Self::default(),
        };

        partial.apply_overrides(opts);
        Ok(partial)
    }

    fn apply_overrides(&mut self, opts: &GlobalOptions) {
        if let Some(ref env_id) = opts.env_id {
            self.env_id = Some(env_id.clone());
        }
        if let Some(ref client_id) = opts.client_id {
            self.client_id = Some(client_id.clone());
        }
        if let Some(ref secret) = opts.client_secret {
            self.client_secret = Some(secret.clone());
        }
    }

    /// Require every field to be present
    pub fn complete(self) -> Result<Credentials> {
        let env_id = present(self.env_id).ok_or(ConfigError::MissingCredential("environment ID"))?;
        let client_id = present(self.client_id).ok_or(ConfigError::MissingCredential("client ID"))?;
        // An empty secret from a profile passes through; the token endpoint rejects it.
        let client_secret = self
            .client_secret
            .ok_or(ConfigError::MissingCredential("client secret"))?;

        Ok(Credentials::new(env_id, client_id, client_secret))
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Context for commands that talk to PingOne
pub struct CommandContext {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    pub runner: TaskRunner,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Resolve credentials and build the runner
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let credentials = PartialCredentials::gather(opts)?.complete()?;
        let endpoints =
            Endpoints::with_overrides(opts.auth_host.as_deref(), opts.api_host.as_deref());

        debug!(
            "Using environment {} via {}",
            credentials.env_id, endpoints.api_host
        );

        Ok(Self {
            credentials,
            endpoints,
            runner: TaskRunner::new(opts.workers),
            format: opts.format,
        })
    }

    /// A fresh client; every task owns its own
    pub fn client(&self) -> Result<IdentityClient> {
        IdentityClient::with_endpoints(self.credentials.clone(), self.endpoints.clone())
    }
}
