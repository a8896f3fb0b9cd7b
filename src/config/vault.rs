//! Client secret storage in the OS credential vault

use keyring::Entry;

use crate::error::{ConfigError, Result};

/// Vault service name shared by every profile
pub const VAULT_SERVICE: &str = "PingOneUM";

/// Whether this build links a vault that survives restarts. Other targets
/// only get keyring's in-memory mock store.
pub const PERSISTENT_VAULT: bool = cfg!(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "windows"
));

/// Storage for client secrets, keyed by profile name
pub trait SecretStore {
    fn get_secret(&self, profile: &str) -> Result<Option<String>>;

    fn set_secret(&self, profile: &str, secret: &str) -> Result<()>;
}

/// Secrets in the platform keyring (Keychain, Credential Manager, Secret Service)
#[derive(Debug, Clone)]
pub struct KeyringSecretStore {
    service: String,
}

impl Default for KeyringSecretStore {
    fn default() -> Self {
        Self {
            service: VAULT_SERVICE.to_string(),
        }
    }
}

impl KeyringSecretStore {
    fn entry(&self, profile: &str) -> Result<Entry> {
        Entry::new(&self.service, profile).map_err(|e| ConfigError::from(e).into())
    }
}

impl SecretStore for KeyringSecretStore {
    fn get_secret(&self, profile: &str) -> Result<Option<String>> {
        match self.entry(profile)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(ConfigError::from(e).into()),
        }
    }

    fn set_secret(&self, profile: &str, secret: &str) -> Result<()> {
        if !PERSISTENT_VAULT {
            return Err(ConfigError::Vault(
                "no persistent credential vault on this platform".to_string(),
            )
            .into());
        }
        self.entry(profile)?
            .set_password(secret)
            .map_err(|e| ConfigError::from(e).into())
    }
}

/// In-memory vault for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl SecretStore for MemorySecretStore {
    fn get_secret(&self, profile: &str) -> Result<Option<String>> {
        Ok(self.secrets.lock().unwrap().get(profile).cloned())
    }

    fn set_secret(&self, profile: &str, secret: &str) -> Result<()> {
        self.secrets
            .lock()
            .unwrap()
            .insert(profile.to_string(), secret.to_string());
        Ok(())
    }
}
