//! Connection profiles
//!
//! A profile is a named environment/client pair. The non-secret half lives
//! in a JSON file (`{"<name>": {"env_id": ..., "cl_id": ...}}`); the client
//! secret is kept in the OS credential vault under the same name. Both
//! stores sit behind traits so tests can swap them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::client::Credentials;
use crate::error::{ConfigError, Result};

mod vault;

#[cfg(test)]
pub use vault::MemorySecretStore;
pub use vault::{KeyringSecretStore, SecretStore, VAULT_SERVICE};

/// Non-secret part of a profile as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Environment ID
    #[serde(default)]
    pub env_id: String,

    /// Client ID
    #[serde(default)]
    pub cl_id: String,
}

/// Storage for the non-secret profile mapping
pub trait ProfileStore {
    /// Profile names, sorted
    fn list(&self) -> Result<Vec<String>>;

    /// Load one profile
    fn load(&self, name: &str) -> Result<Option<Profile>>;

    /// Insert or overwrite a profile
    fn save(&self, name: &str, profile: &Profile) -> Result<()>;
}

/// Profiles kept in a single JSON file
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `path`, or at the default location when `None`
    pub fn at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Ok(Self::new(p)),
            None => Ok(Self::new(Self::default_path()?)),
        }
    }

    /// Get the default profile file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".usermanager").join("profiles.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole mapping. A missing file is an empty mapping.
    fn read_all(&self) -> Result<BTreeMap<String, Profile>> {
        if !self.path.exists() {
            debug!("No profile file at {}", self.path.display());
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", self.path.display(), e)).into())
    }

    fn write_all(&self, profiles: &BTreeMap<String, Profile>) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(profiles)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(&self.path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }
}

impl ProfileStore for JsonProfileStore {
    fn list(&self) -> Result<Vec<String>> {
        Ok(self.read_all()?.into_keys().collect())
    }

    fn load(&self, name: &str) -> Result<Option<Profile>> {
        Ok(self.read_all()?.remove(name))
    }

    fn save(&self, name: &str, profile: &Profile) -> Result<()> {
        let mut profiles = self.read_all()?;
        profiles.insert(name.to_string(), profile.clone());
        self.write_all(&profiles)
    }
}

/// Profile manager pairing the profile file with the secret vault.
///
/// Both halves are keyed by profile name; a profile whose vault entry is
/// missing loads with an empty secret.
pub struct Profiles<P, S> {
    store: P,
    secrets: S,
}

impl<P: ProfileStore, S: SecretStore> Profiles<P, S> {
    pub fn new(store: P, secrets: S) -> Self {
        Self { store, secrets }
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Saved profile names, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        self.store.list()
    }

    /// Save `credentials` under `name`, overwriting any previous profile
    pub fn save(&self, name: &str, credentials: &Credentials) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ConfigError::Invalid("Profile name must not be empty".to_string()).into());
        }

        // Vault first: a profile must never be listed without its secret.
        self.secrets.set_secret(name, &credentials.client_secret)?;

        let profile = Profile {
            env_id: credentials.env_id.clone(),
            cl_id: credentials.client_id.clone(),
        };
        self.store.save(name, &profile)?;

        debug!("Saved profile {}", name);
        Ok(())
    }

    /// Load the full credential triple of profile `name`
    pub fn load(&self, name: &str) -> Result<Credentials> {
        let profile = self
            .store
            .load(name)?
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;

        let secret = match self.secrets.get_secret(name)? {
            Some(secret) => secret,
            None => {
                warn!("No secret stored for profile {}; using an empty secret", name);
                String::new()
            }
        };

        Ok(Credentials::new(profile.env_id, profile.cl_id, secret))
    }

    /// Whether the vault holds a secret for `name`
    pub fn has_secret(&self, name: &str) -> Result<bool> {
        Ok(self.secrets.get_secret(name)?.is_some())
    }
}
