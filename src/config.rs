//! Client configuration parsing, validation, and credential store selection.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::mode::StoreBackend;
use crate::session::store::{CredentialStore, FileStore, KeyringStore, MemoryStore};
use crate::{AppError, Result};

/// Environment variable overriding [`ClientConfig::api_base_url`].
pub const API_URL_ENV: &str = "POS_API_URL";

fn default_api_base_url() -> String {
    "http://localhost:8080".into()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_credential_key() -> String {
    "token".into()
}

fn default_service() -> String {
    "pos-console".into()
}

/// Where the bearer credential is persisted between runs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CredentialStoreConfig {
    /// Storage backend.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Keychain service name (keyring backend).
    #[serde(default = "default_service")]
    pub service: String,
    /// Token file location (file backend). Defaults under `$HOME`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for CredentialStoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            service: default_service(),
            path: None,
        }
    }
}

/// Order submission settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct OrdersConfig {
    /// Refuse zero-line orders locally instead of forwarding them.
    #[serde(default)]
    pub reject_empty: bool,
}

/// Client configuration parsed from `config.toml`.
///
/// Every key is optional; an empty document yields [`ClientConfig::default`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ClientConfig {
    /// Base URL of the POS backend.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Key under which the credential is stored.
    #[serde(default = "default_credential_key")]
    pub credential_key: String,
    /// Durable credential storage.
    #[serde(default)]
    pub credential_store: CredentialStoreConfig,
    /// Order submission settings.
    #[serde(default)]
    pub orders: OrdersConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_seconds: default_request_timeout(),
            credential_key: default_credential_key(),
            credential_store: CredentialStoreConfig::default(),
            orders: OrdersConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and normalize it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `POS_API_URL` on top of the parsed values.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the override is not a valid URL.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        match env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                debug!(env = API_URL_ENV, "api base url overridden from environment");
                self.api_base_url = url.trim().to_owned();
                self.validate()
            }
            Ok(_) => {
                warn!(env = API_URL_ENV, "override is empty, ignoring");
                Ok(())
            }
            Err(_) => Ok(()),
        }
    }

    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Whether zero-line orders are refused before submission.
    #[must_use]
    pub fn reject_empty_orders(&self) -> bool {
        self.orders.reject_empty
    }

    /// Resolved token file path for the file backend.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if no path is configured and `HOME` is unset.
    pub fn credential_file_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.credential_store.path {
            return Ok(path.clone());
        }
        let home = env::var_os("HOME")
            .or_else(|| env::var_os("USERPROFILE"))
            .ok_or_else(|| {
                AppError::Config(
                    "credential_store.path is not set and no home directory is known".into(),
                )
            })?;
        Ok(PathBuf::from(home)
            .join(".pos-console")
            .join(&self.credential_key))
    }

    /// Build the configured credential store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file backend has no resolvable path.
    pub fn credential_store(&self) -> Result<Arc<dyn CredentialStore>> {
        let store: Arc<dyn CredentialStore> = match self.credential_store.backend {
            StoreBackend::Keyring => Arc::new(KeyringStore::new(
                &self.credential_store.service,
                &self.credential_key,
            )),
            StoreBackend::File => Arc::new(FileStore::new(self.credential_file_path()?)),
            StoreBackend::Memory => Arc::new(MemoryStore::default()),
        };
        Ok(store)
    }

    fn validate(&mut self) -> Result<()> {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed)
            .map_err(|err| AppError::Config(format!("api_base_url invalid: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "api_base_url must use http or https, got {}",
                url.scheme()
            )));
        }
        self.api_base_url = trimmed.to_owned();

        if self.request_timeout_seconds == 0 {
            return Err(AppError::Config(
                "request_timeout_seconds must be greater than zero".into(),
            ));
        }

        if self.credential_key.trim().is_empty() {
            return Err(AppError::Config("credential_key must not be empty".into()));
        }

        Ok(())
    }
}
