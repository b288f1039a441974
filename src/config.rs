use std::collections::HashMap;
use std::{fs, path::PathBuf};

use directories::ProjectDirs;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// One provider section in the settings file. All fields are required;
/// `headers` lists the names of HTTP headers the provider expects, each
/// resolved from the identically-named environment variable.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub quote_url: String,
    pub codes_url: String,
    pub headers: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Name of the active provider section.
    pub provider: String,
    /// Optional override for the currency catalog location. Defaults to
    /// `currencies.json` next to the settings file.
    pub catalog_path: Option<String>,
    pub providers: HashMap<String, ProviderConfig>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        debug!("Loading default settings");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(config_path)
    }

    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let proj_dirs =
            ProjectDirs::from("in", "ramanc", "fxconv").ok_or(ConfigError::NoProjectDirs)?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Self =
            serde_yaml::from_str(&config_str).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("Successfully loaded settings");
        Ok(settings)
    }

    /// Looks up a provider section by name.
    pub fn provider_config(&self, name: &str) -> Result<&ProviderConfig, ConfigError> {
        self.providers
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProvider(name.to_string()))
    }

    /// The provider section named by `self.provider`.
    pub fn active_provider(&self) -> Result<&ProviderConfig, ConfigError> {
        self.provider_config(&self.provider)
    }
}

/// Fully resolved connection data for one provider: endpoint URLs plus the
/// credential headers, with every required value already looked up. Built
/// once and handed to the converter, so a missing secret fails construction
/// instead of silently dropping a header from a live request.
#[derive(Debug, Clone)]
pub struct ApiConnection {
    pub quote_url: String,
    pub codes_url: String,
    pub headers: HeaderMap,
}

impl ApiConnection {
    /// Resolves credentials through `lookup`, one call per required header
    /// name. Fails on the first name with no value.
    pub fn resolve<F>(config: &ProviderConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut headers = HeaderMap::with_capacity(config.headers.len());
        for name in &config.headers {
            let value = lookup(name).ok_or_else(|| ConfigError::MissingCredential(name.clone()))?;

            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(&value)
                .map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
            headers.insert(header_name, header_value);
        }

        debug!(count = headers.len(), "Resolved provider credentials");
        Ok(ApiConnection {
            quote_url: config.quote_url.clone(),
            codes_url: config.codes_url.clone(),
            headers,
        })
    }

    /// Resolves credentials from the process environment.
    pub fn from_env(config: &ProviderConfig) -> Result<Self, ConfigError> {
        Self::resolve(config, |name| std::env::var(name).ok())
    }
}
