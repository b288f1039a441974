//! Error types for the conversion core.

use std::path::PathBuf;

/// Failures while loading the local currency catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read currency catalog {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse currency catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Failures while loading settings or resolving provider credentials.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("no provider named '{0}' in settings")]
    UnknownProvider(String),

    #[error("environment variable '{0}' required by the provider is not set")]
    MissingCredential(String),

    #[error("provider header '{0}' is not a valid HTTP header")]
    InvalidHeader(String),

    #[error("could not determine project directories")]
    NoProjectDirs,
}

/// Caller-supplied input rejected before any provider call.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid currency code '{0}'")]
    UnknownCode(String),

    #[error("currency '{0}' is not supported by the provider")]
    UnsupportedCode(String),

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
}

/// Failures talking to the rate provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("provider responded with HTTP status {0}")]
    Response(u16),

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Umbrella error for converter operations.
#[derive(Debug, thiserror::Error)]
pub enum ConverterError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("unknown currency code '{0}'")]
    UnknownCurrency(String),
}
