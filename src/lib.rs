pub mod catalog;
pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod log;
pub mod provider;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info};

use crate::catalog::CurrencyCatalog;
use crate::config::{ApiConnection, Settings};
use crate::converter::CurrencyConverter;
use crate::provider::HttpRateSource;

pub enum AppCommand {
    Convert {
        from: String,
        to: String,
        amount: String,
    },
    Codes,
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    catalog_path: Option<&str>,
) -> Result<()> {
    info!("Currency converter starting...");

    let (settings, settings_path) = match config_path {
        Some(path) => (Settings::load_from_path(path)?, PathBuf::from(path)),
        None => {
            let path = Settings::default_config_path()?;
            (Settings::load_from_path(&path)?, path)
        }
    };
    debug!("Loaded settings: {settings:#?}");

    let catalog_file = resolve_catalog_path(catalog_path, &settings, &settings_path);
    let catalog = CurrencyCatalog::load_from_path(&catalog_file)?;

    let provider = settings.active_provider()?;
    let connection = ApiConnection::from_env(provider)?;
    let source = HttpRateSource::new(connection)?;

    let converter = CurrencyConverter::connect(catalog, source).await?;

    match command {
        AppCommand::Convert { from, to, amount } => {
            cli::convert::run(&converter, &from, &to, &amount).await
        }
        AppCommand::Codes => cli::codes::run(&converter),
    }
}

fn resolve_catalog_path(
    override_path: Option<&str>,
    settings: &Settings,
    settings_path: &Path,
) -> PathBuf {
    if let Some(path) = override_path {
        return PathBuf::from(path);
    }
    if let Some(path) = &settings.catalog_path {
        return PathBuf::from(path);
    }
    settings_path.with_file_name("currencies.json")
}
