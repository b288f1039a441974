use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::cli::ui;
use fxconv::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional settings file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Path to optional currency catalog file
    #[arg(long, global = true)]
    catalog_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Convert { from, to, amount } => {
                fxconv::AppCommand::Convert { from, to, amount }
            }
            Commands::Codes => fxconv::AppCommand::Codes,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Source currency code (3 letters)
        from: String,
        /// Target currency code (3 letters)
        to: String,
        /// Amount to convert
        #[arg(default_value = "1.0")]
        amount: String,
    },
    /// List currency codes available with the provider
    #[command(alias = "list")]
    Codes,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => {
            fxconv::run_command(
                cmd.into(),
                cli.config_path.as_deref(),
                cli.catalog_path.as_deref(),
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Application failed");
        eprintln!("{}", ui::style_text(&format!("{e:#}"), ui::StyleType::Error));
        std::process::exit(1);
    }
    Ok(())
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = fxconv::config::Settings::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Settings file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
provider: "currency-exchange"

providers:
  currency-exchange:
    quote_url: "https://currency-exchange.p.rapidapi.com/exchange"
    codes_url: "https://currency-exchange.p.rapidapi.com/listquotes"
    headers:
      - X-RapidAPI-Key
      - X-RapidAPI-Host
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write settings file to {}", path.display()))?;

    let catalog_path = path.with_file_name("currencies.json");
    if !catalog_path.exists() {
        std::fs::write(&catalog_path, fxconv::catalog::DEFAULT_CATALOG).with_context(|| {
            format!("Failed to write currency catalog to {}", catalog_path.display())
        })?;
    }

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
