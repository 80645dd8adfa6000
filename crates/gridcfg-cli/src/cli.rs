//! `gridcfg` - manage grid domain models from the terminal
//!
//! Usage:
//!   gridcfg list [--missing-keys]
//!   gridcfg import --driver-class org.postgresql.Driver --jdbc-url jdbc:postgresql://db/shop
//!   gridcfg import --demo --yes
//!   gridcfg remove <id>
//!   gridcfg remove-all
//!   gridcfg remove-demo

mod commands;
mod logging;
mod terminal;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use gridcfg_services::{AutoConfirm, ImportPrompt};
use gridcfg_settings::GridcfgSettings;

use commands::Context;
use logging::LoggingConfig;
use terminal::{TerminalNotifier, TerminalPrompt};

#[derive(Parser)]
#[command(
    name = "gridcfg",
    version,
    about = "Import and manage grid domain models"
)]
struct Cli {
    /// Console base URL (defaults to the saved settings)
    #[arg(long, global = true, env = "GRIDCFG_SERVER")]
    server: Option<String>,

    /// Answer yes to every confirmation and overwrite existing models
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    /// Also write JSON logs to the data directory
    #[arg(long, global = true)]
    json_logs: bool,

    /// Verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List domain models
    List {
        /// Only models mapped to a table without key fields
        #[arg(long)]
        missing_keys: bool,
    },
    /// Import domain models from a database through the agent
    Import(ImportArgs),
    /// Remove a domain model by id
    Remove { id: String },
    /// Remove all domain models
    RemoveAll,
    /// Remove generated demo domain models and caches
    RemoveDemo,
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Import from the demo database
    #[arg(long)]
    pub demo: bool,

    /// JDBC driver class to connect with (defaults to the first driver)
    #[arg(long)]
    pub driver_class: Option<String>,

    #[arg(long)]
    pub jdbc_url: Option<String>,

    #[arg(long)]
    pub user: Option<String>,

    #[arg(long, env = "GRIDCFG_DB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Schemas to load tables from (default: all)
    #[arg(long, value_delimiter = ',')]
    pub schemas: Vec<String>,

    /// Tables to import, as SCHEMA.TABLE or TABLE (default: tables with a primary key)
    #[arg(long, value_delimiter = ',')]
    pub tables: Vec<String>,

    /// Import every table, including ones without a primary key
    #[arg(long, conflicts_with = "tables")]
    pub all_tables: bool,

    /// Java package for generated types
    #[arg(long)]
    pub package: Option<String>,

    /// Use boxed types for non-nullable columns
    #[arg(long)]
    pub no_primitives: bool,

    /// Always generate a key class, even for single-column keys
    #[arg(long)]
    pub no_built_in_keys: bool,

    /// Do not generate caches for imported models
    #[arg(long)]
    pub no_caches: bool,

    /// Cluster ids for generated caches (default: all clusters)
    #[arg(long, value_delimiter = ',')]
    pub clusters: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init(
        LoggingConfig::default()
            .verbose(cli.verbose)
            .json_logs(cli.json_logs),
    )?;

    if let Err(e) = gridcfg_settings::ensure_directories() {
        tracing::warn!("Failed to create gridcfg directories: {:#}", e);
    }

    let settings = GridcfgSettings::load()?;

    let prompt: Arc<dyn ImportPrompt> = if cli.yes {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(TerminalPrompt::new())
    };
    let ctx = Context::new(settings, cli.server, prompt, Arc::new(TerminalNotifier))?;

    match &cli.command {
        Commands::List { missing_keys } => commands::list(&ctx, *missing_keys).await,
        Commands::Import(args) => commands::import(&ctx, args).await,
        Commands::Remove { id } => commands::remove(&ctx, id).await,
        Commands::RemoveAll => commands::remove_all(&ctx).await,
        Commands::RemoveDemo => commands::remove_demo(&ctx).await,
    }
}
