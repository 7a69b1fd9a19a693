//! Logibooks command-line shell.
//!
//! Thin shell over `logibooks-client`: resolves configuration, sets up
//! logging and runs one command. Business logic lives in `crates/`.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use logibooks_client::{
    AppContext, ClientError, FileStorage, HttpTransport, ResourceState, UiStatePersistence,
};
use logibooks_core::{
    build_tooltip, classify, status_label, ClientConfig, RegisterId, RegistersFilter,
    RuntimeConfig,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "logibooks", version, about = "Logibooks customs-declaration client")]
struct Cli {
    /// Runtime config file; its values win over environment variables
    #[arg(long, env = "LOGIBOOKS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a check-status code without contacting the backend
    Classify {
        /// Raw status code
        code: i32,
        /// Include the qualifier in the label
        #[arg(long)]
        verbose: bool,
    },
    /// List the backend check-status dictionary
    Statuses,
    /// List the country classifier
    Countries {
        /// Ask the backend to refresh the classifier first
        #[arg(long)]
        update: bool,
    },
    /// List registers
    Registers {
        /// Case-insensitive search on file name and deal number
        #[arg(long, default_value = "")]
        search: String,
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one register with its per-status parcel counts
    Register {
        /// Register ID
        id: i64,
    },
}

/// Initialize tracing subscriber for logging
fn init_tracing(enable_log: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if enable_log {
        "info,logibooks=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

fn resolve_config(path: Option<&PathBuf>) -> Result<ClientConfig> {
    let runtime = match path {
        Some(path) => Some(
            RuntimeConfig::load_from(path)
                .with_context(|| format!("reading config {}", path.display()))?,
        ),
        None => RuntimeConfig::load()?,
    };
    let config = ClientConfig::resolve(runtime.as_ref());
    config.validate()?;
    Ok(config)
}

fn open_persistence() -> UiStatePersistence {
    let storage = ClientConfig::ui_state_dir()
        .map_err(ClientError::from)
        .and_then(FileStorage::new);
    match storage {
        Ok(storage) => UiStatePersistence::new(Arc::new(storage)),
        Err(err) => {
            tracing::warn!("UI state will not be persisted: {err}");
            UiStatePersistence::in_memory()
        }
    }
}

/// Turn a settled resource into its value or a reportable error.
fn settled<T>(what: &str, state: ResourceState<T>) -> Result<T> {
    match state.error {
        Some(err) => Err(anyhow!("failed to load {what}: {err}")),
        None => Ok(state.value),
    }
}

fn describe_code(code: i32, verbose: bool) -> String {
    format!(
        "{code}: {} [{:?}]",
        status_label(Some(code), verbose),
        classify(Some(code))
    )
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_ref())?;
    init_tracing(config.enable_log);
    info!("Starting Logibooks v{}", env!("CARGO_PKG_VERSION"));

    if let Command::Classify { code, verbose } = cli.command {
        println!("{}", describe_code(code, verbose));
        return Ok(());
    }

    let transport = Arc::new(HttpTransport::new(config.clone())?);
    let ctx = AppContext::new(config, transport, open_persistence());

    match cli.command {
        Command::Classify { .. } => {}
        Command::Statuses => {
            let store = ctx.check_statuses();
            store.load().await;
            for status in settled("check statuses", store.statuses().snapshot())? {
                println!("{:>5}  {}", status.id, status.title);
            }
        }
        Command::Countries { update } => {
            let store = ctx.country_codes();
            if update {
                store.update().await?;
            }
            store.load().await;
            for country in settled("countries", store.countries().snapshot())? {
                println!(
                    "{:>4}  {:<2}  {}",
                    country.iso_numeric, country.iso_alpha2, country.name_ru_short
                );
            }
        }
        Command::Registers { search, page } => {
            let store = ctx.registers();
            let filter = RegistersFilter {
                search,
                page,
                ..store.filter()
            };
            store.set_filter(filter)?;
            store.load().await;
            settled("registers", store.registers().snapshot())?;
            for register in store.visible() {
                println!(
                    "{:>6}  {}  {}",
                    register.id,
                    register.file_name.as_deref().unwrap_or("-"),
                    status_label(register.check_status_id, false)
                );
            }
        }
        Command::Register { id } => {
            let store = ctx.registers();
            store.get_by_id(RegisterId::new(id)?).await;
            let register = settled("register", store.current().snapshot())?
                .ok_or_else(|| anyhow!("register {id} not found"))?;
            println!(
                "{}  {}",
                register.id,
                register.file_name.as_deref().unwrap_or("-")
            );
            println!("{}", build_tooltip(&register));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    run(Cli::parse()).await
}
