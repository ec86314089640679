#![forbid(unsafe_code)]

//! `catcare`: household cat-care tracker CLI.
//!
//! Loads configuration, opens the household database, and reports or
//! records care-task progress.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use catcare::care::task_key::TaskKey;
use catcare::config::GlobalConfig;
use catcare::models::care_log::NewCareLog;
use catcare::models::definition::CareTaskDefinition;
use catcare::persistence::db;
use catcare::persistence::sqlite_store::SqliteStore;
use catcare::store::CareStore;
use catcare::{catchup, AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "catcare", about = "Household cat-care tracker", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: PathBuf,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show today's care tasks and progress.
    Status,

    /// List everything waiting for attention, most urgent first.
    CatchUp,

    /// Record a completed care task.
    Log {
        /// Task type, e.g. `feed:morning` or `litter`.
        task_type: String,
        /// Cat the task was done for.
        #[arg(long)]
        cat: Option<String>,
        /// Free-text memo.
        #[arg(long)]
        note: Option<String>,
    },

    /// Soft-delete a previously recorded log.
    Undo {
        /// Care log ID.
        id: String,
    },

    /// Start tracking a task definition again.
    Enable {
        /// Definition ID.
        id: String,
    },

    /// Stop tracking a task definition without deleting it.
    Disable {
        /// Definition ID.
        id: String,
    },

    /// Record a new stock level for an inventory item.
    Restock {
        /// Inventory item ID.
        id: String,
        /// Units now on hand.
        remaining: u32,
    },

    /// Import task definitions from a JSON array.
    Import {
        /// Path to the JSON file.
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    let config = GlobalConfig::load_from_path(&args.config)?;
    info!(household = %config.household_id, "configuration loaded");

    let db = Arc::new(db::connect(&config.db_path).await?);
    let store = SqliteStore::new(db, config.household_id.clone(), config.actor_id.clone());
    let settings = &config.household;

    match args.command {
        Command::Status => {
            let (summary, _) = catchup::collect(&store, settings, Utc::now()).await?;
            println!(
                "{}  {}/{} done ({:.0}%)",
                summary.business_date,
                summary.completed,
                summary.total,
                summary.progress() * 100.0
            );
            for instance in &summary.instances {
                let mark = if instance.done { "x" } else { " " };
                println!("[{mark}] {}", instance.label);
            }
        }
        Command::CatchUp => {
            let (_, items) = catchup::collect(&store, settings, Utc::now()).await?;
            if items.is_empty() {
                println!("All caught up.");
            }
            for item in &items {
                println!("{:>3}  {:<9}  {}", item.severity, format!("{:?}", item.kind()), item.title);
            }
        }
        Command::Log {
            task_type,
            cat,
            note,
        } => {
            let raw = task_type.trim();
            let definitions = store.list_definitions().await?;
            let task_type = if definitions.iter().any(|definition| definition.id == raw) {
                raw.to_owned()
            } else {
                TaskKey::parse(raw).canonical()
            };
            let log = store
                .add_care_log(NewCareLog {
                    task_type,
                    cat_id: cat,
                    notes: note,
                    images: Vec::new(),
                })
                .await?;
            println!("{}", log.id);
        }
        Command::Undo { id } => {
            let log = store.care_log(&id).await?;
            store.delete_care_log(&id).await?;
            println!("Removed {} ({id})", log.task_type);
        }
        Command::Enable { id } => {
            store.set_definition_enabled(&id, true).await?;
            info!(definition = %id, "definition enabled");
        }
        Command::Disable { id } => {
            store.set_definition_enabled(&id, false).await?;
            info!(definition = %id, "definition disabled");
        }
        Command::Restock { id, remaining } => {
            store.restock(&id, remaining).await?;
            info!(item = %id, remaining, "stock level recorded");
        }
        Command::Import { path } => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|err| AppError::Io(format!("cannot read {}: {err}", path.display())))?;
            let definitions: Vec<CareTaskDefinition> = serde_json::from_str(&raw)?;
            for (position, mut definition) in (0_i64..).zip(definitions) {
                definition.household_id.clone_from(&config.household_id);
                store.definitions().upsert(&definition, position).await?;
            }
            info!(path = %path.display(), "definitions imported");
        }
    }

    Ok(())
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter).with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
