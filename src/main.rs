use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use modcompat::check::{CompatibilityCheck, Trigger};
use modcompat::config::{CheckConfig, data_dir, db_path, log_path};
use modcompat::gamesupport::GameSupport;
use modcompat::state::{SqliteStore, StateStore, VersionBounds};
use modcompat::version::discovery::Discovery;

#[derive(Parser)]
#[command(name = "modcompat")]
#[command(version, about = "Game version compatibility checks for managed mods")]
struct Cli {
    /// Path to the state database (defaults to the data directory)
    #[arg(long, global = true)]
    state_db: Option<PathBuf>,

    /// JSON config with per-game policies
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a compatibility check for a game
    Check {
        /// Game id to check (e.g. "skyrimse")
        game: String,

        /// Discovery snapshot with installed paths and versions
        #[arg(long)]
        discovery: PathBuf,

        /// What triggered the check
        #[arg(long, value_enum, default_value_t = TriggerArg::GameActivated)]
        trigger: TriggerArg,

        /// Print the diagnostic as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage installed-mod records
    #[command(subcommand)]
    Mod(ModCommand),
}

#[derive(Subcommand)]
enum ModCommand {
    /// Register an installed mod with optional version bounds
    Add {
        game: String,
        mod_id: String,
        #[arg(long)]
        min_version: Option<String>,
        #[arg(long)]
        max_version: Option<String>,
    },
    /// List installed mods for a game
    List { game: String },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum TriggerArg {
    GameActivated,
    ModInstalled,
}

impl fmt::Display for TriggerArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerArg::GameActivated => f.write_str("game-activated"),
            TriggerArg::ModInstalled => f.write_str("mod-installed"),
        }
    }
}

impl From<TriggerArg> for Trigger {
    fn from(arg: TriggerArg) -> Self {
        match arg {
            TriggerArg::GameActivated => Trigger::GameActivated,
            TriggerArg::ModInstalled => Trigger::ModInstalled,
        }
    }
}

fn init_logging() -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(data_dir())?;
    let file = std::fs::File::options()
        .create(true)
        .append(true)
        .open(log_path())?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging()?;

    let db_path = cli.state_db.clone().unwrap_or_else(db_path);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = Arc::new(SqliteStore::new(&db_path)?);

    match cli.command {
        Command::Check {
            game,
            discovery,
            trigger,
            json,
        } => {
            let mut support = GameSupport::builtin();
            if let Some(path) = &cli.config {
                let config = CheckConfig::load(path)
                    .with_context(|| format!("failed to load config from {}", path.display()))?;
                support = config.apply(support);
            }

            let discovery = Discovery::load(&discovery)
                .with_context(|| "failed to load discovery snapshot".to_string())?;
            let check = CompatibilityCheck::new(Arc::new(support), store, discovery);

            let diagnostic = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(check.run(&game, trigger.into()))?;

            match diagnostic {
                Some(diagnostic) if json => {
                    println!("{}", serde_json::to_string_pretty(&diagnostic)?);
                }
                Some(diagnostic) => {
                    println!("{}: {}", diagnostic.severity, diagnostic.short_message);
                    println!();
                    println!("{}", diagnostic.long_message);
                }
                None => println!("No compatibility issues found for \"{game}\"."),
            }
        }
        Command::Mod(ModCommand::Add {
            game,
            mod_id,
            min_version,
            max_version,
        }) => {
            store.add_mod(
                &game,
                &mod_id,
                &VersionBounds {
                    min_version,
                    max_version,
                },
            )?;
            println!("Registered \"{mod_id}\" for \"{game}\".");
        }
        Command::Mod(ModCommand::List { game }) => {
            let mods = store.managed_mods(&game)?;
            if mods.is_empty() {
                println!("No mods registered for \"{game}\".");
            }
            for (mod_id, bounds) in mods {
                println!(
                    "{mod_id} (min: {}, max: {})",
                    bounds.min_version.as_deref().unwrap_or("-"),
                    bounds.max_version.as_deref().unwrap_or("-"),
                );
            }
        }
    }

    Ok(())
}
