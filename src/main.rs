//! addrbook CLI - Command-line interface for the address book

mod commands;

use addrbook::SortOrder;
use addrbook::config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "addrbook")]
#[command(version)]
#[command(about = "Single-user address book backed by a local SQLite file")]
#[command(long_about = r#"
addrbook keeps contacts (first name, last name, phone, email) in a local
SQLite file and lets you add, list, update and delete them.

Example usage:
  addrbook add --first Jane --last Doe --phone 555-1212 --email jane@x.com
  addrbook list --order desc
  addrbook update --id 1 --first Jane --last Smith
  addrbook dump --output backup.sql
  addrbook shell
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and contact table if missing
    Init {
        /// Drop and recreate the contact table, deleting every contact
        #[arg(long)]
        reset: bool,
    },

    /// Add a contact
    Add {
        #[arg(short, long)]
        first: String,

        #[arg(short, long)]
        last: String,

        #[arg(short, long, default_value = "")]
        phone: String,

        #[arg(short, long, default_value = "")]
        email: String,
    },

    /// List all contacts ordered by last name
    List {
        /// Sort order (asc, desc)
        #[arg(short, long)]
        order: Option<SortOrder>,
    },

    /// Show one contact
    Show {
        #[arg(long)]
        id: i64,
    },

    /// Replace all fields of a contact
    Update {
        #[arg(long)]
        id: i64,

        #[arg(short, long)]
        first: String,

        #[arg(short, long)]
        last: String,

        #[arg(short, long, default_value = "")]
        phone: String,

        #[arg(short, long, default_value = "")]
        email: String,
    },

    /// Delete a contact
    Delete {
        #[arg(long)]
        id: i64,
    },

    /// Write the whole store as SQL statements
    Dump {
        /// Destination file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the contact table with a dump file
    Restore {
        /// Dump file to replay
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show statistics about the store
    Stats,

    /// Interactive address book
    Shell {
        /// Sort order (asc, desc)
        #[arg(short, long)]
        order: Option<SortOrder>,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print version information
    Version,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config file with the resolved settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

pub fn emit_success(
    output_mode: OutputMode,
    command: &str,
    data: serde_json::Value,
) -> anyhow::Result<()> {
    if output_mode == OutputMode::Json {
        let envelope = serde_json::json!({
            "ok": true,
            "command": command,
            "data": data,
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }
    Ok(())
}

fn emit_failure(command: &str, err: &anyhow::Error) {
    let envelope = serde_json::json!({
        "ok": false,
        "command": command,
        "error": format!("{:#}", err),
    });
    println!("{}", envelope);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    addrbook::output::set_quiet(cli.quiet);
    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    let command_name = command_name(&cli.command);

    match run(cli, output_mode) {
        Err(e) if output_mode == OutputMode::Json => {
            emit_failure(command_name, &e);
            std::process::exit(1);
        }
        other => other,
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Init { .. } => "init",
        Commands::Add { .. } => "add",
        Commands::List { .. } => "list",
        Commands::Show { .. } => "show",
        Commands::Update { .. } => "update",
        Commands::Delete { .. } => "delete",
        Commands::Dump { .. } => "dump",
        Commands::Restore { .. } => "restore",
        Commands::Stats => "stats",
        Commands::Shell { .. } => "shell",
        Commands::Config { .. } => "config",
        Commands::Version => "version",
    }
}

fn run(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let settings = config::load_config(Some(&config_path))?.unwrap_or_default();
    let database = settings.resolve_database(cli.database);
    tracing::debug!("Using database {}", database.display());

    match cli.command {
        Commands::Init { reset } => commands::run_init(output_mode, &database, reset),
        Commands::Add { first, last, phone, email } => {
            let fields = addrbook::ContactFields::new(first, last, phone, email);
            commands::run_add(output_mode, &database, fields)
        }
        Commands::List { order } => {
            commands::run_list(output_mode, &database, settings.resolve_order(order))
        }
        Commands::Show { id } => commands::run_show(output_mode, &database, id),
        Commands::Update { id, first, last, phone, email } => {
            let fields = addrbook::ContactFields::new(first, last, phone, email);
            commands::run_update(output_mode, &database, id, fields)
        }
        Commands::Delete { id } => commands::run_delete(output_mode, &database, id),
        Commands::Dump { output } => {
            commands::run_dump(output_mode, &database, &settings.resolve_dump_path(output))
        }
        Commands::Restore { input } => commands::run_restore(output_mode, &database, &input),
        Commands::Stats => {
            commands::run_stats(output_mode, &database, settings.resolve_order(None))
        }
        Commands::Shell { order } => commands::run_shell(&database, settings.resolve_order(order)),
        Commands::Config { action: ConfigAction::Init { force } } => {
            let resolved = config::AddrbookConfig {
                database: Some(database.display().to_string()),
                order: Some(settings.resolve_order(None)),
                dump_path: Some(settings.resolve_dump_path(None).display().to_string()),
            };
            commands::run_config_init(output_mode, &config_path, &resolved, force)
        }
        Commands::Version => commands::run_version(output_mode),
    }
}
