//! Roster CLI
//!
//! Drives the core `api` boundary against a local SQLite database and prints
//! each JSON response body.

use anyhow::Context;
use clap::{Parser, Subcommand};
use roster_core::{init_logging, Api, ApiResponse, RosterConfig, Store};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(about = "Roster - people, notes and todos", long_about = None)]
struct Cli {
    /// TOML config file; `ROSTER_*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding config and environment.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Person operations
    People(commands::people::PeopleArgs),
    /// Note operations
    Notes(commands::notes::NotesArgs),
    /// Todo operations
    Todos(commands::todos::TodosArgs),
    /// Create the demo person with one note
    Seed,
}

fn main() {
    match run(Cli::parse()) {
        Ok(response) => {
            print_body(&response);
            if !response.is_success() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ApiResponse> {
    let mut config = RosterConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    init_logging(&config.log_level, config.log_dir.as_deref()).context("starting logging")?;
    log::debug!(
        "event=cli_start module=cli status=ok version={}",
        roster_core::core_version()
    );

    let store = Store::open(&config.db_path)
        .with_context(|| format!("opening database `{}`", config.db_path.display()))?;
    let api = Api::new(&store);

    let response = match cli.command {
        Commands::People(args) => commands::people::execute(&api, args),
        Commands::Notes(args) => commands::notes::execute(&api, args),
        Commands::Todos(args) => commands::todos::execute(&api, args),
        Commands::Seed => commands::seed::execute(&api)?,
    };
    Ok(response)
}

fn print_body(response: &ApiResponse) {
    if response.body.is_null() {
        return;
    }
    match serde_json::to_string_pretty(&response.body) {
        Ok(text) if response.is_success() => println!("{text}"),
        Ok(text) => eprintln!("{text}"),
        Err(e) => eprintln!("Error: {e}"),
    }
}
