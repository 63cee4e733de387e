//! reelstash CLI
//!
//! Opens a record store and runs one cache operation against it

use clap::{Parser, Subcommand};
use reelstash_core::logging_facility::{init, Profile};
use reelstash_store::{LocalRecordStore, StoreConfig};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "reelstash")]
#[command(about = "reelstash - local movie and poster cache", long_about = None)]
struct Cli {
    /// TOML store configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file (overrides the configured path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Emit JSON logs instead of human-readable ones
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Movie list operations
    Movies(commands::movies::MoviesArgs),
    /// Poster image operations
    Images(commands::images::ImagesArgs),
}

fn open_store(cli: &Cli) -> Result<LocalRecordStore, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.path = db.clone();
    }
    Ok(LocalRecordStore::open(&config)?)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(&cli)?;
    match cli.command {
        Commands::Movies(args) => commands::movies::execute(&store, args),
        Commands::Images(args) => commands::images::execute(&store, args),
    }
}

fn main() {
    let cli = Cli::parse();

    init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
