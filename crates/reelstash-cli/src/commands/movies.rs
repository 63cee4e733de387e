//! Movie list commands
//!
//! Usage:
//!   reelstash movies save <JSON_FILE>
//!   reelstash movies list

use clap::{Args, Subcommand};
use reelstash_core::MovieRecord;
use reelstash_store::LocalRecordStore;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MoviesArgs {
    #[command(subcommand)]
    pub command: MoviesCommand,
}

#[derive(Debug, Subcommand)]
pub enum MoviesCommand {
    /// Cache a JSON array of movies (objects with at least `id` and `title`)
    Save(SaveArgs),
    /// Print cached movies as a JSON array
    List,
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Path to the JSON file
    pub path: PathBuf,
}

pub fn execute(
    store: &LocalRecordStore,
    args: MoviesArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        MoviesCommand::Save(save_args) => execute_save(store, save_args),
        MoviesCommand::List => execute_list(store),
    }
}

fn execute_save(
    store: &LocalRecordStore,
    args: SaveArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(&args.path)?;
    let movies: Vec<MovieRecord> = serde_json::from_str(&content)?;

    let report = store.save_movies(&movies)?;
    println!(
        "Saved {} movies: {} inserted, {} updated, {} skipped",
        movies.len(),
        report.inserted,
        report.updated,
        report.skipped
    );
    Ok(())
}

fn execute_list(store: &LocalRecordStore) -> Result<(), Box<dyn std::error::Error>> {
    let movies = store.get_movies()?;
    println!("{}", serde_json::to_string_pretty(&movies)?);
    Ok(())
}
