//! Poster image commands
//!
//! Usage:
//!   reelstash images save <ID> <URL> <FILE>
//!   reelstash images get <ID> <OUT_FILE>

use clap::{Args, Subcommand};
use reelstash_store::LocalRecordStore;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImagesArgs {
    #[command(subcommand)]
    pub command: ImagesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ImagesCommand {
    /// Cache the bytes of FILE as the image for ID
    Save(SaveArgs),
    /// Write the cached image for ID to OUT_FILE
    Get(GetArgs),
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    pub id: String,
    /// Where the bytes were fetched from
    pub url: String,
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    pub id: String,
    pub out: PathBuf,
}

pub fn execute(
    store: &LocalRecordStore,
    args: ImagesArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        ImagesCommand::Save(save_args) => {
            let blob = std::fs::read(&save_args.file)?;
            let report = store.save_image(&save_args.id, &save_args.url, &blob)?;
            println!(
                "Saved image {} ({} bytes): {} inserted, {} updated",
                save_args.id,
                blob.len(),
                report.inserted,
                report.updated
            );
            Ok(())
        }
        ImagesCommand::Get(get_args) => match store.get_image(&get_args.id)? {
            Some(blob) => {
                std::fs::write(&get_args.out, &blob)?;
                println!("Wrote {} bytes to {}", blob.len(), get_args.out.display());
                Ok(())
            }
            None => Err(format!("no image cached for {}", get_args.id).into()),
        },
    }
}
