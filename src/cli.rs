use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use songbook::library::{Catalog, errors::Result};
use tokio::io::BufReader;

use crate::config::ConfigBuilder;
use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "songbook")]
#[command(version, about = "Keep a personal song catalog and shuffle through it", long_about = None)]
struct Cli {
    /// Song storage file [default: $SONGBOOK_FILE, then the local data directory]
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Seconds each song plays for [default: $SONGBOOK_PLAY_SECONDS, then 2]
    #[arg(long, global = true, conflicts_with = "real_time")]
    play_seconds: Option<u64>,

    /// Play each song for its full duration
    #[arg(long, global = true)]
    real_time: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a song to the end of the catalog
    Add {
        #[arg(long)]
        artist: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i32).range(0..))]
        play_count: i32,
        /// Duration in seconds
        #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
        duration: i32,
    },
    /// Remove the first song with this title, ignoring case
    Remove { title: String },
    /// Print the catalog in insertion order
    List {
        /// Only songs played more than this many times
        #[arg(long, allow_negative_numbers = true)]
        above: Option<i64>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Shuffle through the catalog; 's' skips, 'q' stops
    Play,
    /// Interactive menu (the default)
    Shell,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigBuilder::new()
        .storage_path(cli.file)
        .play_seconds(cli.play_seconds)
        .real_time(cli.real_time)
        .build()?;
    info!("Using song storage at {:?}", config.storage.path());

    let catalog = Catalog::open(config.storage);
    let mut shell = Shell::new(
        catalog,
        config.pace,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
    );

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Add {
            artist,
            title,
            play_count,
            duration,
        } => shell.add(artist, title, play_count, duration)?,
        Commands::Remove { title } => shell.remove(&title)?,
        Commands::List { above, json } => {
            if json {
                shell.list_json(above)?;
            } else {
                shell.list(above)?;
            }
        }
        Commands::Play => {
            let summary = shell.play().await?;
            info!(
                "Played {} songs ({} skipped, {} finished)",
                summary.played, summary.skipped, summary.finished
            );
        }
        Commands::Shell => shell.run().await?,
    }
    Ok(())
}
