//! Lineup CLI - Player tagging for sports photographs.
//!
//! Lineup identifies the players in sports photos using a vision-language
//! model guided by the photo's XMP headline and a team roster, and writes
//! one JSON tag file per input image.
//!
//! # Usage
//!
//! ```bash
//! # Tag one or more photos
//! lineup tag photo1.jpg photo2.jpg
//!
//! # Caption instead of identify, with a runtime override
//! lineup tag photo.jpg --task caption --config '{"teams": ["Wolves"]}'
//!
//! # View configuration
//! lineup config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Lineup - Player tagging for sports photographs.
#[derive(Parser, Debug)]
#[command(name = "lineup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Tag images with player identifications or captions
    Tag(cli::tag::TagArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match lineup_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `lineup config path`."
            );
            lineup_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Lineup v{}", lineup_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Tag(args) => cli::tag::execute(args).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
