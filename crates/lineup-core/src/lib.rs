//! Lineup Core - Sports photo player tagging library.
//!
//! Lineup identifies the players visible in sports photographs using a
//! vision-language model, guided by the photo's embedded XMP headline and a
//! team roster, and writes the result as structured JSON tag files.
//!
//! # Architecture
//!
//! Lineup is a pure pipeline with no database dependencies:
//!
//! ```text
//! Image → Validate → Decode → XMP Headline → Prompt (roster) → VLM → tags/*.json
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use lineup_core::{Config, PlayerTagger, Task, VisionProviderFactory};
//! use lineup_core::pipeline::run_batch;
//!
//! #[tokio::main]
//! async fn main() -> lineup_core::Result<()> {
//!     let config = Config::load()?;
//!     let provider = VisionProviderFactory::create(&config.llm.provider, &config.llm, None)?;
//!     let players = lineup_core::roster::load_player_info(&config.player_info_path())?;
//!     let tagger = PlayerTagger::new(provider, &players, &config.model, Default::default());
//!
//!     let written = run_batch(
//!         &[std::path::PathBuf::from("./photo.jpg")],
//!         &tagger,
//!         Task::Identify,
//!         &config.tags_dir(),
//!         &config.limits,
//!     )
//!     .await?;
//!     println!("Wrote {:?}", written);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod roster;
pub mod tagger;
pub mod types;
pub mod xmp;

// Re-exports for convenient access
pub use config::{Config, RuntimeConfig};
pub use error::{ConfigError, LineupError, PipelineError, PipelineResult, Result};
pub use llm::{VisionProvider, VisionProviderFactory};
pub use pipeline::{run_batch, tag_file_name};
pub use tagger::{PlayerTagger, Task};
pub use types::{BoundingBox, CaptionContext, FilteredRoster, FrameTag, PlayerRecord};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
