//! The `lineup tag` command for tagging images.

use clap::{Args, ValueEnum};
use lineup_core::pipeline::run_batch;
use lineup_core::{roster, Config, PlayerTagger, Task, VisionProviderFactory};
use std::collections::HashMap;
use std::path::PathBuf;

/// Arguments for the `tag` command.
#[derive(Args, Debug)]
pub struct TagArgs {
    /// Image files to tag
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Which tag to produce for each image
    #[arg(long, value_enum, default_value = "identify")]
    pub task: TaskArg,

    /// Runtime config overrides as a JSON object (e.g. '{"teams": ["Wolves"]}')
    #[arg(long)]
    pub config: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// Model backend
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,

    /// Model name (provider-specific)
    #[arg(long)]
    pub model: Option<String>,

    /// Directory for tag files (defaults to the configured tags dir)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Supported tagging tasks.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TaskArg {
    /// List the players visible in each photo
    Identify,
    /// Produce a one-line caption for each photo
    Caption,
}

impl From<TaskArg> for Task {
    fn from(value: TaskArg) -> Self {
        match value {
            TaskArg::Identify => Task::Identify,
            TaskArg::Caption => Task::Caption,
        }
    }
}

/// Supported model backends.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Provider {
    /// Local Ollama instance
    Ollama,
    /// OpenAI API
    Openai,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Ollama => write!(f, "ollama"),
            Provider::Openai => write!(f, "openai"),
        }
    }
}

/// Execute the tag command.
pub async fn execute(args: TagArgs) -> anyhow::Result<()> {
    let config = match &args.config_file {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Per-invocation runtime overrides are deep-merged over the config file
    // values, so a partial override keeps the remaining fields intact.
    let runtime = config.model.with_overrides(args.config.as_deref())?;

    let players = roster::load_player_info(&config.player_info_path())?;
    let player_map_path = config.player_map_path();
    let player_map = if player_map_path.exists() {
        roster::load_player_map(&player_map_path)?
    } else {
        tracing::debug!("No player map at {:?}, using model names as-is", player_map_path);
        HashMap::new()
    };

    let provider_name = args
        .provider
        .map(|p| p.to_string())
        .unwrap_or_else(|| config.llm.provider.clone());
    let provider =
        VisionProviderFactory::create(&provider_name, &config.llm, args.model.as_deref())?;

    tracing::info!(
        "Tagging {} file(s) with {} ({} teams configured)",
        args.files.len(),
        provider_name,
        runtime.teams.len()
    );

    let tagger = PlayerTagger::new(provider, &players, &runtime, player_map);
    let tags_dir = args.output_dir.unwrap_or_else(|| config.tags_dir());

    let written = run_batch(
        &args.files,
        &tagger,
        args.task.into(),
        &tags_dir,
        &config.limits,
    )
    .await?;

    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
