//! Sub-configuration structs with defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output storage settings.
///
/// Relative paths are resolved against the config file's directory when the
/// config is loaded from disk, so the tags directory can sit next to the
/// config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory where per-image tag files are written
    pub tags_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            tags_dir: PathBuf::from("tags"),
        }
    }
}

/// Base model runtime settings, overridable per run via `--config` JSON.
///
/// Immutable once merged; owned by a single tagger instance for its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Frames per second for video-capable deployments (images use 1)
    pub fps: u32,

    /// Allow tagging from a single frame
    pub allow_single_frame: bool,

    /// Teams whose players are eligible for identification
    pub teams: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            fps: 1,
            allow_single_frame: true,
            teams: Vec::new(),
        }
    }
}

/// Paths to the externally supplied data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// JSON array of `{team, name, jersey_number}` records
    pub player_info: PathBuf,

    /// JSON object mapping model-emitted aliases to canonical names,
    /// consumed by caption post-processing
    pub player_map: PathBuf,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            player_info: PathBuf::from("player_info.json"),
            player_map: PathBuf::from("player_map.json"),
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 10000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Model backend configurations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Active backend ("ollama" or "openai")
    pub provider: String,

    /// Ollama (local) configuration
    pub ollama: Option<OllamaConfig>,

    /// OpenAI-compatible endpoint configuration
    pub openai: Option<OpenAiConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            ollama: None,
            openai: None,
        }
    }
}

/// Ollama configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama API endpoint
    pub endpoint: String,

    /// Model name (the fine-tuned player identification weights)
    pub model: String,

    /// Request the raw decoded transcript and recover the assistant reply
    /// by marker split, for parity with raw decode pipelines
    pub raw_transcript: bool,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "player-id-vision".to_string(),
            raw_transcript: false,
        }
    }
}

/// OpenAI-compatible endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Chat completions base endpoint
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}
