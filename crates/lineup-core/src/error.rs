//! Error types for the lineup tagging pipeline.
//!
//! Errors are organized by stage to provide clear, actionable error messages
//! that include relevant context (file paths, stage names, specific issues).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for lineup operations.
#[derive(Error, Debug)]
pub enum LineupError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Runtime override string is not valid JSON
    #[error("Invalid runtime override: {0}")]
    OverrideError(#[from] serde_json::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input path does not exist. Aborts the batch before any output is written.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Input is not an image. Aborts the batch before any output is written.
    #[error("Unsupported file type for {path}: {message}")]
    UnsupportedFileType { path: PathBuf, message: String },

    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Player info or player map file could not be loaded
    #[error("Roster error for {path}: {message}")]
    Roster { path: PathBuf, message: String },

    /// Vision model call failed
    #[error("Model error: {message}")]
    Llm {
        message: String,
        status_code: Option<u16>,
    },

    /// Generated transcript did not contain the expected assistant marker
    #[error("Malformed model output: {message}")]
    MalformedOutput { message: String },
}

/// Convenience type alias for lineup results.
pub type Result<T> = std::result::Result<T, LineupError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
