//! Configuration management for lineup.
//!
//! Configuration is loaded from a TOML file with sensible defaults.
//! All config structs implement `Default` so a missing file still yields a
//! working (if roster-less) setup.

mod merge;
mod types;
mod validate;

pub use merge::merge_json;
pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for lineup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output storage settings
    pub storage: StorageConfig,

    /// Base model runtime settings
    pub model: RuntimeConfig,

    /// External data file paths
    pub container: ContainerConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Model backend settings
    pub llm: LlmConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    ///
    /// Relative storage and container paths are resolved against the config
    /// file's directory.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.validate()?;
        if let Some(base) = path.parent() {
            config.resolve_relative_paths(base);
        }
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories, falling back to
    /// ~/.lineup/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "lineup", "lineup")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".lineup").join("config.toml")
            })
    }

    /// Get the resolved tags output directory (with ~ expansion).
    pub fn tags_dir(&self) -> PathBuf {
        expand_tilde(&self.storage.tags_dir)
    }

    /// Get the resolved player-info file path (with ~ expansion).
    pub fn player_info_path(&self) -> PathBuf {
        expand_tilde(&self.container.player_info)
    }

    /// Get the resolved player-map file path (with ~ expansion).
    pub fn player_map_path(&self) -> PathBuf {
        expand_tilde(&self.container.player_map)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Anchor relative storage and container paths at `base`.
    fn resolve_relative_paths(&mut self, base: &Path) {
        for path in [
            &mut self.storage.tags_dir,
            &mut self.container.player_info,
            &mut self.container.player_map,
        ] {
            if path.is_relative() {
                *path = base.join(path.as_path());
            }
        }
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model.fps, 1);
        assert!(config.model.allow_single_frame);
        assert!(config.model.teams.is_empty());
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.storage.tags_dir, PathBuf::from("tags"));
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[storage]"));
        assert!(toml.contains("[model]"));
        assert!(toml.contains("[container]"));
    }

    #[test]
    fn test_load_from_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        write!(
            file,
            "[storage]\ntags_dir = \"tags\"\n\n\
             [container]\nplayer_info = \"players.json\"\n"
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.storage.tags_dir, dir.path().join("tags"));
        assert_eq!(config.container.player_info, dir.path().join("players.json"));
    }

    #[test]
    fn test_load_from_keeps_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        write!(file, "[storage]\ntags_dir = \"/var/lineup/tags\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.storage.tags_dir, PathBuf::from("/var/lineup/tags"));
    }

    #[test]
    fn test_load_from_parses_model_section() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        write!(
            file,
            "[model]\nfps = 2\nallow_single_frame = false\nteams = [\"Wolves\", \"Aces\"]\n"
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.model.fps, 2);
        assert!(!config.model.allow_single_frame);
        assert_eq!(config.model.teams, vec!["Wolves", "Aces"]);
    }
}
