use anyhow::Context;
use block_breakout_engine::BreakoutConfig;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk settings, one `[breakout]` table:
///
/// ```toml
/// [breakout]
/// breakout_blocks = ["header-one", "header-two"]
/// double_breakout_blocks = ["blockquote", "unordered-list-item"]
/// breakout_block_type = "unstyled"
/// ```
///
/// Any key left out falls back to [`BreakoutConfig::default`].
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub breakout: BreakoutConfig,
}

impl Config {
    /// Reads the file at `config_path`, `Ok(None)` when there is none yet
    pub fn read_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        let content = match std::fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::ConfigReadError {
                    config_path: config_path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        std::fs::write(config_path, toml::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write config file at {}", config_path.display()))
    }

    /// Loads `config_path`, or writes `initial()` there first when the file is missing.
    /// An existing file is never overwritten.
    pub fn load_or_init_at<P, F>(config_path: P, initial: F) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
        F: FnOnce() -> Self,
    {
        let config_path = config_path.as_ref();
        if let Some(config) = Self::read_from_path(config_path)? {
            return Ok(config);
        }
        let config = initial();
        config.write_to_path(config_path)?;
        Ok(config)
    }

    /// [`Config::load_or_init_at`] on [`Config::config_path`]
    pub fn load_or_init<F: FnOnce() -> Self>(initial: F) -> anyhow::Result<Self> {
        Self::load_or_init_at(Self::config_path(), initial)
    }

    /// `~/.config/block-breakout/config.toml`, home directory expanded
    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/block-breakout");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}
