use crate::history;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PIPESH_CONFIG";

/// Interpreter settings. Every field may be omitted from the file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Prompt printed before each interactive line.
    pub prompt: String,
    /// Number of lines the history log keeps.
    pub history_capacity: usize,
    /// Most arguments one command may have, before and after wildcard expansion.
    pub max_args: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "pipesh> ".to_string(),
            history_capacity: history::DEFAULT_CAPACITY,
            max_args: 100,
        }
    }
}

impl Config {
    /// Load configuration with resolution order:
    /// 1. The file named by `$PIPESH_CONFIG`
    /// 2. ~/.config/pipesh/config.toml
    /// 3. Built-in defaults
    ///
    /// An unreadable or malformed file is reported and the defaults are used.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(config) => {
                log::debug!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("ignoring config {}: {e}", path.display());
                Self::default()
            }
        }
    }

    fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let home = std::env::var_os("HOME")?;
        let path = Path::new(&home).join(".config/pipesh/config.toml");
        path.is_file().then_some(path)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        anyhow::ensure!(config.max_args > 0, "max_args must be at least 1");
        Ok(config)
    }
}
