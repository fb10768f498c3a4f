//! Tool configuration — persisted as JSON.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use modelfile::ParseOptions;
use serde::{Deserialize, Serialize};

/// Global configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub parse: ParseOptions,
    /// Treat advisory diagnostics (unknown commands) as failures.
    #[serde(default)]
    pub strict: bool,
}

impl AppConfig {
    /// Platform config directory: `~/.config/modelfile/`
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("modelfile")
    }

    fn config_file(path: Option<&Path>) -> PathBuf {
        path.map(Path::to_path_buf)
            .unwrap_or_else(|| Self::config_dir().join("config.json"))
    }

    /// Load from disk, or return defaults if the file doesn't exist.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = Self::config_file(path);
        if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            let cfg: Self = serde_json::from_str(&data)?;
            if cfg.parse.max_token_size == 0 {
                anyhow::bail!("{}: max_token_size must be greater than zero", path.display());
            }
            Ok(cfg)
        } else {
            Ok(Self::default())
        }
    }

    /// Persist to disk.
    pub fn save(&self, path: Option<&Path>) -> anyhow::Result<()> {
        let path = Self::config_file(path);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Parse options with any command-line override applied.
    pub fn parse_options(&self, max_token_size: Option<NonZeroUsize>) -> ParseOptions {
        ParseOptions {
            max_token_size: max_token_size.map_or(self.parse.max_token_size, NonZeroUsize::get),
        }
    }
}
