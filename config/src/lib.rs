//! Configuration loading for folio.
//!
//! Reads `~/.folio/config.toml`. Every section is optional; a missing file
//! means "use defaults".
//!
//! ```toml
//! [app]
//! ascii_only = false
//! high_contrast = false
//! page = "~/.folio/page.toml"
//!
//! [console]
//! prompt = "guest@folio:~$"
//! history_limit = 100
//! ```

mod page;

pub use page::{DEFAULT_PAGE, ModalSpec, NavSpec, PageError, PageSpec, SectionSpec};

use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Environment variable naming an alternative page markup file.
pub const PAGE_ENV_VAR: &str = "FOLIO_PAGE";

pub const DEFAULT_PROMPT: &str = "guest@folio:~$";

#[derive(Debug, Default, Deserialize)]
pub struct FolioConfig {
    pub app: Option<AppConfig>,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Page markup file replacing the built-in page. `~` expands to home.
    pub page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConsoleConfig {
    pub prompt: Option<String>,
    pub history_limit: Option<usize>,
}

impl FolioConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load from an explicit path. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Config loaded");
                Ok(Some(config))
            }
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        self.console
            .as_ref()
            .and_then(|console| console.prompt.as_deref())
            .map(str::trim)
            .filter(|prompt| !prompt.is_empty())
            .unwrap_or(DEFAULT_PROMPT)
    }

    #[must_use]
    pub fn history_limit(&self) -> Option<usize> {
        self.console.as_ref().and_then(|console| console.history_limit)
    }

    /// Page markup override: `FOLIO_PAGE` wins over `[app] page`.
    #[must_use]
    pub fn page_override(&self) -> Option<PathBuf> {
        if let Ok(value) = env::var(PAGE_ENV_VAR)
            && !value.trim().is_empty()
        {
            return Some(expand_home(value.trim()));
        }
        self.app
            .as_ref()
            .and_then(|app| app.page.as_deref())
            .map(expand_home)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".folio").join("config.toml"))
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}
