//! User configuration, read from `config.toml` inside the data directory.
//! Every key is optional; a missing file means defaults throughout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".hymn-projector";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// SQLite file holding custom hymns, relative to the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,
    /// Hymnal JSON used instead of the built-in one.
    #[serde(default)]
    pub hymnal_path: Option<PathBuf>,
    /// Scripture JSON used instead of the built-in passages.
    #[serde(default)]
    pub bible_path: Option<PathBuf>,
    /// Liturgy JSON used instead of the built-in items.
    #[serde(default)]
    pub liturgy_path: Option<PathBuf>,
    /// Maximum number of lookup suggestions.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            database_file: default_database_file(),
            hymnal_path: None,
            bible_path: None,
            liturgy_path: None,
            search_limit: default_search_limit(),
        }
    }
}

impl AppConfig {
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.database_file)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_file() -> String {
    "hymns.sqlite".to_string()
}

fn default_search_limit() -> usize {
    10
}

/// Resolve `~/.hymn-projector`.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Load `config.toml` from `data_dir`, falling back to defaults when absent.
pub fn load_config(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = data_dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    parse_config(&text)
}

pub fn parse_config(text: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_config(dir.path()).unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "log_level = \"debug\"\nsearch_limit = 5\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.search_limit, 5);
        assert_eq!(config.database_file, "hymns.sqlite");
        assert_eq!(config.hymnal_path, None);
        assert_eq!(config.bible_path, None);
        assert_eq!(
            config.database_path(dir.path()),
            dir.path().join("hymns.sqlite")
        );
    }

    #[test]
    fn content_paths_are_read() {
        let config = parse_config(
            "bible_path = \"/srv/kjv.json\"\nliturgy_path = \"liturgy.json\"\n",
        )
        .unwrap();
        assert_eq!(config.bible_path, Some(PathBuf::from("/srv/kjv.json")));
        assert_eq!(config.liturgy_path, Some(PathBuf::from("liturgy.json")));
    }

    #[test]
    fn invalid_toml_is_reported() {
        assert!(matches!(
            parse_config("search_limit = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
