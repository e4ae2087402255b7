//! Application configuration.
//!
//! Values are layered: built-in defaults, then `config.toml` in the user's
//! config directory, then `MOVIELINK_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

const APP_DIR: &str = "movielink";
const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "MOVIELINK";
const API_KEY_FALLBACK_VAR: &str = "TMDB_API_KEY";

const DEFAULT_CONFIG: &str = r#"# movielink configuration

# TMDB v3 API key. Without one the game only uses the local movie cache.
# tmdb_api_key = ""

tmdb_base_url = "https://api.themoviedb.org/3"

# Pages of TMDB's popular list fetched when no cache exists (20 movies each).
preload_pages = 25

# Maximum autocomplete suggestions shown under the input.
suggestion_limit = 5

# Seconds each player has to name a movie.
turn_time_limit_secs = 60
"#;

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// TMDB v3 API key; `None` keeps the catalog offline.
    pub tmdb_api_key: Option<String>,
    /// Base URL of the TMDB v3 API.
    pub tmdb_base_url: String,
    /// JSON snapshot of the preloaded catalog.
    pub cache_path: PathBuf,
    /// Popular-list pages fetched when the cache is missing.
    pub preload_pages: u32,
    /// Suggestions returned per query.
    pub suggestion_limit: usize,
    /// Seconds allowed per turn.
    pub turn_time_limit_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let cache_path = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR)
            .join("movie_cache.json");
        Self {
            tmdb_api_key: None,
            tmdb_base_url: "https://api.themoviedb.org/3".to_string(),
            cache_path,
            preload_pages: 25,
            suggestion_limit: 5,
            turn_time_limit_secs: 60,
        }
    }
}

impl AppConfig {
    /// Load from the default config file and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load from `path` (which may be absent) and the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::layered(
            path,
            Some(Environment::with_prefix(ENV_PREFIX).try_parsing(true)),
        )?;
        if config.tmdb_api_key.is_none() {
            config.tmdb_api_key = std::env::var(API_KEY_FALLBACK_VAR)
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
        info!(
            path = %path.display(),
            online = config.tmdb_api_key.is_some(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Time allowed for a single turn.
    pub fn turn_time_limit(&self) -> Duration {
        Duration::from_secs(self.turn_time_limit_secs)
    }

    fn layered(path: &Path, env: Option<Environment>) -> Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("failed to encode default config")?;
        let mut builder = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.to_path_buf()).required(false));
        if let Some(env) = env {
            builder = builder.add_source(env);
        }

        let mut config: Self = builder
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("invalid config {}", path.display()))?;
        if config
            .tmdb_api_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            config.tmdb_api_key = None;
        }
        Ok(config)
    }
}

/// Location of the user's config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

/// Write a commented default config file if none exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!(path = %path.display(), "wrote default config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::layered(&dir.path().join("config.toml"), None)?;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.turn_time_limit(), Duration::from_secs(60));
        Ok(())
    }

    #[test]
    fn default_template_parses_to_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/config.toml");
        write_default_config(&path)?;
        assert!(path.exists());

        let config = AppConfig::layered(&path, None)?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "tmdb_api_key = \"abc123\"\nsuggestion_limit = 8\nturn_time_limit_secs = 30\ncache_path = \"/tmp/movies.json\"\n",
        )?;

        let config = AppConfig::layered(&path, None)?;
        assert_eq!(config.tmdb_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.suggestion_limit, 8);
        assert_eq!(config.turn_time_limit(), Duration::from_secs(30));
        assert_eq!(config.cache_path, PathBuf::from("/tmp/movies.json"));
        assert_eq!(config.preload_pages, 25);
        Ok(())
    }

    #[test]
    fn blank_api_key_is_treated_as_missing() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "tmdb_api_key = \"  \"\n")?;
        assert!(AppConfig::layered(&path, None)?.tmdb_api_key.is_none());
        Ok(())
    }

    #[test]
    fn existing_config_is_left_alone() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "preload_pages = 2\n")?;
        write_default_config(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "preload_pages = 2\n");
        Ok(())
    }
}
