use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{EncoreError, EncoreResult};
use crate::services::recents::DEFAULT_CAPACITY;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub recents: RecentsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before the gateway is called
    pub debounce_ms: u64,
    pub max_exact_matches: usize,
    pub max_recommendations: usize,
    /// Shared cap across both buckets; exact matches fill it first
    pub max_total_results: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentsConfig {
    /// Number of entries kept in the persisted store
    pub capacity: usize,
    /// Number of entries shown for the empty query
    pub display_limit: usize,
    /// Storage file; `~` is expanded. Empty means the platform data dir.
    pub path: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 250,
            max_exact_matches: 10,
            max_recommendations: 10,
            max_total_results: 16,
        }
    }
}

impl Default for RecentsConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            display_limit: 8,
            path: String::new(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl RecentsConfig {
    /// Resolve the recents file, falling back to `<data_dir>/encore/recents.json`
    pub fn resolved_path(&self) -> PathBuf {
        if !self.path.trim().is_empty() {
            let expanded = shellexpand::tilde(&self.path);
            return PathBuf::from(expanded.as_ref());
        }

        dirs::data_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".local").join("share"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("encore")
            .join("recents.json")
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("encore")
            .join("config.toml")
    }

    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`; unreadable or invalid files fall back to defaults
    pub fn load_from(path: &Path) -> Self {
        let mut config = if path.exists() {
            match Self::read(path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "falling back to default config");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.validate();
        config
    }

    fn read(path: &Path) -> EncoreResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate and clamp config values to acceptable ranges
    fn validate(&mut self) {
        self.search.debounce_ms = self.search.debounce_ms.clamp(50, 2000);
        self.search.max_exact_matches = self.search.max_exact_matches.clamp(1, 50);
        self.search.max_recommendations = self.search.max_recommendations.clamp(1, 50);
        self.search.max_total_results = self.search.max_total_results.clamp(1, 100);

        self.recents.capacity = self.recents.capacity.clamp(1, 100);
        // Showing more than we keep is meaningless
        self.recents.display_limit = self.recents.display_limit.clamp(1, self.recents.capacity);
    }

    /// Save config to the default location
    pub fn save(&self) -> EncoreResult<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> EncoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| EncoreError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml"));

        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.recents.capacity, 10);
        assert_eq!(config.recents.display_limit, 8);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search]\ndebounce_ms = 300\n").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.search.max_exact_matches, 10);
        assert_eq!(config.recents.capacity, 10);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "search = 12").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.search.debounce_ms, 250);
    }

    #[test]
    fn test_validate_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[search]\ndebounce_ms = 1\n\n[recents]\ncapacity = 4\ndisplay_limit = 9\n",
        )
        .unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.search.debounce_ms, 50);
        assert_eq!(config.recents.capacity, 4);
        assert_eq!(config.recents.display_limit, 4);
    }

    #[test]
    fn test_save_round_trips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.search.max_total_results = 12;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.search.max_total_results, 12);
    }

    #[test]
    fn test_explicit_recents_path_is_used() {
        let recents = RecentsConfig {
            path: "/var/tmp/encore-recents.json".to_string(),
            ..RecentsConfig::default()
        };
        assert_eq!(
            recents.resolved_path(),
            PathBuf::from("/var/tmp/encore-recents.json")
        );
    }
}
