//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Default catalog database, relative to the working directory
const DEFAULT_DATABASE: &str = "tpl_catalog.db";

/// Default test catalog database, selected by --test
const DEFAULT_TEST_DATABASE: &str = "tpl_catalog_test.db";

/// tplload configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the default catalog database
    pub database: Option<PathBuf>,

    /// Path to the test catalog database
    pub test_database: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/tplload/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(db) = std::env::var("TPLLOAD_DATABASE") {
            config.database = Some(PathBuf::from(db));
        }
        if let Ok(db) = std::env::var("TPLLOAD_TEST_DATABASE") {
            config.test_database = Some(PathBuf::from(db));
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "tplload")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.test_database.is_some() {
            self.test_database = other.test_database;
        }
    }

    /// Resolve the catalog path for this run
    pub fn database_path(&self, test: bool) -> PathBuf {
        if test {
            self.test_database
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEST_DATABASE))
        } else {
            self.database
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
        }
    }
}
