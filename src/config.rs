//! Configuration with a small layered hierarchy
//!
//! Built-in defaults, then the global user config file, then environment
//! variables. The CLI `--db` flag (which also reads ALLOYREF_DB) wins over
//! everything here.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default database filename when nothing else is configured
const DEFAULT_DB: &str = "alloyref.db";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the reference database
    pub database: Option<PathBuf>,

    /// Default output format name (tsv, csv, md, json, yaml)
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // Global user config (~/.config/alloyref/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // Environment variables
        if let Ok(db) = std::env::var("ALLOYREF_DB") {
            if !db.is_empty() {
                config.database = Some(PathBuf::from(db));
            }
        }

        config
    }

    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "alloyref")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Resolve the database path: CLI flag, then config, then the default
    /// file in the working directory
    pub fn database_path(&self, cli_override: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_override {
            return path.to_path_buf();
        }
        self.database
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB))
    }
}
