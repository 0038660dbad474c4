//! `crudforge.toml` parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "crudforge.toml";

/// Project settings; command-line arguments take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Root schema file
    #[serde(default)]
    pub schema: Option<PathBuf>,

    /// Directory `generate` writes into
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            schema: None,
            output: None,
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Read `path`, or `crudforge.toml` in `dir` when it exists.
    ///
    /// An explicit path must exist; a missing default file gives the defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = dir.join(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Schema from the command line, else from the config.
    pub fn schema_path(&self, arg: Option<PathBuf>) -> Result<PathBuf> {
        arg.or_else(|| self.schema.clone()).context(
            "No schema given; pass a schema path or set `schema` in crudforge.toml",
        )
    }

    /// Output directory from the command line, else from the config.
    pub fn output_dir(&self, arg: Option<PathBuf>) -> Option<PathBuf> {
        arg.or_else(|| self.output.clone())
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
