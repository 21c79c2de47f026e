//! Configuration loading from e2ediff.toml
//!
//! Configuration can be specified in an `e2ediff.toml` file. It is discovered by
//! walking up from the current directory, or passed explicitly with `--config`.
//! Command-line flags override values from the file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Name of the configuration file looked up during discovery
pub const CONFIG_FILE_NAME: &str = "e2ediff.toml";

/// Default output path when neither the CLI nor the config names one
pub const DEFAULT_OUTPUT_FILE: &str = "e2e_comparison_results.csv";

/// e2ediff configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct E2eConfig {
    /// Input parsing configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// What to do with a row whose filename cannot be parsed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedPolicy {
    /// Fail the whole run (default)
    #[default]
    Abort,
    /// Log a warning, drop the row and continue
    Skip,
}

/// Input parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Column names assumed when the CSV has no header row
    #[serde(default = "default_columns")]
    pub default_columns: Vec<String>,
    /// Columns that are not metrics
    #[serde(default = "default_ignored_columns")]
    pub ignored_columns: Vec<String>,
    /// Handling of rows with a malformed filename: "abort" or "skip"
    #[serde(default)]
    pub on_malformed: MalformedPolicy,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            default_columns: default_columns(),
            ignored_columns: default_ignored_columns(),
            on_malformed: MalformedPolicy::default(),
        }
    }
}

fn default_columns() -> Vec<String> {
    [
        "filename",
        "total_duration",
        "c2s_throughput",
        "c2s_duration",
        "s2c_throughput",
        "s2c_duration",
        "latency",
        "error",
        "error_list",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_ignored_columns() -> Vec<String> {
    e2ediff_stats::DEFAULT_IGNORED_FIELDS
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the comparison is written
    #[serde(default = "default_output_path")]
    pub path: String,
    /// Output format: "csv" or "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Print the software summaries and comparison table to stdout
    #[serde(default = "default_console_report")]
    pub console_report: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: default_format(),
            console_report: default_console_report(),
        }
    }
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_FILE.to_string()
}
fn default_format() -> String {
    "csv".to_string()
}
fn default_console_report() -> bool {
    true
}

impl E2eConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Discover and load configuration by walking up from the current directory.
    ///
    /// Returns `Ok(None)` when no config file exists. A file that exists but
    /// fails to load is an error.
    pub fn discover() -> anyhow::Result<Option<Self>> {
        let dir = std::env::current_dir().context("failed to read current directory")?;
        Self::discover_from(&dir)
    }

    /// Discover and load configuration by walking up from `start`
    pub fn discover_from(start: &Path) -> anyhow::Result<Option<Self>> {
        for dir in start.ancestors() {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                let config = Self::load(&config_path)
                    .with_context(|| format!("failed to load config {}", config_path.display()))?;
                debug!(path = %config_path.display(), "loaded config");
                return Ok(Some(config));
            }
        }
        Ok(None)
    }
}
