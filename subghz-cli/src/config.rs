//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use subghz_decoder::RenderConfig;

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub inputs: Vec<InputConfig>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// One capture file or directory, with an optional explicit array name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InputConfig {
    pub path: PathBuf,
    pub name: Option<String>,
}

impl InputConfig {
    pub fn new(path: impl Into<PathBuf>, name: Option<&str>) -> Self {
        Self {
            path: path.into(),
            name: name.map(str::to_string),
        }
    }

    /// Parse a command-line input of the form `PATH` or `PATH=NAME`.
    /// An argument naming an existing file or directory is always a plain path.
    pub fn from_arg(arg: &str) -> Self {
        if Path::new(arg).exists() {
            return Self::new(arg, None);
        }
        match arg.rsplit_once('=') {
            Some((path, name)) if !path.is_empty() && !name.is_empty() => {
                Self::new(path, Some(name))
            }
            _ => Self::new(arg, None),
        }
    }
}

/// Inputs used when nothing is given on the command line or in the config
pub fn default_inputs() -> Vec<InputConfig> {
    vec![
        InputConfig::new("off.sub", Some("signalOff")),
        InputConfig::new("on.sub", Some("signalOn")),
    ]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
    /// Echo the generated arrays to the console
    #[serde(default = "default_true")]
    pub print: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: OutputFormat::default(),
            print: true,
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("signal_arrays.h")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// C header with one array per capture
    #[default]
    Header,
    /// JSON report with metadata and timings
    Json,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if config.render.values_per_line == 0 {
        anyhow::bail!("render.values_per_line must be at least 1 in {:?}", path);
    }

    Ok(config)
}
