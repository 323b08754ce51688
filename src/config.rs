//! Configuration file (`depgraph.toml`) and output settings

use depgraph_writer::View;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE: &str = "depgraph.toml";

/// Errors raised while loading the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Invalid config {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
}

/// Output encoding of the `render` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Dot,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dot" => Ok(OutputFormat::Dot),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format '{}' (expected dot or json)", other)),
        }
    }
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Custom template files; built-in templates are used when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatePaths {
    pub graph: Option<PathBuf>,
    pub subgraph: Option<PathBuf>,
}

/// Module-prefix allow-lists (glob patterns).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Modules to draw. Empty draws all.
    pub modules: Vec<String>,
    /// Modules whose private functions are drawn. Empty draws none.
    pub private: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Output file; `-` writes to stdout. Defaults to `out.dot` or
    /// `out.json` depending on `format`.
    pub output: Option<PathBuf>,
    /// Name of the emitted digraph.
    pub name: String,
    pub view: View,
    pub format: OutputFormat,
    pub templates: TemplatePaths,
    pub filter: FilterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output: None,
            name: "depgraph".to_string(),
            view: View::Functions,
            format: OutputFormat::Dot,
            templates: TemplatePaths::default(),
            filter: FilterConfig::default(),
        }
    }
}

impl Config {
    /// Load `explicit` if given, else `depgraph.toml` in the working
    /// directory if present, else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let config = toml::from_str(&text).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => PathBuf::from(format!("out.{}", self.format.extension())),
        }
    }

    pub fn to_stdout(&self) -> bool {
        self.output.as_deref() == Some(Path::new("-"))
    }
}
