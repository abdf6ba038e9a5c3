//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use lor_client::ClientConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// API base URL (e.g., http://localhost:8080/api).
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Directory holding the persisted session and cached responses.
    /// Defaults to `~/.lor/storage`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format.
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// Default server URL.
fn default_server_url() -> String {
    lor_client::transport::DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            storage_dir: None,
            timeout_secs: default_timeout_secs(),
            output_format: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from the default file.
    pub fn load() -> crate::CliResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from a file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> crate::CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| crate::CliError::Config(format!("failed to parse config: {e}")))
    }

    /// Saves configuration to the default file.
    pub fn save(&self) -> crate::CliResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves configuration to a file.
    pub fn save_to(&self, path: &Path) -> crate::CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::CliError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Gets the configuration file path.
    pub fn config_path() -> crate::CliResult<PathBuf> {
        Ok(lor_home()?.join("lor.toml"))
    }

    /// Gets the effective storage directory.
    pub fn effective_storage_dir(&self) -> crate::CliResult<PathBuf> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(lor_home()?.join("storage")),
        }
    }

    /// Builds the HTTP client settings, preferring the command-line server.
    #[must_use]
    pub fn client_config(&self, server_override: Option<&str>) -> ClientConfig {
        ClientConfig {
            base_url: server_override.map_or_else(|| self.server_url.clone(), str::to_string),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Sets a value by key.
    pub fn set(&mut self, key: &str, value: &str) -> crate::CliResult<()> {
        match key {
            "server_url" | "server" => {
                self.server_url = value.to_string();
            }
            "storage_dir" | "storage" => {
                self.storage_dir = if value.is_empty() || value == "none" {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "timeout_secs" | "timeout" => {
                self.timeout_secs = value.parse().map_err(|_| {
                    crate::CliError::InvalidArgument(format!(
                        "timeout must be a number of seconds, got {value}"
                    ))
                })?;
            }
            "output_format" | "output" => {
                self.output_format = value.parse()?;
            }
            _ => {
                return Err(crate::CliError::InvalidArgument(format!(
                    "Unknown configuration key: {}. Known keys: server_url, storage_dir, timeout_secs, output_format",
                    key
                )));
            }
        }
        Ok(())
    }
}

fn lor_home() -> crate::CliResult<PathBuf> {
    let home = dirs_next::home_dir()
        .ok_or_else(|| crate::CliError::Config("could not determine home directory".to_string()))?;
    Ok(home.join(".lor"))
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
    /// Quiet (minimal output).
    Quiet,
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            "quiet" => Ok(Self::Quiet),
            _ => Err(crate::CliError::InvalidArgument(format!(
                "Unknown output format: {}. Supported: table, json, yaml, quiet",
                s
            ))),
        }
    }
}
