//! Config file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::LogFormat;
use crate::codegen::TargetStyle;
use crate::errors::{CurlgenError, Result};

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "CURLGEN_CONFIG_DIR";

/// curlgen configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    /// Target style when -l is not given
    pub style: Option<TargetStyle>,
    /// Log format when --log-format is not given
    pub log_format: Option<LogFormat>,
    /// Extra flags prepended to the command line
    pub default_options: Vec<String>,
}

/// On-disk layout of config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    defaults: Defaults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Defaults {
    style: Option<TargetStyle>,
    log_format: Option<LogFormat>,
    #[serde(default)]
    options: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::empty(Self::default_config_dir())
    }
}

impl Config {
    fn empty(config_dir: PathBuf) -> Self {
        Self {
            config_dir,
            style: None,
            log_format: None,
            default_options: Vec::new(),
        }
    }

    /// Load configuration from the config file (TOML format)
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_config_dir())
    }

    /// Load `config.toml` from `config_dir`; a missing file means defaults
    pub fn load_from(config_dir: &Path) -> Result<Self> {
        let config_file = config_dir.join("config.toml");

        if !config_file.exists() {
            return Ok(Self::empty(config_dir.to_path_buf()));
        }

        let content = std::fs::read_to_string(&config_file)
            .map_err(|e| CurlgenError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(config_dir, &content)
    }

    fn parse(config_dir: &Path, content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| CurlgenError::Config(format!("Invalid config TOML: {}", e)))?;

        Ok(Self {
            config_dir: config_dir.to_path_buf(),
            style: file.defaults.style,
            log_format: file.defaults.log_format,
            default_options: file.defaults.options,
        })
    }

    /// Get the default config directory
    pub fn default_config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .map(|p| p.join("curlgen"))
            .unwrap_or_else(|| PathBuf::from(".curlgen"))
    }
}
