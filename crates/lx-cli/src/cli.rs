//! CLI configuration and settings management

use crate::{CliError, Result};
use lx_core::config::SymTableConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOCAL_CONFIG_FILE: &str = "lexis.toml";

/// CLI configuration loaded from config files and environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Interning table sizing
    pub symtab: SymTableConfig,

    /// Output settings
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Include keywords when listing the symbol table
    pub show_keywords: bool,

    /// Colorize terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_keywords: true,
            color: true,
        }
    }
}

impl CliConfig {
    /// Load configuration from file, falling back to `lexis.toml`, then to the
    /// environment-adjusted defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Self::load_from_file(path)?,
            None if Path::new(LOCAL_CONFIG_FILE).exists() => {
                Self::load_from_file(Path::new(LOCAL_CONFIG_FILE))?
            }
            None => Self {
                symtab: SymTableConfig::from_env()?,
                ..Self::default()
            },
        };
        config.symtab.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CliError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| CliError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}
