use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::varint::DecodeMode;

pub const DEFAULT_CONFIG_FILE: &str = "protovarint.toml";
pub const DEFAULT_LOG_FILTER: &str = "protovarint=info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub decode_mode: DecodeMode,
    pub output: OutputFormat,
    pub log_filter: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            decode_mode: DecodeMode::Prefix,
            output: OutputFormat::Text,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ToolConfig {
    /// Load `config_path`, or `protovarint.toml` if present, else defaults.
    ///
    /// An explicitly named file must exist.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config_file = config_path.unwrap_or(DEFAULT_CONFIG_FILE);

        if !Path::new(config_file).exists() {
            if config_path.is_some() {
                anyhow::bail!("config file not found: {}", config_file);
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_file)
            .with_context(|| format!("reading {}", config_file))?;
        let config: ToolConfig =
            toml::from_str(&content).with_context(|| format!("parsing {}", config_file))?;
        Ok(config)
    }

    pub fn save(&self, config_path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)
            .with_context(|| format!("writing {}", config_path))?;
        Ok(())
    }
}
