//! CLI configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Overrides the config file location
pub const CONFIG_ENV: &str = "TRAVERS_CONFIG";

/// Path of the config file: `$TRAVERS_CONFIG`, else `<config dir>/travers/config.toml`
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("travers")
        .join("config.toml")
}

/// Persistent defaults; command-line flags take precedence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Graph file used when `--graph` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<PathBuf>,

    /// Label of result nodes for `related`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Property key used for start lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_depth: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,

    /// Output format: table, json
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Config {
    /// Load the config file; a missing or unreadable file yields defaults
    pub fn load() -> Self {
        let path = config_file_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config file {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => {
                tracing::debug!("No config file at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["graph", "label", "key", "min_depth", "max_depth", "format"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "graph" => self.graph.as_ref().map(|p| p.display().to_string()),
            "label" => self.label.clone(),
            "key" => self.key.clone(),
            "min_depth" => self.min_depth.map(|d| d.to_string()),
            "max_depth" => self.max_depth.map(|d| d.to_string()),
            "format" => self.format.clone(),
            _ => None,
        }
    }

    /// Set a key from its string form; an empty value unsets it
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let value = Some(value.trim()).filter(|v| !v.is_empty());
        match key {
            "graph" => self.graph = value.map(PathBuf::from),
            "label" => self.label = value.map(str::to_string),
            "key" => self.key = value.map(str::to_string),
            "min_depth" => self.min_depth = value.map(parse_depth).transpose()?,
            "max_depth" => self.max_depth = value.map(parse_depth).transpose()?,
            "format" => {
                if let Some(format) = value {
                    if !matches!(format, "table" | "json") {
                        anyhow::bail!("Invalid format '{}': expected table or json", format);
                    }
                }
                self.format = value.map(str::to_string);
            }
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

fn parse_depth(value: &str) -> anyhow::Result<u32> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid depth '{}': expected a non-negative integer", value))
}
