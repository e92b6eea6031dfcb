//! Application configuration
//!
//! Configuration loaded from .ghdiff.toml file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Narrowest split column that still leaves room for some content.
pub const MIN_COLUMN_WIDTH: usize = 20;

/// How hunks are laid out in text output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Side by side, deletions paired with additions
    #[default]
    Split,
    /// One column, one row per line
    Unified,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Split => f.write_str("split"),
            ViewMode::Unified => f.write_str("unified"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "split" => Ok(ViewMode::Split),
            "unified" => Ok(ViewMode::Unified),
            other => Err(format!("invalid mode {other:?}: must be split or unified")),
        }
    }
}

/// What the diff is printed as
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("invalid format {other:?}: must be text or json")),
        }
    }
}

/// Application configuration loaded from .ghdiff.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Layout used for text output
    #[serde(default)]
    pub view_mode: ViewMode,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Width of each column in split view, in characters
    #[serde(default = "default_column_width")]
    pub column_width: usize,

    /// Branch names tried, in order, when looking for the main branch
    #[serde(default = "default_main_branches")]
    pub main_branches: Vec<String>,
}

fn default_column_width() -> usize {
    60
}

fn default_main_branches() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            format: OutputFormat::default(),
            column_width: default_column_width(),
            main_branches: default_main_branches(),
        }
    }
}

impl AppConfig {
    /// Load config from the first candidate file, or use defaults
    ///
    /// A file that fails to parse is reported and ignored.
    pub fn load() -> Self {
        if let Some((path, content)) = crate::load_config_file() {
            match Self::from_toml(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {}: {:#}", path.display(), e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Load config from an explicitly requested file
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::info!("Loaded app config from {}", path.display());
        Ok(config)
    }

    /// Parse config from TOML text, clamping out-of-range values
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if self.column_width < MIN_COLUMN_WIDTH {
            log::warn!(
                "column_width {} is too narrow, using {}",
                self.column_width,
                MIN_COLUMN_WIDTH
            );
            self.column_width = MIN_COLUMN_WIDTH;
        }
        self.main_branches.retain(|b| !b.trim().is_empty());
        if self.main_branches.is_empty() {
            self.main_branches = default_main_branches();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.view_mode, ViewMode::Split);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.column_width, 60);
        assert_eq!(config.main_branches, vec!["main", "master"]);
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            view_mode = "unified"
            format = "json"
            column_width = 100
            main_branches = ["trunk"]
        "#;
        let config = AppConfig::from_toml(toml).unwrap();
        assert_eq!(config.view_mode, ViewMode::Unified);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.column_width, 100);
        assert_eq!(config.main_branches, vec!["trunk"]);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config = AppConfig::from_toml(r#"view_mode = "unified""#).unwrap();
        assert_eq!(config.view_mode, ViewMode::Unified);
        // Other fields should use defaults
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.column_width, 60);
        assert_eq!(config.main_branches, vec!["main", "master"]);
    }

    #[test]
    fn test_config_clamps_values() {
        let toml = "column_width = 3\nmain_branches = [\"\", \" \"]";
        let config = AppConfig::from_toml(toml).unwrap();
        assert_eq!(config.column_width, MIN_COLUMN_WIDTH);
        assert_eq!(config.main_branches, vec!["main", "master"]);
    }

    #[test]
    fn test_config_rejects_unknown_mode() {
        assert!(AppConfig::from_toml(r#"view_mode = "sideways""#).is_err());
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let err = AppConfig::load_from_path(Path::new("/nonexistent/ghdiff.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_mode_and_format_from_str() {
        assert_eq!("split".parse::<ViewMode>(), Ok(ViewMode::Split));
        assert_eq!("unified".parse::<ViewMode>(), Ok(ViewMode::Unified));
        assert!("both".parse::<ViewMode>().is_err());
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(ViewMode::Unified.to_string(), "unified");
    }
}
