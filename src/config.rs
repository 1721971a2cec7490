//! Configuration file handling.
//!
//! Settings come from an optional `starfall.toml`. Every field has a
//! default, so an empty or missing file is valid.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

use crate::summary::SummaryTab;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "starfall.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub data: DataConfig,
}

/// Native window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: f32,

    #[serde(default = "default_height")]
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_width() -> f32 {
    1200.0
}

fn default_height() -> f32 {
    800.0
}

/// How the summary is presented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Tab shown at startup.
    #[serde(default)]
    pub default_tab: SummaryTab,

    /// Suffix after the average mass.
    #[serde(default = "default_mass_unit")]
    pub mass_unit: String,

    /// Bar fill as unmultiplied RGBA.
    #[serde(default = "default_bar_color")]
    pub bar_color: [u8; 4],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_tab: SummaryTab::default(),
            mass_unit: default_mass_unit(),
            bar_color: default_bar_color(),
        }
    }
}

impl DisplayConfig {
    pub fn bar_color32(&self) -> Color32 {
        let [r, g, b, a] = self.bar_color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

fn default_mass_unit() -> String {
    "g".to_string()
}

fn default_bar_color() -> [u8; 4] {
    [53, 162, 235, 128]
}

/// Data source settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// File opened at startup when none is given on the command line.
    #[serde(default)]
    pub default_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Resolve the file to open at startup. The command line wins.
    pub fn startup_file(&self, cli_file: Option<PathBuf>) -> Option<PathBuf> {
        cli_file.or_else(|| self.data.default_file.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.width, 1200.0);
        assert_eq!(config.display.default_tab, SummaryTab::Year);
        assert_eq!(config.display.mass_unit, "g");
        assert_eq!(
            config.display.bar_color32(),
            Color32::from_rgba_unmultiplied(53, 162, 235, 128)
        );
        assert!(config.data.default_file.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[window]
width = 1600.0

[display]
default_tab = "recclass"
mass_unit = "kg"

[data]
default_file = "meteorites.json"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.window.width, 1600.0);
        assert_eq!(config.window.height, 800.0);
        assert_eq!(config.display.default_tab, SummaryTab::Class);
        assert_eq!(config.display.mass_unit, "kg");
        assert_eq!(config.display.bar_color, [53, 162, 235, 128]);
        assert_eq!(
            config.data.default_file.as_deref(),
            Some(Path::new("meteorites.json"))
        );
    }

    #[test]
    fn test_unknown_tab_is_an_error() {
        let err = toml::from_str::<Config>("[display]\ndefault_tab = \"weight\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn test_cli_file_overrides_config() {
        let mut config = Config::default();
        config.data.default_file = Some(PathBuf::from("a.csv"));

        assert_eq!(
            config.startup_file(Some(PathBuf::from("b.json"))),
            Some(PathBuf::from("b.json"))
        );
        assert_eq!(config.startup_file(None), Some(PathBuf::from("a.csv")));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[display]\nmass_unit = \"t\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.display.mass_unit, "t");
    }
}
