use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use warpdrive_draft::{DimensionConfig, GridSettings};

pub const DEFAULT_CONFIG_NAME: &str = "warpdrive.config.json";

/// WarpDrive configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// How grid extents are resolved when a draft leaves them out
    #[serde(default)]
    pub dimensions: DimensionConfig,

    /// Cell edge in pixels, used to resolve `--at` pointer positions
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,

    /// Characters used when printing grids
    #[serde(default)]
    pub glyphs: Glyphs,
}

fn default_cell_size() -> u32 {
    GridSettings::default().cell_size
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyphs {
    #[serde(default = "default_up")]
    pub up: String,

    #[serde(default = "default_down")]
    pub down: String,
}

fn default_up() -> String {
    "█".to_string()
}

fn default_down() -> String {
    "·".to_string()
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            up: default_up(),
            down: default_down(),
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Cannot read {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid config in {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn grid_settings(&self) -> GridSettings {
        GridSettings::new(self.cell_size)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimensions: DimensionConfig::default(),
            cell_size: default_cell_size(),
            glyphs: Glyphs::default(),
        }
    }
}
