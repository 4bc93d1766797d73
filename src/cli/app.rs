use crate::chess::{Color, Position, STARTING_FEN};
use crate::cli::display::RenderOptions;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Draw pieces with Unicode chess symbols instead of FEN letters
    pub unicode_board: bool,
    /// Print rank and file labels around the board
    pub show_coordinates: bool,
    /// Tracing filter used when RUST_LOG is not set
    pub log_filter: String,
    /// Position new sessions start from, standard layout when unset
    pub starting_fen: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unicode_board: true,
            show_coordinates: true,
            log_filter: "warn".to_string(),
            starting_fen: None,
        }
    }
}

impl Config {
    /// Get the default config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        ProjectDirs::from("dev", "rookery", "rookery")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Get the default config file path
    pub fn default_config_file() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create_default() -> Result<Self> {
        let config_file = Self::default_config_file()?;

        if config_file.exists() {
            Self::load_from(&config_file)
        } else {
            let config = Config::default();
            config.save_to(&config_file)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).context("Failed to parse configuration file")?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, content).context("Failed to write configuration file")?;
        Ok(())
    }

    /// Position a new session starts from
    pub fn starting_position(&self) -> Result<Position> {
        let fen = self.starting_fen.as_deref().unwrap_or(STARTING_FEN);
        Position::from_fen(fen).with_context(|| format!("Invalid starting_fen '{}'", fen))
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            unicode: self.unicode_board,
            show_coordinates: self.show_coordinates,
            perspective: Color::White,
        }
    }
}
