//! Demo settings with persistence
//!
//! Settings are read from the path given on the command line, or from
//! `~/.config/stride/dash.toml`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use stride_core::ClockConfig;
use stride_game::DashConfig;
use tracing::{info, warn};

/// All demo settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub dash: DashConfig,
    pub simulation: SimulationSettings,
}

impl DemoSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stride"))
    }

    /// Get the default settings file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("dash.toml"))
    }

    /// Load settings from `path` (or the default location), falling back to
    /// defaults when the file is missing or invalid
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => {
                    warn!("Could not determine config directory");
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::read(&path) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Invalid settings in {:?}", path))
    }

    /// Parse and validate settings from TOML
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.dash.validate()?;
        if settings.simulation.clock.fixed_timestep <= 0.0 {
            anyhow::bail!(
                "fixed timestep must be positive, got {}",
                settings.simulation.clock.fixed_timestep
            );
        }
        Ok(settings)
    }

    /// Save settings to `path` (or the default location)
    pub fn save(&self, path: Option<&Path>) -> anyhow::Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path().context("Could not determine config directory")?,
        };

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(path)
    }
}

/// Headless simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Raw frame delta fed to the clock each frame
    pub frame_delta: f32,
    /// Frames to simulate per scripted dash
    pub frames_per_dash: u32,
    /// Fixed-step clock
    pub clock: ClockConfig,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            frame_delta: 1.0 / 60.0,
            frames_per_dash: 90,
            clock: ClockConfig::default(),
        }
    }
}
