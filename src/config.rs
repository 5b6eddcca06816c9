use crate::error::{FolioError, Result};
use crate::settings::{Backdrop, ParticleSettings};
use crate::theme::{Rgb, BACKGROUND};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: u32 = 1;
const APP_DIR: &str = "oma-folio";
const CONFIG_FILE: &str = "config.json";

/// Complete application configuration, stored as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Version field for future compatibility
    pub version: u32,
    /// Particle background tunables
    pub particles: ParticleSettings,
    /// Logical pixels covered by one terminal cell
    pub cell_width_px: f32,
    pub cell_height_px: f32,
    /// Repaint rate of the background
    pub fps: u32,
    pub backdrop: Backdrop,
    pub cursor_enabled: bool,
    /// Terminal background color set at startup, `#rrggbb`
    pub theme_color: String,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            particles: ParticleSettings::default(),
            cell_width_px: 8.0,
            cell_height_px: 16.0,
            fps: 60,
            backdrop: Backdrop::default(),
            cursor_enabled: true,
            theme_color: BACKGROUND.to_string(),
        }
    }
}

impl FolioConfig {
    /// `<config dir>/oma-folio/config.json`
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or(FolioError::ConfigDir)
    }

    /// Export config to a JSON file, creating parent directories as needed
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(FolioError::ConfigSerialize)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, json)?;
        Ok(())
    }

    /// Import config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| FolioError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load an explicitly named file (errors are fatal), or the default file
    /// if one exists. A broken default file is logged and ignored.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            tracing::info!(path = %path.display(), "config loaded");
            return Ok(config);
        }

        let path = match Self::default_path() {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(%err, "using default config");
                return Ok(Self::default());
            }
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        match Self::load_from_file(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "config loaded");
                Ok(config)
            }
            Err(err) => {
                tracing::warn!(%err, "ignoring unreadable config, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Theme color as RGB, falling back to the page background
    pub fn theme_rgb(&self) -> Rgb {
        Rgb::from_hex(&self.theme_color).unwrap_or_else(|| {
            tracing::warn!(value = %self.theme_color, "invalid theme color, using default");
            BACKGROUND
        })
    }

    /// Clamp values that would leave nothing to draw
    pub fn sanitized(mut self) -> Self {
        self.particles = self.particles.sanitized();
        self.cell_width_px = self.cell_width_px.max(1.0);
        self.cell_height_px = self.cell_height_px.max(1.0);
        self.fps = self.fps.clamp(1, 240);
        self
    }
}
