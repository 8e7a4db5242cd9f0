//! Configuration for PDFSign
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats, stored by default in the platform
//! configuration directory.
//!
//! Configuration is organized into logical sections:
//! - Interaction settings (tap tolerance, overlay handle sizing)
//! - Viewer settings (page layout and initial zoom)

use crate::error::{SettingsError, SettingsResult};
use pdfsign_core::constants::{
    HANDLE_INSET, HIT_TEST_INSET, MAX_SCALE_FACTOR, MIN_SCALE_FACTOR, PAGE_GAP,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Touch interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Margin around a stamp's rotated bounds that still selects it
    pub hit_test_inset: f64,
    /// Overlay inset; handles are three insets wide
    pub handle_inset: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            hit_test_inset: HIT_TEST_INSET,
            handle_inset: HANDLE_INSET,
        }
    }
}

/// Document viewer layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Vertical gap between pages in view points
    pub page_gap: f64,
    /// Zoom applied when a document is first shown
    pub initial_scale: f64,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            page_gap: PAGE_GAP,
            initial_scale: 1.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Interaction settings
    pub interaction: InteractionSettings,
    /// Viewer settings
    pub viewer: ViewerSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location: `<config_dir>/pdfsign/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("pdfsign").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Load config from `path`, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let interaction = &self.interaction;
        if !(interaction.hit_test_inset.is_finite() && interaction.hit_test_inset >= 0.0) {
            return Err(SettingsError::invalid(
                "hit_test_inset",
                "must be finite and >= 0",
            ));
        }
        if !(interaction.handle_inset.is_finite() && interaction.handle_inset > 0.0) {
            return Err(SettingsError::invalid(
                "handle_inset",
                "must be finite and > 0",
            ));
        }

        let viewer = &self.viewer;
        if !(viewer.page_gap.is_finite() && viewer.page_gap >= 0.0) {
            return Err(SettingsError::invalid("page_gap", "must be finite and >= 0"));
        }
        if !(viewer.initial_scale > MIN_SCALE_FACTOR && viewer.initial_scale < MAX_SCALE_FACTOR)
        {
            return Err(SettingsError::invalid(
                "initial_scale",
                format!(
                    "must be between {} and {} (exclusive)",
                    MIN_SCALE_FACTOR, MAX_SCALE_FACTOR
                ),
            ));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            _ => Err(SettingsError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
