//! Game settings and tuning
//!
//! Loaded from JSON; every field falls back to its default when absent.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MIN_OPENING_SIZE;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    /// Visible field width
    pub field_width: f32,
    /// Visible field height
    pub field_height: f32,

    // === Simulation ===
    /// RNG seed; a random one is picked when absent
    pub seed: Option<u64>,
    /// Cap on vertical speed in either direction (units/s)
    pub max_vertical_speed: f32,
    /// Obstacle pairs kept alive at most (they pile up while stopped)
    pub max_live_obstacles: usize,

    // === Demo ===
    /// Ticks the headless binary simulates
    pub demo_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: 640.0,
            field_height: 480.0,

            seed: None,
            max_vertical_speed: 900.0,
            max_live_obstacles: 4096,

            demo_ticks: 60 * 60,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check the field can hold a legal opening and the caps are usable
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.field_width.is_finite() && self.field_width > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "field_width must be positive, got {}",
                self.field_width
            )));
        }
        if !(self.field_height.is_finite() && self.field_height > MIN_OPENING_SIZE) {
            return Err(SettingsError::Invalid(format!(
                "field_height must exceed the minimum opening ({}), got {}",
                MIN_OPENING_SIZE, self.field_height
            )));
        }
        if !(self.max_vertical_speed.is_finite() && self.max_vertical_speed > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "max_vertical_speed must be positive, got {}",
                self.max_vertical_speed
            )));
        }
        if self.max_live_obstacles == 0 {
            return Err(SettingsError::Invalid(
                "max_live_obstacles must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
