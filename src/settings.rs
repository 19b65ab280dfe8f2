//! Runtime settings
//!
//! Read from an optional JSON file at startup. Gameplay tuning stays in
//! `consts`; settings only cover how a session is hosted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::Field;

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; a fresh one is picked per launch when absent
    pub seed: Option<u64>,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Loop ===
    /// Frame rate the headless runner paces itself to (0 = unpaced)
    pub target_fps: u32,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
    /// Let the demo autopilot play
    pub autopilot: bool,

    // === Presentation ===
    /// Directory holding `<sprite>.png` files
    pub assets_dir: Option<PathBuf>,
    /// Seconds of run time between HUD log lines
    pub log_every_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            target_fps: 60,
            max_frames: Some(60 * 120),
            autopilot: true,

            assets_dir: None,
            log_every_secs: 5.0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Load settings from a JSON file, falling back to defaults on any problem
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {} - using defaults", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace unusable field dimensions with the defaults
    fn sanitized(mut self) -> Self {
        if !(self.field_width.is_finite() && self.field_width > 0.0) {
            log::warn!("Ignoring field_width {}", self.field_width);
            self.field_width = FIELD_WIDTH;
        }
        if !(self.field_height.is_finite() && self.field_height > 0.0) {
            log::warn!("Ignoring field_height {}", self.field_height);
            self.field_height = FIELD_HEIGHT;
        }
        self
    }

    pub fn field(&self) -> Field {
        Field {
            width: self.field_width,
            height: self.field_height,
        }
    }
}
