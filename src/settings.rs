//! Game settings and preferences
//!
//! Persisted as JSON next to the executable, separate from anything the
//! simulation owns. Missing or corrupt files fall back to defaults with a
//! log line rather than failing.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// User preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio (consumed by the front end) ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Presentation ===
    /// Screen shake on hits and explosions
    pub screen_shake: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (minimize shake and flashes)
    pub reduced_motion: bool,

    // === Simulation ===
    /// Fixed RNG seed for reproducible matches; `None` derives one from
    /// the clock at startup
    pub fixed_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.7,
            sfx_volume: 1.0,
            music_volume: 0.7,
            screen_shake: true,
            show_fps: false,
            reduced_motion: false,
            fixed_seed: None,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion).
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Load settings from a JSON file, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!(
                        "settings file {} is corrupt ({err}), using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
