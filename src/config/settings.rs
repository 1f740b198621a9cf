use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::core::split::{DEFAULT_MAX_ATTEMPTS, DEFAULT_TOLERANCE};

/// Persistent user settings that are saved between runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Last source folder that was split
    pub last_source_folder: Option<PathBuf>,

    /// Last train ratio used
    pub train_ratio: f32,

    /// Last val ratio used
    pub val_ratio: f32,

    /// Last weight tolerance used for fixed-count balancing
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Last attempt cap used for fixed-count balancing
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_source_folder: None,
            train_ratio: 0.70,
            val_ratio: 0.20,
            tolerance: default_tolerance(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Settings {
    /// Get the path to the settings file under the platform config directory
    pub fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "image-dataset-split")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from disk, or return defaults if the file doesn't
    /// exist or is corrupted
    pub fn load() -> Self {
        if let Some(config_path) = Self::get_config_path() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                    Ok(settings) => {
                        info!("Loaded settings from: {:?}", config_path);
                        return settings;
                    }
                    Err(e) => {
                        warn!("Failed to parse settings file: {}. Using defaults.", e);
                    }
                },
                Err(e) => {
                    // It's normal for the file not to exist on first run
                    if e.kind() != std::io::ErrorKind::NotFound {
                        warn!("Failed to read settings file: {}. Using defaults.", e);
                    }
                }
            }
        } else {
            warn!("Could not determine config directory. Using defaults.");
        }

        Self::default()
    }

    /// Save settings to disk
    pub fn save(&self) {
        if let Some(config_path) = Self::get_config_path() {
            if let Some(parent) = config_path.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!("Failed to create config directory: {}", e);
                    return;
                }
            }

            match serde_json::to_string_pretty(self) {
                Ok(json) => {
                    if let Err(e) = fs::write(&config_path, json) {
                        warn!("Failed to write settings file: {}", e);
                    } else {
                        info!("Settings saved to: {:?}", config_path);
                    }
                }
                Err(e) => {
                    warn!("Failed to serialize settings: {}", e);
                }
            }
        } else {
            warn!("Could not determine config directory. Settings not saved.");
        }
    }
}
