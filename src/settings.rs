//! Host settings and preferences
//!
//! These never change the rules of the game, only how the host drives and
//! presents it. Stored as JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Trail resolution levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TrailQuality {
    Low,
    #[default]
    Medium,
    High,
}

impl TrailQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrailQuality::Low => "Low",
            TrailQuality::Medium => "Medium",
            TrailQuality::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(TrailQuality::Low),
            "medium" | "med" => Some(TrailQuality::Medium),
            "high" => Some(TrailQuality::High),
            _ => None,
        }
    }

    /// Number of blurred ball copies drawn for the trail
    pub fn trail_steps(&self) -> u32 {
        match self {
            TrailQuality::Low => 5,
            TrailQuality::Medium => 12,
            TrailQuality::High => 20,
        }
    }
}

/// Host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How finely the ball trail is resampled
    pub trail_quality: TrailQuality,
    /// Ball trails
    pub trails: bool,

    /// Fixed RNG seed; None picks one from the clock
    pub seed: Option<u64>,
    /// Let the AI play the left side
    pub left_autopilot: bool,

    // === Headless driver ===
    /// Seconds per frame
    pub frame_dt: f32,
    /// Frames to run before exiting
    pub frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trail_quality: TrailQuality::High,
            trails: true,
            seed: None,
            left_autopilot: false,
            frame_dt: 1.0 / 60.0,
            frames: 60 * 60,
        }
    }
}

impl Settings {
    /// Default settings with the given trail quality
    pub fn with_trail_quality(trail_quality: TrailQuality) -> Self {
        Self {
            trail_quality,
            ..Self::default()
        }
    }

    /// Trail copies to render; zero when trails are off
    pub fn trail_steps(&self) -> u32 {
        if !self.trails {
            0
        } else {
            self.trail_quality.trail_steps()
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from `path`, falling back to defaults if the file is
    /// missing or unreadable
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::info!("Using default settings ({}: {err})", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Ignoring malformed settings in {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Write settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_quality_parse() {
        assert_eq!(TrailQuality::parse("LOW"), Some(TrailQuality::Low));
        assert_eq!(TrailQuality::parse("med"), Some(TrailQuality::Medium));
        assert_eq!(TrailQuality::parse("ultra"), None);
        assert_eq!(TrailQuality::High.as_str(), "High");
    }

    #[test]
    fn test_trail_steps() {
        let mut settings = Settings::with_trail_quality(TrailQuality::Low);
        assert_eq!(settings.trail_steps(), 5);
        settings.trails = false;
        assert_eq!(settings.trail_steps(), 0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "left_autopilot": true }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert!(settings.left_autopilot);
        assert_eq!(settings.trail_quality, TrailQuality::High);
        assert_eq!(settings.frames, Settings::default().frames);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = std::env::temp_dir().join(format!("pong_defense_settings_{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(7),
            trail_quality: TrailQuality::Medium,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_falls_back_on_garbage() {
        let path = std::env::temp_dir().join(format!("pong_defense_garbage_{}.json", std::process::id()));
        fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = fs::remove_file(&path);
    }
}
