//! Game settings and preferences
//!
//! Read from an optional JSON file. Missing fields take their defaults, and a
//! missing or broken file means plain defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::sim::splash::DEFAULT_SPLASH_MS;

/// Fastest loop rate that still advances timers in whole milliseconds
pub const MAX_TARGET_FPS: u32 = 1000;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    pub viewport_width: i32,
    pub viewport_height: i32,

    // === Loop ===
    /// Fixed frame rate the loop paces itself to (1 - 1000)
    pub target_fps: u32,
    /// Splash screen duration (ms)
    pub splash_ms: u64,
    /// Stop after this many frames (headless runs)
    pub max_frames: Option<u64>,
    /// Stop once either player reaches this score
    pub winning_score: Option<u32>,
    /// RNG seed for kick-off directions; random when unset
    pub seed: Option<u64>,

    // === Gameplay ===
    /// Ball travel per frame on each axis
    pub ball_speed: i32,
    /// Paddle travel per frame
    pub paddle_speed: i32,
    /// Draw goal areas (debug aid)
    pub show_goals: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 1280,
            viewport_height: 720,

            target_fps: consts::TARGET_FPS,
            splash_ms: DEFAULT_SPLASH_MS,
            max_frames: None,
            winning_score: None,
            seed: None,

            ball_speed: consts::BALL_SPEED,
            paddle_speed: consts::PADDLES_SPEED,
            show_goals: cfg!(debug_assertions),

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, clamping out-of-range values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Couldn't read settings from {}: {}", path.display(), e);
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}", path.display(), e);
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Time budget of one frame, never shorter than 1 ms
    pub fn frame_duration(&self) -> Duration {
        let fps = self.target_fps.clamp(1, MAX_TARGET_FPS);
        Duration::from_millis(1000 / u64::from(fps))
    }

    fn sanitize(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.target_fps = self.target_fps.clamp(1, MAX_TARGET_FPS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.viewport_width, 1280);
        assert_eq!(s.ball_speed, 8);
        assert_eq!(s.paddle_speed, 5);
        assert_eq!(s.frame_duration(), Duration::from_millis(16));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "ball_speed": 12, "seed": 99 }"#).unwrap();
        assert_eq!(s.ball_speed, 12);
        assert_eq!(s.seed, Some(99));
        assert_eq!(s.paddle_speed, 5);
        assert_eq!(s.viewport_height, 720);
    }

    #[test]
    fn test_volumes_clamped() {
        let s = Settings::from_json(r#"{ "master_volume": 4.0, "sfx_volume": -2.0 }"#).unwrap();
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.sfx_volume, 0.0);
    }

    #[test]
    fn test_frame_rate_clamped() {
        let s = Settings::from_json(r#"{ "target_fps": 2000, "music_volume": 1.5 }"#).unwrap();
        assert_eq!(s.target_fps, MAX_TARGET_FPS);
        assert_eq!(s.music_volume, 1.0);

        // Built directly, skipping sanitize
        let fast = Settings {
            target_fps: 2000,
            ..Default::default()
        };
        assert_eq!(fast.frame_duration(), Duration::from_millis(1));

        let zero = Settings {
            target_fps: 0,
            ..Default::default()
        };
        assert_eq!(zero.frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ ball_speed: ").is_err());
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join(format!("rect-pong-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let missing = dir.join("missing.json");
        assert_eq!(Settings::load(&missing), Settings::default());

        let broken = dir.join("broken.json");
        std::fs::write(&broken, "not json").unwrap();
        assert_eq!(Settings::load(&broken), Settings::default());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("rect-pong-save-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        let settings = Settings {
            winning_score: Some(5),
            muted: true,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
