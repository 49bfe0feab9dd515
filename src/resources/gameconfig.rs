//! Demo configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! fullscreen = false
//! vsync = true
//! target_fps = 120
//!
//! [audio]
//! music_volume = 0.3
//! fx_volume = 0.5
//! muted = false
//!
//! [scene]
//! manifest = assets/scene.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_MUSIC_VOLUME: f32 = 0.3;
const DEFAULT_FX_VOLUME: f32 = 0.5;
const DEFAULT_SCENE_MANIFEST: &str = "./assets/scene.json";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Demo configuration resource.
///
/// Stores window settings, audio volumes, and the scene manifest path.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Background music volume, 0.0 to 1.0.
    pub music_volume: f32,
    /// Sound effect volume, 0.0 to 1.0.
    pub fx_volume: f32,
    /// Silence all audio (also settable via `--mute`).
    pub muted: bool,
    /// Path to the scene manifest JSON.
    pub scene_manifest: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fullscreen: DEFAULT_FULLSCREEN,
            music_volume: DEFAULT_MUSIC_VOLUME,
            fx_volume: DEFAULT_FX_VOLUME,
            muted: false,
            scene_manifest: PathBuf::from(DEFAULT_SCENE_MANIFEST),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }

        // [audio] section
        if let Some(vol) = config.getfloat("audio", "music_volume").ok().flatten() {
            self.music_volume = (vol as f32).clamp(0.0, 1.0);
        }
        if let Some(vol) = config.getfloat("audio", "fx_volume").ok().flatten() {
            self.fx_volume = (vol as f32).clamp(0.0, 1.0);
        }
        if let Some(muted) = config.getbool("audio", "muted").ok().flatten() {
            self.muted = muted;
        }

        // [scene] section
        if let Some(manifest) = config.get("scene", "manifest") {
            self.scene_manifest = PathBuf::from(manifest);
        }

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, fullscreen={}, music_volume={}, fx_volume={}, manifest={:?}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen,
            self.music_volume,
            self.fx_volume,
            self.scene_manifest
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    #[allow(dead_code)]
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));
        config.set("window", "fullscreen", Some(self.fullscreen.to_string()));

        config.set("audio", "music_volume", Some(self.music_volume.to_string()));
        config.set("audio", "fx_volume", Some(self.fx_volume.to_string()));
        config.set("audio", "muted", Some(self.muted.to_string()));

        config.set(
            "scene",
            "manifest",
            Some(self.scene_manifest.display().to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_width, DEFAULT_WINDOW_WIDTH);
        assert_eq!(config.window_height, DEFAULT_WINDOW_HEIGHT);
        assert_eq!(config.target_fps, DEFAULT_TARGET_FPS);
        assert!(config.vsync);
        assert!(!config.fullscreen);
        assert!(!config.muted);
        assert_eq!(config.scene_manifest, PathBuf::from(DEFAULT_SCENE_MANIFEST));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/nonexistent/stagehop-test.ini");
        assert!(config.load_from_file().is_err());
        // Defaults survive a failed load.
        assert_eq!(config.window_width, DEFAULT_WINDOW_WIDTH);
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let path = std::env::temp_dir().join("stagehop-config-roundtrip.ini");
        let mut config = GameConfig::with_path(&path);
        config.window_width = 800;
        config.window_height = 600;
        config.music_volume = 0.7;
        config.muted = true;
        config.save_to_file().expect("save config");

        let mut reloaded = GameConfig::with_path(&path);
        reloaded.load_from_file().expect("load config");
        assert_eq!(reloaded.window_width, 800);
        assert_eq!(reloaded.window_height, 600);
        assert!((reloaded.music_volume - 0.7).abs() < 1e-6);
        assert!(reloaded.muted);

        let _ = std::fs::remove_file(&path);
    }
}
