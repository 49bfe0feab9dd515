//! Scene manifest resource.
//!
//! All asset paths and scene placement live in a JSON manifest instead of
//! being hard-coded, so swapping stage/character/audio needs no rebuild.
//! Loaded once at startup by `game::setup`; individual assets that fail to
//! load are logged and skipped, the manifest itself stays in the world for
//! later reference (camera, spawn point).

use crate::resources::tuning::StageTuning;
use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector3;
use serde::Deserialize;
use std::path::Path;

fn vec3(v: [f32; 3]) -> Vector3 {
    Vector3 {
        x: v[0],
        y: v[1],
        z: v[2],
    }
}

/// Placement of the static stage model.
#[derive(Debug, Clone, Deserialize)]
pub struct StageEntry {
    pub model: String,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: f32,
}

/// The character model, its extra animation clips, and its spawn placement.
///
/// The idle clip is expected to be embedded in the character model file, as
/// in the original demo; run and jump come from separate clip files.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterEntry {
    pub model: String,
    pub run_clip: String,
    pub jump_clip: String,
    pub spawn: [f32; 3],
    #[serde(default = "default_yaw")]
    pub yaw: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

/// Camera placement for the fixed demo viewpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CameraEntry {
    pub position: [f32; 3],
    pub target: [f32; 3],
    #[serde(default = "default_fovy")]
    pub fovy: f32,
}

/// Looping background music track.
#[derive(Debug, Clone, Deserialize)]
pub struct MusicEntry {
    pub path: String,
    #[serde(default = "default_looped")]
    pub looped: bool,
}

fn default_scale() -> f32 {
    1.0
}
fn default_yaw() -> f32 {
    93.0
}
fn default_fovy() -> f32 {
    75.0
}
fn default_looped() -> bool {
    true
}

/// Everything the scene bootstrap needs to load and place.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct SceneManifest {
    pub stage: StageEntry,
    pub character: CharacterEntry,
    pub camera: CameraEntry,
    /// Full-window background image, drawn behind the 3D scene.
    pub background: Option<String>,
    pub music: Option<MusicEntry>,
    /// One-shot effect played when a jump starts.
    pub jump_fx: Option<String>,
    /// One-shot effect played when the character falls off an edge.
    pub fall_fx: Option<String>,
    #[serde(default)]
    pub tuning: StageTuning,
}

impl SceneManifest {
    /// Load and parse the manifest from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scene manifest {:?}: {}", path, e))?;
        Self::parse(&json)
    }

    /// Parse the manifest from a JSON string.
    pub fn parse(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse scene manifest: {}", e))
    }

    pub fn character_spawn(&self) -> Vector3 {
        vec3(self.character.spawn)
    }

    pub fn stage_position(&self) -> Vector3 {
        vec3(self.stage.position)
    }

    pub fn camera_position(&self) -> Vector3 {
        vec3(self.camera.position)
    }

    pub fn camera_target(&self) -> Vector3 {
        vec3(self.camera.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "stage": { "model": "assets/models/stage.obj", "position": [2.0, 0.0, 3.1] },
        "character": {
            "model": "assets/models/hero.m3d",
            "run_clip": "assets/models/hero_run.m3d",
            "jump_clip": "assets/models/hero_jump.m3d",
            "spawn": [1.0, 1.1, 3.8]
        },
        "camera": { "position": [2.0, 1.5, 5.0], "target": [2.0, 1.1, 3.8] },
        "background": "assets/textures/backdrop.png",
        "music": { "path": "assets/audio/ambient.ogg" },
        "jump_fx": "assets/audio/yahoo.wav",
        "fall_fx": "assets/audio/scream.wav"
    }"#;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = SceneManifest::parse(MANIFEST).expect("parse manifest");
        assert_eq!(manifest.stage.model, "assets/models/stage.obj");
        assert_eq!(manifest.character.run_clip, "assets/models/hero_run.m3d");
        assert_eq!(manifest.character_spawn().y, 1.1);
        assert_eq!(manifest.stage_position().x, 2.0);
        assert!(manifest.music.is_some());
        assert!(manifest.music.unwrap().looped);
    }

    #[test]
    fn test_parse_defaults() {
        let manifest = SceneManifest::parse(MANIFEST).expect("parse manifest");
        assert_eq!(manifest.character.yaw, 93.0);
        assert_eq!(manifest.character.scale, 1.0);
        assert_eq!(manifest.camera.fovy, 75.0);
        // No tuning section: defaults apply.
        assert_eq!(manifest.tuning.ground_level, 1.1);
    }

    #[test]
    fn test_parse_tuning_override() {
        let json = MANIFEST.replacen(
            "\"background\"",
            "\"tuning\": { \"ground_level\": 0.5 }, \"background\"",
            1,
        );
        let manifest = SceneManifest::parse(&json).expect("parse manifest");
        assert_eq!(manifest.tuning.ground_level, 0.5);
        // Unset tuning fields keep their defaults.
        assert_eq!(manifest.tuning.apex_height, 1.9);
    }

    #[test]
    fn test_parse_garbage_is_an_error() {
        assert!(SceneManifest::parse("not json").is_err());
        assert!(SceneManifest::parse("{}").is_err());
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        assert!(SceneManifest::load("/nonexistent/scene.json").is_err());
    }
}
