//! Scene bootstrap and state-enter hooks.
//!
//! [`setup`] runs on entering [`GameStates::Loading`]: it reads the scene
//! manifest, loads models, clips, the backdrop texture and queues audio
//! loads, then requests the transition to `Playing`. [`enter_play`] spawns
//! the character entity. [`quit_game`] stops the music on the way out.
//!
//! Asset identifiers are fixed here; the manifest only decides which file a
//! given slot loads from.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use log::{error, info, warn};

use crate::components::character::Character;
use crate::components::clip::{AnimClip, ClipPlayer};
use crate::components::stageposition::StagePosition;
use crate::components::yaw::Yaw;
use crate::events::audio::AudioCmd;
use crate::resources::camera::CameraRes;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::modelstore::{ClipMeta, ModelStore};
use crate::resources::scene::SceneManifest;
use crate::resources::texturestore::TextureStore;

/// Model slot for the stage set piece.
pub const MODEL_STAGE: &str = "stage";
/// Model slot for the animated character.
pub const MODEL_CHARACTER: &str = "character";
/// Texture slot for the full-window backdrop.
pub const TEX_BACKGROUND: &str = "background";
/// Id of the looping background track.
pub const MUSIC_THEME: &str = "theme";
/// Id of the jump one-shot effect.
pub const FX_JUMP: &str = "jump";
/// Id of the edge-fall one-shot effect.
pub const FX_FALL: &str = "fall";

/// Load the first animation from `path` into the stores under `key`.
///
/// Failures are logged; playback then degrades to a held pose for that clip.
fn load_clip(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    path: &str,
    key: &str,
    models: &mut ModelStore,
    meta: &mut ClipMeta,
) {
    match rl.load_model_animations(th, path) {
        Ok(mut anims) if !anims.is_empty() => {
            let clip = anims.remove(0);
            meta.set_frame_count(key, clip.frameCount);
            models.add_clip(key, clip);
            info!("loaded clip '{}' from '{}'", key, path);
        }
        Ok(_) => warn!("'{}' contains no animations for clip '{}'", path, key),
        Err(e) => warn!("failed to load clip '{}' from '{}': {}", key, path, e),
    }
}

/// Enter hook for [`GameStates::Loading`].
///
/// Reads the scene manifest named in [`GameConfig`], fills the asset stores
/// and queues the audio loads. A missing or malformed manifest is fatal and
/// requests `Quitting`; individual asset failures are logged and the demo
/// continues without them.
pub fn setup(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextGameState>,
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    mut models: NonSendMut<ModelStore>,
    mut textures: NonSendMut<TextureStore>,
    mut meta: ResMut<ClipMeta>,
    mut audio_cmd_writer: MessageWriter<AudioCmd>,
) {
    let manifest = match SceneManifest::load(&config.scene_manifest) {
        Ok(manifest) => manifest,
        Err(e) => {
            error!(
                "cannot load scene manifest '{}': {}",
                config.scene_manifest.display(),
                e
            );
            next_state.set(GameStates::Quitting);
            return;
        }
    };

    let camera = Camera3D::perspective(
        manifest.camera_position(),
        manifest.camera_target(),
        Vector3::up(),
        manifest.camera.fovy,
    );
    commands.insert_resource(CameraRes(camera));
    commands.insert_resource(manifest.tuning);

    match rl.load_model(&th, &manifest.stage.model) {
        Ok(model) => models.add_model(MODEL_STAGE, model),
        Err(e) => warn!("failed to load stage model '{}': {}", manifest.stage.model, e),
    }

    match rl.load_model(&th, &manifest.character.model) {
        Ok(model) => models.add_model(MODEL_CHARACTER, model),
        Err(e) => warn!(
            "failed to load character model '{}': {}",
            manifest.character.model, e
        ),
    }

    // The idle pose ships inside the character model file; run and jump come
    // from their own files.
    load_clip(
        &mut rl,
        &th,
        &manifest.character.model,
        AnimClip::Idle.key(),
        &mut models,
        &mut meta,
    );
    load_clip(
        &mut rl,
        &th,
        &manifest.character.run_clip,
        AnimClip::Run.key(),
        &mut models,
        &mut meta,
    );
    load_clip(
        &mut rl,
        &th,
        &manifest.character.jump_clip,
        AnimClip::Jump.key(),
        &mut models,
        &mut meta,
    );

    if let Some(path) = manifest.background.as_deref() {
        match rl.load_texture(&th, path) {
            Ok(tex) => textures.insert(TEX_BACKGROUND, tex),
            Err(e) => warn!("failed to load backdrop '{}': {}", path, e),
        }
    }

    if let Some(music) = manifest.music.as_ref() {
        audio_cmd_writer.write(AudioCmd::LoadMusic {
            id: MUSIC_THEME.into(),
            path: music.path.clone(),
        });
    }
    let fx_vol = if config.muted { 0.0 } else { config.fx_volume };
    if let Some(path) = manifest.jump_fx.as_ref() {
        audio_cmd_writer.write(AudioCmd::LoadFx {
            id: FX_JUMP.into(),
            path: path.clone(),
        });
        audio_cmd_writer.write(AudioCmd::VolumeFx {
            id: FX_JUMP.into(),
            vol: fx_vol,
        });
    }
    if let Some(path) = manifest.fall_fx.as_ref() {
        audio_cmd_writer.write(AudioCmd::LoadFx {
            id: FX_FALL.into(),
            path: path.clone(),
        });
        audio_cmd_writer.write(AudioCmd::VolumeFx {
            id: FX_FALL.into(),
            vol: fx_vol,
        });
    }

    // Audio loads complete asynchronously; the music starts once the thread
    // reports MusicLoaded.
    commands.insert_resource(manifest);

    next_state.set(GameStates::Playing);
    info!("scene loaded, next state set to Playing");
}

/// Enter hook for [`GameStates::Playing`]: spawn the character at its
/// manifest spawn point, facing the manifest yaw, in the idle pose.
pub fn enter_play(mut commands: Commands, manifest: Res<SceneManifest>) {
    let spawn = manifest.character_spawn();
    commands.spawn((
        StagePosition::new(spawn.x, spawn.y, spawn.z),
        Yaw::new(manifest.character.yaw),
        Character::new(),
        ClipPlayer::new(AnimClip::Idle),
    ));
    info!(
        "character spawned at ({:.2}, {:.2}, {:.2})",
        spawn.x, spawn.y, spawn.z
    );
}

/// Enter hook for [`GameStates::Quitting`]: fade out by stopping the track.
/// The main loop exits on its own once the state is `Quitting`.
pub fn quit_game(mut audio_cmd_writer: MessageWriter<AudioCmd>) {
    audio_cmd_writer.write(AudioCmd::StopMusic {
        id: MUSIC_THEME.into(),
    });
    info!("quitting");
}
