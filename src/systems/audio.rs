//! Background audio thread and its ECS bridge systems.
//!
//! [`audio_thread`] runs on its own OS thread, owns the Raylib audio device,
//! and processes [`AudioCmd`] messages, emitting [`AudioMessage`] responses.
//! Keeping every Raylib audio call on one thread sidesteps the non-Send
//! handles; the main thread only ever touches the channels.
//!
//! On the ECS side, per frame:
//! - [`forward_audio_cmds`] sends ECS-written commands over the channel.
//! - [`poll_audio_messages`] non-blockingly drains the thread's responses
//!   into the ECS message queue.
//! - [`start_music_when_loaded`] ready-gates the background music: playback
//!   only starts once the thread reports the track loaded.
//! - [`track_fx_playback`] mirrors Fx lifecycle messages into [`FxPlayback`]
//!   so one-shot effects can be gated on "not already playing".
//!
//! Load failures are logged and the demo continues without the failed asset.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::{AudioBridge, FxPlayback};
use crate::resources::gameconfig::GameConfig;
use crate::resources::scene::SceneManifest;
use bevy_ecs::prelude::Messages;
use bevy_ecs::prelude::{MessageReader, MessageWriter, Res, ResMut};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};

/// Drain any pending messages from the audio thread and enqueue them into the
/// ECS [`Messages<AudioMessage>`] mailbox.
///
/// Non-blocking; intended to run each frame on the main thread.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
///
/// Run this after [`poll_audio_messages`] in the schedule so messages written
/// this frame become visible to readers.
pub fn update_bevy_audio_messages(mut messages: ResMut<Messages<AudioMessage>>) {
    messages.update();
}

/// Forward ECS [`AudioCmd`] messages to the audio thread via the bridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // Ignore send errors during shutdown.
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for [`AudioCmd`] so same-frame readers can
/// observe writes.
pub fn update_bevy_audio_cmds(mut messages: ResMut<Messages<AudioCmd>>) {
    messages.update();
}

/// Start the background music as soon as the audio thread reports it loaded,
/// and log load failures.
pub fn start_music_when_loaded(
    mut reader: MessageReader<AudioMessage>,
    mut writer: MessageWriter<AudioCmd>,
    config: Res<GameConfig>,
    manifest: Option<Res<SceneManifest>>,
) {
    for message in reader.read() {
        match message {
            AudioMessage::MusicLoaded { id } => {
                if config.muted {
                    info!("Music '{}' loaded but audio is muted", id);
                    continue;
                }
                let looped = manifest
                    .as_ref()
                    .and_then(|m| m.music.as_ref())
                    .map(|m| m.looped)
                    .unwrap_or(true);
                writer.write(AudioCmd::VolumeMusic {
                    id: id.clone(),
                    vol: config.music_volume,
                });
                writer.write(AudioCmd::PlayMusic {
                    id: id.clone(),
                    looped,
                });
            }
            AudioMessage::MusicLoadFailed { id, error } => {
                // The demo continues without the track.
                error!("Music '{}' failed to load: {}", id, error);
            }
            _ => {}
        }
    }
}

/// Mirror Fx lifecycle messages into the [`FxPlayback`] resource.
pub fn track_fx_playback(
    mut reader: MessageReader<AudioMessage>,
    mut playback: ResMut<FxPlayback>,
) {
    for message in reader.read() {
        match message {
            AudioMessage::FxFinished { id } => playback.mark_finished(id),
            AudioMessage::FxLoadFailed { id, error } => {
                error!("Sound effect '{}' failed to load: {}", id, error);
                // Never leave a failed effect marked as playing.
                playback.mark_finished(id);
            }
            _ => {}
        }
    }
}

/// Entry point of the dedicated audio thread.
///
/// Responsibilities:
/// - Initialize the Raylib audio device once for the life of the thread.
/// - Own all `Music` and `Sound` handles, preventing use from other threads.
/// - React to [`AudioCmd`] inputs to load and control playback.
/// - Emit [`AudioMessage`] outputs for state changes (loaded, finished, etc.).
/// - Periodically pump music streams and detect when playback finishes.
///
/// The loop non-blockingly drains commands, performs the required Raylib
/// calls, and sleeps briefly between iterations to avoid busy-waiting. It
/// blocks until it receives [`AudioCmd::Shutdown`], at which point it unloads
/// resources and exits cleanly.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("Failed to initialize audio device: {}", e);
            return;
        }
    };

    debug!(
        "audio thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut musics: FxHashMap<String, Music> = FxHashMap::default();
    let mut playing: FxHashSet<String> = FxHashSet::default();
    let mut looped: FxHashSet<String> = FxHashSet::default();
    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();
    let mut fx_playing: FxHashSet<String> = FxHashSet::default();

    'run: loop {
        // 1) Drain commands
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadMusic { id, path } => match audio.new_music(&path) {
                    Ok(music) => {
                        debug!("music loaded id='{}' path='{}'", id, path);
                        musics.insert(id.clone(), music);
                        let _ = tx_msg.send(AudioMessage::MusicLoaded { id });
                    }
                    Err(e) => {
                        warn!("music load failed id='{}' path='{}': {}", id, path, e);
                        let _ = tx_msg.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayMusic {
                    id,
                    looped: want_loop,
                } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("music play id='{}' looped={}", id, want_loop);
                        music.seek_stream(0.0);
                        music.play_stream();
                        playing.insert(id.clone());
                        if want_loop {
                            looped.insert(id.clone());
                        } else {
                            looped.remove(&id);
                        }
                        let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id });
                    }
                }
                AudioCmd::StopMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("music stop id='{}'", id);
                        music.stop_stream();
                        playing.remove(&id);
                        looped.remove(&id);
                        let _ = tx_msg.send(AudioMessage::MusicStopped { id });
                    }
                }
                AudioCmd::VolumeMusic { id, vol } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("music volume id='{}' vol={}", id, vol);
                        music.set_volume(vol);
                    }
                }
                AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        debug!("fx loaded id='{}' path='{}'", id, path);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_msg.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        warn!("fx load failed id='{}' path='{}': {}", id, path, e);
                        let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayFx { id } => {
                    if let Some(sound) = sounds.get(&id) {
                        debug!("fx play id='{}'", id);
                        sound.play();
                        fx_playing.insert(id.clone());
                    } else {
                        // Load may have failed or not finished; report so the
                        // playback gate clears.
                        warn!("fx play skipped id='{}' (not loaded)", id);
                        let _ = tx_msg.send(AudioMessage::FxFinished { id });
                    }
                }
                AudioCmd::VolumeFx { id, vol } => {
                    if let Some(sound) = sounds.get(&id) {
                        debug!("fx volume id='{}' vol={}", id, vol);
                        sound.set_volume(vol);
                    }
                }
                AudioCmd::Shutdown => {
                    debug!("audio shutdown requested");
                    musics.clear();
                    playing.clear();
                    looped.clear();
                    sounds.clear();
                    fx_playing.clear();
                    break 'run;
                }
            }
        }

        // 2) Pump streaming + detect ends.
        //    `update_stream()` must be called regularly while playing. If a
        //    track ended and isn't looped, emit Finished exactly once.
        let mut ended: Vec<String> = Vec::new();
        for id in playing.iter() {
            if let Some(music) = musics.get(id) {
                if music.is_stream_playing() {
                    music.update_stream();
                } else {
                    let len = music.get_time_length();
                    let played = music.get_time_played();
                    if played >= len - 0.01 {
                        ended.push(id.clone());
                    }
                }
            }
        }
        for id in ended.iter() {
            if looped.contains(id) {
                if let Some(music) = musics.get(id) {
                    debug!("restarting looped music id='{}'", id);
                    music.seek_stream(0.0);
                    music.play_stream();
                    let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id: id.clone() });
                }
            } else {
                debug!("music finished id='{}'", id);
                playing.remove(id);
                let _ = tx_msg.send(AudioMessage::MusicFinished { id: id.clone() });
            }
        }

        // Fx end detection: emit FxFinished once when Raylib reports a tracked
        // sound no longer playing.
        let mut fx_ended: Vec<String> = Vec::new();
        for id in fx_playing.iter() {
            let still_playing = sounds
                .get(id)
                .map(|sound| sound.is_playing())
                .unwrap_or(false);
            if !still_playing {
                fx_ended.push(id.clone());
            }
        }
        for id in fx_ended.iter() {
            debug!("fx finished id='{}'", id);
            fx_playing.remove(id);
            let _ = tx_msg.send(AudioMessage::FxFinished { id: id.clone() });
        }

        std::thread::sleep(std::time::Duration::from_millis(10));
    } // 'run

    debug!(
        "audio thread exiting (id={:?})",
        std::thread::current().id()
    );

    // On exit, musics and sounds drop before `audio`, satisfying lifetimes
}
