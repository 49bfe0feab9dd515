//! ECS resources that bridge the main thread with the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioBridge`] and message resources. Call
//! [`shutdown_audio`] during teardown to gracefully stop the thread and free
//! audio resources.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use rustc_hash::FxHashSet;

/// Shared bridge between the ECS world and the audio thread.
///
/// This resource is created by [`setup_audio`]. Systems can send commands via
/// [`AudioBridge::tx_cmd`] and poll for messages via [`AudioBridge::rx_msg`].
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> ECS).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Sound effects currently believed to be playing.
///
/// Written by the systems that request playback and cleared when the audio
/// thread reports [`AudioMessage::FxFinished`]. Used to gate one-shot effects
/// so retriggers do not overlap (the fall scream in particular).
#[derive(Resource, Debug, Clone, Default)]
pub struct FxPlayback {
    playing: FxHashSet<String>,
}

impl FxPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_playing(&mut self, id: impl Into<String>) {
        self.playing.insert(id.into());
    }

    pub fn mark_finished(&mut self, id: impl AsRef<str>) {
        self.playing.remove(id.as_ref());
    }

    pub fn is_playing(&self, id: impl AsRef<str>) -> bool {
        self.playing.contains(id.as_ref())
    }
}

/// Spawn the audio thread and register bridge resources.
///
/// This function:
/// - Creates command/message channels.
/// - Spawns the background thread running [`audio_thread`].
/// - Inserts [`AudioBridge`], [`FxPlayback`], and the ECS message queues so
///   that systems can send commands and poll for messages.
pub fn setup_audio(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.insert_resource(FxPlayback::new());
    world.insert_resource(Messages::<AudioMessage>::default());
    world.insert_resource(Messages::<AudioCmd>::default());
}

/// Gracefully request shutdown of the audio thread and join it.
///
/// If the bridge resource exists, sends [`AudioCmd::Shutdown`], waits for the
/// thread to exit, and removes the resource from the world.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
