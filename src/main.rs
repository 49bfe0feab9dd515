//! Stage Hop, a small keyboard-driven 3D character demo.
//!
//! A single character stands on a stage set piece. `A`/`D` run it left and
//! right, `W` jumps, stepping off either edge drops it into the pit and
//! respawns it from above. The crate is organized the usual ECS way:
//!
//! - [`components`] – per-entity data (position, yaw, motion state, clip)
//! - [`resources`] – world-global data (input, config, stores, audio bridge)
//! - [`events`] – observer-handled events and the audio command messages
//! - [`systems`] – per-frame logic (input, character, animation, render)
//! - [`game`] – scene bootstrap and state-enter hooks

mod components;
mod events;
mod game;
mod resources;
mod systems;

use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::events::switchdebug::switch_debug_observer;
use crate::events::switchfullscreen::switch_fullscreen_observer;
use crate::resources::audio::{setup_audio, shutdown_audio};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::InputState;
use crate::resources::modelstore::{ClipMeta, ModelStore};
use crate::resources::systemsstore::SystemsStore;
use crate::resources::texturestore::TextureStore;
use crate::resources::windowsize::WindowSize;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::{animation, animation_controller};
use crate::systems::audio::{
    forward_audio_cmds, poll_audio_messages, start_music_when_loaded, track_fx_playback,
    update_bevy_audio_cmds, update_bevy_audio_messages,
};
use crate::systems::character::character_controller;
use crate::systems::gamestate::{check_pending_state, check_quit, state_is_playing};
use crate::systems::input::update_input_state;
use crate::systems::render::render_system;
use crate::systems::time::update_world_time;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Stage Hop
#[derive(Parser)]
#[command(version, about = "A tiny 3D character demo: run, jump, mind the edges.")]
struct Cli {
    /// Path to the config file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Scene manifest to load, overriding the config file.
    #[arg(long, value_name = "PATH")]
    scene: Option<PathBuf>,

    /// Start with all audio muted.
    #[arg(long)]
    mute: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    config.load_from_file().ok(); // missing file means defaults
    if let Some(scene) = cli.scene {
        config.scene_manifest = scene;
    }
    if cli.mute {
        config.muted = true;
    }

    let window_width = config.window_width;
    let window_height = config.window_height;

    // --------------- Raylib window ---------------
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Stage Hop");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // ESC is handled as a regular action key
    rl.set_exit_key(None);
    if config.fullscreen && !rl.is_window_fullscreen() {
        rl.toggle_fullscreen();
    }

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(WindowSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(config);
    world.insert_resource(InputState::default());
    world.insert_resource(ClipMeta::new());
    world.insert_non_send_resource(ModelStore::new());
    world.insert_non_send_resource(TextureStore::new());

    // Audio bridge must exist before the scene setup queues load commands.
    setup_audio(&mut world);

    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(observe_gamestate_change_event));
    world.spawn(Observer::new(switch_debug_observer));
    world.spawn(Observer::new(switch_fullscreen_observer));

    // State-enter hooks, looked up by name when a transition applies.
    let mut systems_store = SystemsStore::new();
    systems_store.insert("setup", world.register_system(game::setup));
    systems_store.insert("enter_play", world.register_system(game::enter_play));
    systems_store.insert("quit_game", world.register_system(game::quit_game));
    world.insert_resource(systems_store);

    world.flush();

    // Kick off loading immediately.
    {
        let mut next_state = world.resource_mut::<NextGameState>();
        next_state.set(GameStates::Loading);
    }
    world.trigger(GameStateChangedEvent {});
    world.flush();

    let mut update = Schedule::default();
    update.add_systems(update_input_state);
    update.add_systems(check_quit.after(update_input_state));
    update.add_systems(check_pending_state);
    update.add_systems(
        // audio systems must run together and in order
        (
            update_bevy_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
            start_music_when_loaded,
            track_fx_playback,
        )
            .chain(),
    );
    update.add_systems(
        character_controller
            .run_if(state_is_playing)
            .after(update_input_state),
    );
    update.add_systems(animation_controller.after(character_controller));
    update.add_systems(animation.after(animation_controller));
    update.add_systems(render_system.after(animation));

    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && *world.resource::<GameState>().get() != GameStates::Quitting
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();

        // Window may have been resized or toggled fullscreen this frame.
        let (new_w, new_h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        {
            let mut window_size = world.resource_mut::<WindowSize>();
            window_size.w = new_w;
            window_size.h = new_h;
        }
    }
    shutdown_audio(&mut world);
}
