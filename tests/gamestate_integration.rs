//! Integration tests for game state transitions, enter hooks, and the
//! quit path.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;

use stagehop::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use stagehop::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use stagehop::resources::input::InputState;
use stagehop::resources::systemsstore::SystemsStore;
use stagehop::systems::gamestate::{check_pending_state, check_quit, state_is_playing};

/// Marker resource written by the test hook systems so we can observe which
/// hooks ran.
#[derive(Resource, Default)]
struct HookLog {
    entries: Vec<&'static str>,
}

fn log_setup(mut log: ResMut<HookLog>) {
    log.entries.push("setup");
}

fn log_enter_play(mut log: ResMut<HookLog>) {
    log.entries.push("enter_play");
}

fn log_quit(mut log: ResMut<HookLog>) {
    log.entries.push("quit_game");
}

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(HookLog::default());

    let mut store = SystemsStore::new();
    let setup_id = world.register_system(log_setup);
    store.insert("setup", setup_id);
    let enter_play_id = world.register_system(log_enter_play);
    store.insert("enter_play", enter_play_id);
    let quit_id = world.register_system(log_quit);
    store.insert("quit_game", quit_id);
    world.insert_resource(store);

    world.spawn(Observer::new(observe_gamestate_change_event));
    world.flush();
    world
}

#[test]
fn pending_transition_applies_and_runs_the_enter_hook() {
    let mut world = make_world();

    world
        .resource_mut::<NextGameState>()
        .set(GameStates::Loading);
    world.trigger(GameStateChangedEvent {});
    world.flush();

    assert_eq!(*world.resource::<GameState>().get(), GameStates::Loading);
    assert_eq!(
        *world.resource::<NextGameState>().get(),
        NextGameStates::Unchanged
    );
    assert_eq!(world.resource::<HookLog>().entries, vec!["setup"]);
}

#[test]
fn trigger_without_pending_state_is_a_noop() {
    let mut world = make_world();

    world.trigger(GameStateChangedEvent {});
    world.flush();

    assert_eq!(*world.resource::<GameState>().get(), GameStates::None);
    assert!(world.resource::<HookLog>().entries.is_empty());
}

#[test]
fn full_state_sequence_runs_hooks_in_order() {
    let mut world = make_world();

    for state in [GameStates::Loading, GameStates::Playing, GameStates::Quitting] {
        world.resource_mut::<NextGameState>().set(state);
        world.trigger(GameStateChangedEvent {});
        world.flush();
    }

    assert_eq!(*world.resource::<GameState>().get(), GameStates::Quitting);
    assert_eq!(
        world.resource::<HookLog>().entries,
        vec!["setup", "enter_play", "quit_game"]
    );
}

#[test]
fn check_pending_state_triggers_the_observer() {
    let mut world = make_world();
    let mut schedule = Schedule::default();
    schedule.add_systems(check_pending_state);

    world
        .resource_mut::<NextGameState>()
        .set(GameStates::Playing);
    schedule.run(&mut world);

    assert_eq!(*world.resource::<GameState>().get(), GameStates::Playing);
    assert_eq!(world.resource::<HookLog>().entries, vec!["enter_play"]);

    // Running again with nothing pending does not re-run hooks.
    schedule.run(&mut world);
    assert_eq!(world.resource::<HookLog>().entries, vec!["enter_play"]);
}

#[test]
fn state_is_playing_gates_systems() {
    let mut world = make_world();
    world.insert_resource(Gated(0));

    let mut schedule = Schedule::default();
    schedule.add_systems(bump_gated.run_if(state_is_playing));

    schedule.run(&mut world);
    assert_eq!(world.resource::<Gated>().0, 0);

    world.resource_mut::<GameState>().set(GameStates::Playing);
    schedule.run(&mut world);
    assert_eq!(world.resource::<Gated>().0, 1);
}

#[derive(Resource)]
struct Gated(u32);

fn bump_gated(mut gated: ResMut<Gated>) {
    gated.0 += 1;
}

#[test]
fn escape_requests_quit() {
    let mut world = make_world();
    world.insert_resource(InputState::default());

    let mut schedule = Schedule::default();
    schedule.add_systems(check_quit);

    schedule.run(&mut world);
    assert_eq!(
        *world.resource::<NextGameState>().get(),
        NextGameStates::Unchanged
    );

    world.resource_mut::<InputState>().action_back.just_pressed = true;
    schedule.run(&mut world);
    assert_eq!(
        *world.resource::<NextGameState>().get(),
        NextGameStates::Pending(GameStates::Quitting)
    );
}
