//! Game state flow systems.
use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use crate::resources::input::InputState;
use bevy_ecs::prelude::*;

/// Fire the transition event when a state change is pending.
pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

/// Run-condition: the demo is in the Playing state.
pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}

/// Request a quit transition when the back key (ESC) is pressed.
pub fn check_quit(input: Res<InputState>, mut next_state: ResMut<NextGameState>) {
    if input.action_back.just_pressed {
        next_state.set(GameStates::Quitting);
    }
}
