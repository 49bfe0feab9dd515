//! Input systems.
//!
//! [`update_input_state`] reads hardware input from Raylib each frame and
//! writes the results into [`crate::resources::input::InputState`]. The
//! window-management keys trigger their toggle events here
//! ([`SwitchDebugEvent`], [`SwitchFullScreenEvent`]).
use bevy_ecs::prelude::*;
use raylib::ffi::KeyboardKey;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::events::switchfullscreen::SwitchFullScreenEvent;
use crate::resources::input::{BoolState, InputState};

fn refresh(state: &mut BoolState, rl: &raylib::RaylibHandle) {
    state.active = rl.is_key_down(state.key_binding);
    state.just_pressed = rl.is_key_pressed(state.key_binding);
    state.just_released = rl.is_key_released(state.key_binding);
}

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let is_key_pressed = |key: KeyboardKey| rl.is_key_pressed(key);

    refresh(&mut input.move_left, &rl);
    refresh(&mut input.move_right, &rl);
    refresh(&mut input.jump, &rl);
    refresh(&mut input.action_back, &rl);
    refresh(&mut input.mode_debug, &rl);
    refresh(&mut input.fullscreen_toggle, &rl);

    if is_key_pressed(input.mode_debug.key_binding) {
        commands.trigger(SwitchDebugEvent {});
    }
    if is_key_pressed(input.fullscreen_toggle.key_binding) {
        commands.trigger(SwitchFullScreenEvent {});
    }
}
