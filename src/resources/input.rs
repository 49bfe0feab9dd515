//! Per-frame keyboard input resource.
//!
//! Captures the subset of keyboard state the demo cares about and exposes it
//! to systems via the [`InputState`] resource. Defaults follow the original
//! demo bindings: A/D to move, W to jump, plus ESC to quit and F10/F11 for
//! window/debug toggles.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently held this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding,
        }
    }
}

/// Resource capturing the per-frame keyboard state relevant to the demo.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub move_left: BoolState,
    pub move_right: BoolState,
    pub jump: BoolState,
    // Window/flow keys
    pub action_back: BoolState,
    pub mode_debug: BoolState,
    pub fullscreen_toggle: BoolState,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound_to(KeyboardKey::KEY_NULL)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_left: BoolState::bound_to(KeyboardKey::KEY_A),
            move_right: BoolState::bound_to(KeyboardKey::KEY_D),
            jump: BoolState::bound_to(KeyboardKey::KEY_W),
            action_back: BoolState::bound_to(KeyboardKey::KEY_ESCAPE),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
            fullscreen_toggle: BoolState::bound_to(KeyboardKey::KEY_F10),
        }
    }
}
