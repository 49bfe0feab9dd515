//! Player character state.
//!
//! [`Character`] holds the scripted-physics state mutated once per frame by
//! [`character_controller`](crate::systems::character::character_controller).
//! The motion state is an explicit enum rather than a set of booleans so that
//! impossible combinations (jumping while plunging, running while settling)
//! cannot be represented.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Discrete motion states of the character.
///
/// `Plunging` and `Respawning` together form the edge-fall sequence: the
/// character descends off the stage to the pit depth, teleports to the respawn
/// point, then settles back down to ground level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    #[default]
    Idle,
    Running,
    Jumping,
    /// Fell past a stage edge; descending toward the pit depth.
    Plunging,
    /// Teleported back to the respawn point; settling down to ground level.
    Respawning,
}

impl MotionState {
    /// Whether the character is in either phase of the edge-fall sequence.
    pub fn is_falling(&self) -> bool {
        matches!(self, MotionState::Plunging | MotionState::Respawning)
    }
}

/// Per-frame mutable state of the player character.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Character {
    pub state: MotionState,
    /// Vertical velocity in world units per second. Only meaningful while
    /// jumping; zeroed on landing and on clamps.
    pub vertical_velocity: f32,
}

impl Character {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_defaults() {
        let ch = Character::new();
        assert_eq!(ch.state, MotionState::Idle);
        assert_eq!(ch.vertical_velocity, 0.0);
    }

    #[test]
    fn test_is_falling_covers_both_fall_phases() {
        assert!(MotionState::Plunging.is_falling());
        assert!(MotionState::Respawning.is_falling());
        assert!(!MotionState::Idle.is_falling());
        assert!(!MotionState::Running.is_falling());
        assert!(!MotionState::Jumping.is_falling());
    }
}
