//! Scripted-physics constants for the character state machine.
//!
//! All values are in world units and seconds. The defaults are the original
//! demo's per-frame constants converted to per-second units at its 60 fps
//! reference rate, so the motion feels identical while the update itself is
//! frame-rate independent.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector3;
use serde::{Deserialize, Serialize};

/// Tunable constants consumed by
/// [`step_character`](crate::systems::character::step_character).
///
/// Can be overridden per scene via the `tuning` section of the scene manifest.
#[derive(Resource, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct StageTuning {
    /// Horizontal movement speed, units per second.
    pub move_speed: f32,
    /// Downward acceleration while airborne, units per second squared.
    pub gravity: f32,
    /// Upward velocity applied when a jump starts.
    pub jump_impulse: f32,
    /// Vertical coordinate of standable terrain.
    pub ground_level: f32,
    /// Maximum vertical coordinate reachable during a jump arc.
    pub apex_height: f32,
    /// Horizontal coordinate of the left stage edge.
    pub left_edge: f32,
    /// Horizontal coordinate of the right stage edge.
    pub right_edge: f32,
    /// Vertical coordinate at which a plunge ends and the respawn happens.
    pub pit_depth: f32,
    /// Descent speed while plunging off an edge.
    pub plunge_speed: f32,
    /// Descent speed while settling after a respawn.
    pub settle_speed: f32,
    /// Fixed recovery coordinate after a fall.
    pub respawn_point: [f32; 3],
    /// Yaw limit when facing left, degrees.
    pub yaw_left_limit: f32,
    /// Yaw limit when facing right, degrees.
    pub yaw_right_limit: f32,
    /// Yaw interpolation speed, degrees per second.
    pub yaw_speed: f32,
}

impl Default for StageTuning {
    fn default() -> Self {
        Self {
            move_speed: 1.8,
            gravity: -36.0,
            jump_impulse: 12.0,
            ground_level: 1.1,
            apex_height: 1.9,
            left_edge: 0.5,
            right_edge: 3.5,
            pit_depth: -2.0,
            plunge_speed: 3.0,
            settle_speed: 1.8,
            respawn_point: [1.0, 2.0, 3.8],
            yaw_left_limit: -93.0,
            yaw_right_limit: 93.0,
            yaw_speed: 1030.0,
        }
    }
}

impl StageTuning {
    pub fn respawn(&self) -> Vector3 {
        Vector3 {
            x: self.respawn_point[0],
            y: self.respawn_point[1],
            z: self.respawn_point[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let t = StageTuning::default();
        assert!(t.apex_height > t.ground_level);
        assert!(t.left_edge < t.right_edge);
        assert!(t.pit_depth < t.ground_level);
        assert!(t.gravity < 0.0);
        assert!(t.jump_impulse > 0.0);
        assert!(t.yaw_left_limit < t.yaw_right_limit);
    }

    #[test]
    fn test_respawn_point_is_above_ground_and_inside_edges() {
        let t = StageTuning::default();
        let r = t.respawn();
        assert!(r.y > t.ground_level);
        assert!(r.x > t.left_edge && r.x < t.right_edge);
    }
}
