//! Animation clip playback component.
//!
//! A [`ClipPlayer`] holds exactly one [`AnimClip`] at a time, so the
//! "at most one clip plays" invariant is structural rather than maintained by
//! paired stop/start calls. The mapping from [`MotionState`] to clip lives in
//! [`AnimClip::for_state`]; the controller system only ever assigns through it.

use crate::components::character::MotionState;
use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// The three mutually exclusive animation clips of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnimClip {
    #[default]
    Idle,
    Run,
    Jump,
}

impl AnimClip {
    /// Key used to look the clip up in the model store and clip metadata.
    pub fn key(&self) -> &'static str {
        match self {
            AnimClip::Idle => "idle",
            AnimClip::Run => "run",
            AnimClip::Jump => "jump",
        }
    }

    /// Enum-indexed table mapping motion state to the clip that should play.
    ///
    /// The fall phases keep the idle clip, as the original demo never switched
    /// animation while off the stage.
    pub fn for_state(state: MotionState) -> Self {
        match state {
            MotionState::Idle => AnimClip::Idle,
            MotionState::Running => AnimClip::Run,
            MotionState::Jumping => AnimClip::Jump,
            MotionState::Plunging | MotionState::Respawning => AnimClip::Idle,
        }
    }
}

/// Playback state for the active clip of an entity.
#[derive(Component, Debug, Clone)]
pub struct ClipPlayer {
    pub clip: AnimClip,
    /// Current pose frame within the clip.
    pub frame: i32,
    pub elapsed: f32,
    /// Pose frames advanced per second.
    pub fps: f32,
}

impl ClipPlayer {
    pub fn new(clip: AnimClip) -> Self {
        Self {
            clip,
            frame: 0,
            elapsed: 0.0,
            fps: 60.0,
        }
    }

    /// Switch to `clip`, restarting playback. No-op if already active.
    pub fn switch_to(&mut self, clip: AnimClip) {
        if self.clip != clip {
            self.clip = clip;
            self.frame = 0;
            self.elapsed = 0.0;
        }
    }
}
