//! Animation systems.
//!
//! - [`animation_controller`] selects the clip that must play for the current
//!   [`MotionState`] via the enum-indexed table [`AnimClip::for_state`], so
//!   clip exclusivity is structural: assigning a new clip implicitly stops
//!   the previous one.
//! - [`animation`] advances the active clip's pose frame based on elapsed
//!   time and the frame counts captured at load time ([`ClipMeta`]).
//!
//! Applying the pose to the model mesh happens in the render system, which
//! owns the Raylib handles; everything here is plain data and runs headless
//! in tests.

use bevy_ecs::prelude::*;

use crate::components::character::Character;
use crate::components::clip::{AnimClip, ClipPlayer};
use crate::resources::modelstore::ClipMeta;
use crate::resources::worldtime::WorldTime;

/// Select the active clip from the character's motion state.
///
/// Switching resets the frame counter; keeping the same state leaves playback
/// untouched.
pub fn animation_controller(mut query: Query<(&Character, &mut ClipPlayer)>) {
    for (character, mut player) in query.iter_mut() {
        player.switch_to(AnimClip::for_state(character.state));
    }
}

/// Advance the active clip's pose frame.
///
/// Clips loop; a clip that never loaded has a single frame (see
/// [`ClipMeta::frame_count`]) and degrades to a held pose.
pub fn animation(
    mut query: Query<&mut ClipPlayer>,
    meta: Res<ClipMeta>,
    time: Res<WorldTime>,
) {
    for mut player in query.iter_mut() {
        let frame_count = meta.frame_count(player.clip.key());
        player.elapsed += time.delta;

        let frame_duration = 1.0 / player.fps;
        while player.elapsed >= frame_duration {
            player.elapsed -= frame_duration;
            player.frame = (player.frame + 1) % frame_count;
        }
    }
}
