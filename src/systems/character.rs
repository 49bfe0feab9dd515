//! Character state machine.
//!
//! [`step_character`] is the pure per-frame update: it takes the sampled
//! input, the tuning constants, and the elapsed time, mutates position, yaw,
//! and motion state, and returns the sound cues the frame produced. It never
//! touches the ECS or any rendering/audio handle, so the whole state machine
//! is testable without a window.
//!
//! [`character_controller`] is the thin ECS wrapper: it samples
//! [`InputState`](crate::resources::input::InputState), runs the step for the
//! character entity, and converts cues into [`AudioCmd`] messages, gating the
//! fall scream on [`FxPlayback`] so retriggers never overlap.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;
use smallvec::SmallVec;

use crate::components::character::{Character, MotionState};
use crate::components::stageposition::StagePosition;
use crate::components::yaw::Yaw;
use crate::events::audio::AudioCmd;
use crate::game::{FX_FALL, FX_JUMP};
use crate::resources::audio::FxPlayback;
use crate::resources::input::InputState;
use crate::resources::tuning::StageTuning;
use crate::resources::worldtime::WorldTime;

/// Input sample consumed by one step of the state machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepInput {
    /// Move-left key held.
    pub left: bool,
    /// Move-right key held.
    pub right: bool,
    /// Jump key pressed this frame (edge, not level).
    pub jump_pressed: bool,
}

/// Sound effects requested by a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jump,
    Fall,
}

impl SoundCue {
    pub fn fx_id(&self) -> &'static str {
        match self {
            SoundCue::Jump => FX_JUMP,
            SoundCue::Fall => FX_FALL,
        }
    }
}

pub type SoundCues = SmallVec<[SoundCue; 2]>;

/// Advance the character by `dt` seconds.
///
/// Contract
/// - Yaw is clamped to `[yaw_left_limit, yaw_right_limit]` on return.
/// - While jumping, `pos.y` never exceeds `apex_height` and lands exactly on
///   `ground_level`.
/// - Crossing either stage edge enters the plunge/respawn sequence; input is
///   ignored until the character has settled back to ground level, and
///   exactly one respawn happens per crossing.
pub fn step_character(
    pos: &mut Vector3,
    yaw: &mut f32,
    ch: &mut Character,
    input: StepInput,
    tuning: &StageTuning,
    dt: f32,
) -> SoundCues {
    let mut cues = SoundCues::new();

    // The fall sequence is scripted; input has no effect until it finishes.
    match ch.state {
        MotionState::Plunging => {
            pos.y -= tuning.plunge_speed * dt;
            if pos.y <= tuning.pit_depth {
                *pos = tuning.respawn();
                ch.state = MotionState::Respawning;
            }
            return cues;
        }
        MotionState::Respawning => {
            pos.y -= tuning.settle_speed * dt;
            if pos.y <= tuning.ground_level {
                pos.y = tuning.ground_level;
                ch.vertical_velocity = 0.0;
                ch.state = MotionState::Idle;
            }
            return cues;
        }
        _ => {}
    }

    let moving = input.left || input.right;

    // Movement and yaw interpolation happen simultaneously.
    if input.left {
        pos.x -= tuning.move_speed * dt;
        *yaw -= tuning.yaw_speed * dt;
    }
    if input.right {
        pos.x += tuning.move_speed * dt;
        *yaw += tuning.yaw_speed * dt;
    }
    *yaw = yaw.clamp(tuning.yaw_left_limit, tuning.yaw_right_limit);

    if ch.state == MotionState::Jumping {
        // Euler integration with a reflective ceiling clamp and a floor clamp.
        ch.vertical_velocity += tuning.gravity * dt;
        pos.y += ch.vertical_velocity * dt;
        if pos.y >= tuning.apex_height {
            pos.y = tuning.apex_height;
            ch.vertical_velocity = 0.0;
        }
        if pos.y <= tuning.ground_level {
            pos.y = tuning.ground_level;
            ch.vertical_velocity = 0.0;
            ch.state = if moving {
                MotionState::Running
            } else {
                MotionState::Idle
            };
        }
    } else if input.jump_pressed && pos.y <= tuning.ground_level {
        ch.vertical_velocity = tuning.jump_impulse;
        ch.state = MotionState::Jumping;
        cues.push(SoundCue::Jump);
    } else {
        ch.state = if moving {
            MotionState::Running
        } else {
            MotionState::Idle
        };
    }

    // Edge-fall detection, including mid-jump crossings.
    if pos.x <= tuning.left_edge || pos.x >= tuning.right_edge {
        ch.state = MotionState::Plunging;
        ch.vertical_velocity = 0.0;
        cues.push(SoundCue::Fall);
    }

    cues
}

/// Run the state machine for the character entity and emit audio commands.
pub fn character_controller(
    mut query: Query<(&mut StagePosition, &mut Yaw, &mut Character)>,
    input: Res<InputState>,
    tuning: Res<StageTuning>,
    time: Res<WorldTime>,
    mut playback: ResMut<FxPlayback>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let step = StepInput {
        left: input.move_left.active,
        right: input.move_right.active,
        jump_pressed: input.jump.just_pressed,
    };

    for (mut position, mut yaw, mut character) in query.iter_mut() {
        let cues = step_character(
            &mut position.pos,
            &mut yaw.degrees,
            &mut character,
            step,
            &tuning,
            time.delta,
        );
        for cue in cues {
            let id = cue.fx_id();
            // One-shot gate: never retrigger the fall scream while it still plays.
            if cue == SoundCue::Fall && playback.is_playing(id) {
                continue;
            }
            playback.mark_playing(id);
            audio.write(AudioCmd::PlayFx { id: id.into() });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn grounded(tuning: &StageTuning) -> (Vector3, f32, Character) {
        let pos = Vector3 {
            x: tuning.respawn_point[0],
            y: tuning.ground_level,
            z: tuning.respawn_point[2],
        };
        (pos, tuning.yaw_right_limit, Character::new())
    }

    fn hold_right() -> StepInput {
        StepInput {
            right: true,
            ..Default::default()
        }
    }

    fn hold_left() -> StepInput {
        StepInput {
            left: true,
            ..Default::default()
        }
    }

    fn press_jump() -> StepInput {
        StepInput {
            jump_pressed: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_when_no_input() {
        let tuning = StageTuning::default();
        let (mut pos, mut yaw, mut ch) = grounded(&tuning);
        let cues = step_character(
            &mut pos,
            &mut yaw,
            &mut ch,
            StepInput::default(),
            &tuning,
            DT,
        );
        assert_eq!(ch.state, MotionState::Idle);
        assert_eq!(pos.y, tuning.ground_level);
        assert!(cues.is_empty());
    }

    #[test]
    fn test_hold_right_runs_and_moves_by_speed_per_frame() {
        let tuning = StageTuning::default();
        let (mut pos, mut yaw, mut ch) = grounded(&tuning);
        yaw = 0.0;
        let x0 = pos.x;

        let frames = 10;
        for _ in 0..frames {
            step_character(&mut pos, &mut yaw, &mut ch, hold_right(), &tuning, DT);
        }

        assert_eq!(ch.state, MotionState::Running);
        let expected = x0 + frames as f32 * tuning.move_speed * DT;
        assert!((pos.x - expected).abs() < 1e-4);
        // Yaw approaches (and here reaches) the right limit.
        assert_eq!(yaw, tuning.yaw_right_limit);
    }

    #[test]
    fn test_release_returns_to_idle() {
        let tuning = StageTuning::default();
        let (mut pos, mut yaw, mut ch) = grounded(&tuning);
        step_character(&mut pos, &mut yaw, &mut ch, hold_left(), &tuning, DT);
        assert_eq!(ch.state, MotionState::Running);
        step_character(
            &mut pos,
            &mut yaw,
            &mut ch,
            StepInput::default(),
            &tuning,
            DT,
        );
        assert_eq!(ch.state, MotionState::Idle);
    }

    #[test]
    fn test_yaw_stays_within_limits() {
        let tuning = StageTuning::default();
        let (mut pos, mut yaw, mut ch) = grounded(&tuning);
        for _ in 0..30 {
            step_character(&mut pos, &mut yaw, &mut ch, hold_left(), &tuning, DT);
            assert!(yaw >= tuning.yaw_left_limit && yaw <= tuning.yaw_right_limit);
        }
        assert_eq!(yaw, tuning.yaw_left_limit);
        for _ in 0..30 {
            step_character(&mut pos, &mut yaw, &mut ch, hold_right(), &tuning, DT);
            assert!(yaw >= tuning.yaw_left_limit && yaw <= tuning.yaw_right_limit);
        }
        assert_eq!(yaw, tuning.yaw_right_limit);
    }

    #[test]
    fn test_jump_arc_respects_apex_and_lands_on_ground() {
        let tuning = StageTuning::default();
        let (mut pos, mut yaw, mut ch) = grounded(&tuning);

        let cues = step_character(&mut pos, &mut yaw, &mut ch, press_jump(), &tuning, DT);
        assert_eq!(ch.state, MotionState::Jumping);
        assert_eq!(cues.as_slice(), &[SoundCue::Jump]);

        let mut max_y = pos.y;
        let mut frames = 0;
        while ch.state == MotionState::Jumping {
            step_character(
                &mut pos,
                &mut yaw,
                &mut ch,
                StepInput::default(),
                &tuning,
                DT,
            );
            max_y = max_y.max(pos.y);
            frames += 1;
            assert!(frames < 600, "jump never landed");
        }

        assert!(max_y <= tuning.apex_height + 1e-5);
        // The default impulse would overshoot the apex without the clamp.
        assert!((max_y - tuning.apex_height).abs() < 1e-4);
        assert_eq!(pos.y, tuning.ground_level);
        assert_eq!(ch.vertical_velocity, 0.0);
        assert_eq!(ch.state, MotionState::Idle);
    }

    #[test]
    fn test_jump_pressed_while_airborne_is_ignored() {
        let tuning = StageTuning::default();
        let (mut pos, mut yaw, mut ch) = grounded(&tuning);
        step_character(&mut pos, &mut yaw, &mut ch, press_jump(), &tuning, DT);
        let velocity_before = ch.vertical_velocity;

        let cues = step_character(&mut pos, &mut yaw, &mut ch, press_jump(), &tuning, DT);
        assert_eq!(ch.state, MotionState::Jumping);
        assert!(cues.is_empty());
        // Velocity follows gravity only; no second impulse.
        assert!(ch.vertical_velocity < velocity_before);
    }

    #[test]
    fn test_landing_while_holding_key_resumes_running() {
        let tuning = StageTuning::default();
        let (mut pos, mut yaw, mut ch) = grounded(&tuning);
        step_character(&mut pos, &mut yaw, &mut ch, press_jump(), &tuning, DT);
        let mut frames = 0;
        while ch.state == MotionState::Jumping {
            step_character(&mut pos, &mut yaw, &mut ch, hold_right(), &tuning, DT);
            frames += 1;
            assert!(frames < 600, "jump never landed");
        }
        assert_eq!(ch.state, MotionState::Running);
    }

    #[test]
    fn test_left_edge_triggers_fall_and_single_respawn() {
        let tuning = StageTuning::default();
        let (mut pos, mut yaw, mut ch) = grounded(&tuning);

        // Walk left until the edge triggers the plunge.
        let mut frames = 0;
        while ch.state != MotionState::Plunging {
            let cues = step_character(&mut pos, &mut yaw, &mut ch, hold_left(), &tuning, DT);
            if ch.state == MotionState::Plunging {
                assert!(cues.contains(&SoundCue::Fall));
            }
            frames += 1;
            assert!(frames < 2000, "never reached the left edge");
        }
        assert!(pos.x <= tuning.left_edge);

        // Plunge down to the pit, then respawn exactly once.
        let mut respawns = 0;
        let mut prev_state = ch.state;
        frames = 0;
        while ch.state != MotionState::Idle {
            // Input is held the whole time and must be ignored.
            step_character(&mut pos, &mut yaw, &mut ch, hold_left(), &tuning, DT);
            if prev_state == MotionState::Plunging && ch.state == MotionState::Respawning {
                respawns += 1;
                assert_eq!(pos.x, tuning.respawn_point[0]);
                assert_eq!(pos.y, tuning.respawn_point[1]);
                assert_eq!(pos.z, tuning.respawn_point[2]);
            }
            prev_state = ch.state;
            frames += 1;
            assert!(frames < 2000, "fall sequence never settled");
        }

        assert_eq!(respawns, 1);
        assert_eq!(pos.y, tuning.ground_level);
        assert_eq!(ch.vertical_velocity, 0.0);
    }

    #[test]
    fn test_right_edge_also_triggers_fall() {
        let tuning = StageTuning::default();
        let (mut pos, mut yaw, mut ch) = grounded(&tuning);
        pos.x = tuning.right_edge - 0.01;
        step_character(&mut pos, &mut yaw, &mut ch, hold_right(), &tuning, DT);
        assert_eq!(ch.state, MotionState::Plunging);
    }

    #[test]
    fn test_mid_jump_edge_crossing_falls() {
        let tuning = StageTuning::default();
        let (mut pos, mut yaw, mut ch) = grounded(&tuning);
        pos.x = tuning.left_edge + 2.0 * tuning.move_speed * DT;
        step_character(&mut pos, &mut yaw, &mut ch, press_jump(), &tuning, DT);
        assert_eq!(ch.state, MotionState::Jumping);

        let mut frames = 0;
        while ch.state == MotionState::Jumping {
            step_character(&mut pos, &mut yaw, &mut ch, hold_left(), &tuning, DT);
            frames += 1;
            assert!(frames < 600, "never crossed the edge");
        }
        assert_eq!(ch.state, MotionState::Plunging);
        assert_eq!(ch.vertical_velocity, 0.0);
    }

    #[test]
    fn test_fall_emits_cue_once_per_crossing() {
        let tuning = StageTuning::default();
        let (mut pos, mut yaw, mut ch) = grounded(&tuning);
        pos.x = tuning.left_edge;

        let cues = step_character(
            &mut pos,
            &mut yaw,
            &mut ch,
            StepInput::default(),
            &tuning,
            DT,
        );
        assert_eq!(cues.as_slice(), &[SoundCue::Fall]);

        // Subsequent plunge frames stay silent.
        let cues = step_character(
            &mut pos,
            &mut yaw,
            &mut ch,
            StepInput::default(),
            &tuning,
            DT,
        );
        assert!(cues.is_empty());
    }

    #[test]
    fn test_no_jump_during_fall_sequence() {
        let tuning = StageTuning::default();
        let (mut pos, mut yaw, mut ch) = grounded(&tuning);
        ch.state = MotionState::Plunging;
        step_character(&mut pos, &mut yaw, &mut ch, press_jump(), &tuning, DT);
        assert_eq!(ch.state, MotionState::Plunging);
        assert_eq!(ch.vertical_velocity, 0.0);
    }

    #[test]
    fn test_sound_cue_fx_ids() {
        assert_eq!(SoundCue::Jump.fx_id(), FX_JUMP);
        assert_eq!(SoundCue::Fall.fx_id(), FX_FALL);
    }
}
