//! Systems for the stage demo.
//!
//! This module groups the per-frame logic: input sampling, the character
//! motion state machine, animation clip selection and advancement, game state
//! transitions, world time bookkeeping, the audio bridge, and rendering.

pub mod animation;
pub mod audio;
pub mod character;
pub mod gamestate;
pub mod input;
pub mod render;
pub mod time;
