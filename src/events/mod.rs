//! Event types and observers used by the demo.
//!
//! This module groups the domain events exchanged across systems and the
//! corresponding observers that react to them.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`gamestate`] – state transition notifications for the high-level flow
//! - [`switchdebug`] – toggle the debug overlay on/off
//! - [`switchfullscreen`] – toggle fullscreen window mode
pub mod audio;
pub mod gamestate;
pub mod switchdebug;
pub mod switchfullscreen;
