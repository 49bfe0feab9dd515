//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, rendering
//! handles, asset stores, and utilities.
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `camera` – shared 3D camera used for the demo viewpoint
//! - `debugmode` – presence toggles optional debug overlays
//! - `fullscreen` – presence tracks fullscreen window state
//! - `gameconfig` – window/audio settings loaded from config.ini
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – per-frame keyboard state of keys relevant to the demo
//! - `modelstore` – loaded models and animation clips keyed by string IDs
//! - `scene` – JSON scene manifest (asset paths, placement, tuning)
//! - `systemsstore` – registry of dynamically-lookup-able systems by name
//! - `texturestore` – loaded textures keyed by string IDs
//! - `tuning` – scripted-physics constants for the character
//! - `windowsize` – current window dimensions in pixels
//! - `worldtime` – simulation time and delta
pub mod audio;
pub mod camera;
pub mod debugmode;
pub mod fullscreen;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod modelstore;
pub mod scene;
pub mod systemsstore;
pub mod texturestore;
pub mod tuning;
pub mod windowsize;
pub mod worldtime;
