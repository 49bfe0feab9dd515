//! ECS components for entities.
//!
//! Submodules overview:
//! - [`character`] – motion state and vertical velocity of the player
//! - [`clip`] – active animation clip and playback position
//! - [`stageposition`] – world-space position of an entity
//! - [`yaw`] – heading around the vertical axis in degrees

pub mod character;
pub mod clip;
pub mod stageposition;
pub mod yaw;
