//! Shared 3D camera resource.
//!
//! Wraps raylib's [`raylib::prelude::Camera3D`] so that systems agree on a
//! single viewpoint. Inserted during setup from the scene manifest; the demo
//! camera is fixed, but mutating this resource pans the view.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Camera3D;

/// ECS resource that holds the active camera parameters.
#[derive(Resource, Clone, Copy)]
pub struct CameraRes(pub Camera3D);
