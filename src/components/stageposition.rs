use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// World-space position of an entity on the stage.
#[derive(Component, Clone, Copy, Debug)]
pub struct StagePosition {
    pub pos: Vector3,
}

impl StagePosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vector3 { x, y, z },
        }
    }
}
