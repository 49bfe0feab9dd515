use bevy_ecs::prelude::Component;

/// Heading around the vertical axis, in degrees.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Yaw {
    pub degrees: f32,
}

impl Yaw {
    pub fn new(degrees: f32) -> Self {
        Self { degrees }
    }
}
