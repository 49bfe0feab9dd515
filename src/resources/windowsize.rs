use bevy_ecs::prelude::Resource;

/// Current window dimensions in pixels, updated each frame (the window is
/// resizable).
#[derive(Resource, Clone, Copy, Debug)]
pub struct WindowSize {
    pub w: i32,
    pub h: i32,
}
