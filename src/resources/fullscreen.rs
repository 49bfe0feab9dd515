use bevy_ecs::prelude::Resource;

/// Marker resource: present while the window is in fullscreen mode.
#[derive(Resource, Clone, Copy)]
pub struct FullScreen {}
