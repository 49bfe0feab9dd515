use bevy_ecs::prelude::Resource;

/// Simulation clock, written once per frame by
/// [`update_world_time`](crate::systems::time::update_world_time).
///
/// `delta` is already scaled by `time_scale`; systems consume it as-is. The
/// character step multiplies its per-second constants by this value, so a
/// scale of 0.5 is a functional slow-motion toggle.
#[derive(Resource, Clone, Copy)]
pub struct WorldTime {
    /// Scaled seconds since startup.
    pub elapsed: f32,
    /// Scaled seconds covered by the current frame.
    pub delta: f32,
    pub time_scale: f32,
    /// Frames elapsed since startup.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
