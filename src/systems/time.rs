//! Frame clock bookkeeping.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance [`WorldTime`] by one frame.
///
/// Called from the main loop with the raw frame delta in seconds; the current
/// `time_scale` is applied before anything else reads the clock, so every
/// system downstream sees scaled time only.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut time = world.resource_mut::<WorldTime>();
    let scaled = dt * time.time_scale;
    time.elapsed += scaled;
    time.delta = scaled;
    time.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_scale_applies_to_delta_and_elapsed() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(0.5));

        update_world_time(&mut world, 0.2);
        update_world_time(&mut world, 0.2);

        let time = world.resource::<WorldTime>();
        assert!((time.delta - 0.1).abs() < 1e-6);
        assert!((time.elapsed - 0.2).abs() < 1e-6);
        assert_eq!(time.frame_count, 2);
    }
}
