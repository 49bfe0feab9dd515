//! Name-keyed registry of registered systems.
//!
//! The game state observer looks up enter hooks here by well-known names
//! (`setup`, `enter_play`, `quit_game`) and runs them via
//! [`Commands::run_system`](bevy_ecs::prelude::Commands::run_system), so the
//! observer never needs compile-time knowledge of which hook belongs to which
//! state.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

/// Registered systems addressable by name.
#[derive(Resource, Default)]
pub struct SystemsStore {
    systems: FxHashMap<String, SystemId>,
}

impl SystemsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system ID under a human-readable name. A repeated name
    /// replaces the previous entry.
    pub fn insert(&mut self, name: impl Into<String>, id: SystemId) {
        self.systems.insert(name.into(), id);
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<&SystemId> {
        self.systems.get(name.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::World;

    fn noop() {}

    #[test]
    fn test_insert_and_get() {
        let mut world = World::new();
        let id = world.register_system(noop);
        let mut store = SystemsStore::new();
        assert!(store.get("setup").is_none());
        store.insert("setup", id);
        assert_eq!(store.get("setup"), Some(&id));
    }
}
