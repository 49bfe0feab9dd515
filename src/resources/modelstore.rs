//! Model and animation-clip stores.
//!
//! [`ModelStore`] is a non-send resource holding loaded Raylib models and the
//! animation clips bound to them; Raylib model data must only be touched from
//! the main thread. [`ClipMeta`] is the plain-data side (frame counts per
//! clip) and is a normal resource so the animation bookkeeping system stays
//! testable without a window.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Model, ModelAnimation};
use rustc_hash::FxHashMap;

/// Map of model keys to loaded models and of clip keys to animation clips.
///
/// This is a non-send resource; use `NonSend<ModelStore>` / `NonSendMut` in
/// system parameters.
#[derive(Default)]
pub struct ModelStore {
    models: FxHashMap<String, Model>,
    clips: FxHashMap<String, ModelAnimation>,
}

impl ModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_model(&mut self, id: impl Into<String>, model: Model) {
        self.models.insert(id.into(), model);
    }

    pub fn model(&self, id: impl AsRef<str>) -> Option<&Model> {
        self.models.get(id.as_ref())
    }

    pub fn model_mut(&mut self, id: impl AsRef<str>) -> Option<&mut Model> {
        self.models.get_mut(id.as_ref())
    }

    pub fn add_clip(&mut self, id: impl Into<String>, clip: ModelAnimation) {
        self.clips.insert(id.into(), clip);
    }

    pub fn clip(&self, id: impl AsRef<str>) -> Option<&ModelAnimation> {
        self.clips.get(id.as_ref())
    }

    /// Mutable access to a model and a clip at the same time, as needed by
    /// `update_model_animation`.
    pub fn model_and_clip(
        &mut self,
        model_id: impl AsRef<str>,
        clip_id: impl AsRef<str>,
    ) -> Option<(&mut Model, &ModelAnimation)> {
        let clip = self.clips.get(clip_id.as_ref())?;
        let model = self.models.get_mut(model_id.as_ref())?;
        Some((model, clip))
    }
}

/// Frame counts per clip key, captured when clips are loaded.
///
/// Lives apart from [`ModelStore`] so frame advancing can run (and be tested)
/// without touching Raylib handles.
#[derive(Resource, Debug, Clone, Default)]
pub struct ClipMeta {
    frames: FxHashMap<String, i32>,
}

impl ClipMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_frame_count(&mut self, id: impl Into<String>, frames: i32) {
        self.frames.insert(id.into(), frames.max(1));
    }

    /// Frame count for a clip; 1 when the clip never loaded, so playback
    /// degrades to a held pose instead of an error.
    pub fn frame_count(&self, id: impl AsRef<str>) -> i32 {
        self.frames.get(id.as_ref()).copied().unwrap_or(1)
    }

    pub fn has_clip(&self, id: impl AsRef<str>) -> bool {
        self.frames.contains_key(id.as_ref())
    }
}
