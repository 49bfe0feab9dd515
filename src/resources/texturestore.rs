//! Texture store resource.
//!
//! A non-send resource that stores loaded textures keyed by string IDs.
//! Textures are loaded during setup and referenced by key from the render
//! system; a missing key simply means the texture is not drawn.

use raylib::prelude::Texture2D;
use rustc_hash::FxHashMap;

/// Map of texture keys to loaded textures.
///
/// Non-send resource: Raylib textures belong to the main thread. Insert with
/// `insert_non_send_resource` and access via `NonSend`/`NonSendMut`.
#[derive(Default)]
pub struct TextureStore {
    textures: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, texture: Texture2D) {
        self.textures.insert(id.into(), texture);
    }

    pub fn get(&self, id: impl AsRef<str>) -> Option<&Texture2D> {
        self.textures.get(id.as_ref())
    }
}
