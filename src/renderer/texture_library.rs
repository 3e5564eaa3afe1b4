//! Texture provider interface and an in-memory implementation
//!
//! The block registry resolves texture references through `TextureProvider`
//! at registration time. Loading image files is left to the asset layer; the
//! `TextureLibrary` here only tracks names, handles and CPU atlases.

use super::texture_atlas_data::{TextureAtlasData, TileIndex};
use super::texture_atlas_operations;
use crate::error::{EngineError, EngineResult, OptionExt};
use image::DynamicImage;
use rustc_hash::FxHashMap;

/// Opaque handle of a loaded texture (a standalone image or an atlas page)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureHandle(pub u32);

/// A rectangle of a texture in normalized UV space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureRegion {
    pub texture: TextureHandle,
    pub uv_min: [f32; 2],
    pub uv_size: [f32; 2],
}

impl TextureRegion {
    /// The whole texture
    pub fn full(texture: TextureHandle) -> Self {
        Self {
            texture,
            uv_min: [0.0, 0.0],
            uv_size: [1.0, 1.0],
        }
    }

    pub fn uv_max(&self) -> [f32; 2] {
        [
            self.uv_min[0] + self.uv_size[0],
            self.uv_min[1] + self.uv_size[1],
        ]
    }
}

/// External asset system as seen by the block registry
pub trait TextureProvider {
    fn get_texture(&self, name: &str) -> Option<TextureHandle>;
    fn get_atlas_tile(&self, atlas: &str, index: TileIndex) -> Option<TextureRegion>;
    fn has_atlas(&self, atlas: &str) -> bool;
}

/// Named textures and CPU atlases
pub struct TextureLibrary {
    textures: FxHashMap<String, TextureHandle>,
    atlases: FxHashMap<String, TextureAtlasData>,
    next_handle: u32,
}

impl TextureLibrary {
    pub fn new() -> Self {
        Self {
            textures: FxHashMap::default(),
            atlases: FxHashMap::default(),
            next_handle: 1,
        }
    }

    fn allocate_handle(&mut self) -> TextureHandle {
        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Register a standalone texture by name; re-registering returns the existing handle
    pub fn register_texture(&mut self, name: &str) -> TextureHandle {
        if let Some(handle) = self.textures.get(name) {
            return *handle;
        }
        let handle = self.allocate_handle();
        self.textures.insert(name.to_string(), handle);
        handle
    }

    /// Create an empty atlas; replaces any atlas of the same name
    pub fn create_atlas(&mut self, name: &str, atlas_size: u32, tile_size: u32) -> TextureHandle {
        let handle = self.allocate_handle();
        let atlas = texture_atlas_operations::create_texture_atlas(name, handle, atlas_size, tile_size);
        if self.atlases.insert(name.to_string(), atlas).is_some() {
            log::warn!("[TextureLibrary::create_atlas] Replaced existing atlas '{}'", name);
        }
        handle
    }

    pub fn add_atlas_tile(&mut self, atlas: &str, image: &DynamicImage) -> EngineResult<TileIndex> {
        let data = self.atlases.get_mut(atlas).ok_or_engine(|| EngineError::AtlasNotFound {
            atlas: atlas.to_string(),
        })?;
        texture_atlas_operations::add_texture(data, image).ok_or_engine(|| EngineError::Internal {
            message: format!("atlas '{}' is full", atlas),
        })
    }

    pub fn atlas(&self, name: &str) -> Option<&TextureAtlasData> {
        self.atlases.get(name)
    }

    pub fn atlas_mut(&mut self, name: &str) -> Option<&mut TextureAtlasData> {
        self.atlases.get_mut(name)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl Default for TextureLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureProvider for TextureLibrary {
    fn get_texture(&self, name: &str) -> Option<TextureHandle> {
        self.textures.get(name).copied()
    }

    fn get_atlas_tile(&self, atlas: &str, index: TileIndex) -> Option<TextureRegion> {
        let data = self.atlases.get(atlas)?;
        let uv = texture_atlas_operations::get_uv(data, index)?;
        Some(TextureRegion {
            texture: data.handle,
            uv_min: [uv.min.x, uv.min.y],
            uv_size: [uv.max.x - uv.min.x, uv.max.y - uv.min.y],
        })
    }

    fn has_atlas(&self, atlas: &str) -> bool {
        self.atlases.contains_key(atlas)
    }
}
