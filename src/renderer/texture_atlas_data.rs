//! Texture Atlas Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in texture_atlas_operations.rs

use super::texture_library::TextureHandle;
use cgmath::Vector2;
use image::RgbaImage;

/// UV coordinates within the atlas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasUV {
    pub min: Vector2<f32>,
    pub max: Vector2<f32>,
}

/// Rectangle packing for atlas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Tile index within an atlas, assigned in insertion order
pub type TileIndex = u32;

/// CPU-side texture atlas
///
/// Tiles keep their index across re-packing; only their UVs move.
pub struct TextureAtlasData {
    pub name: String,
    pub handle: TextureHandle,

    pub atlas_size: u32,
    pub tile_size: u32,
    pub padding: u32,

    /// Source image of every tile, kept so the atlas can be re-packed
    pub tile_images: Vec<RgbaImage>,
    /// UVs indexed by `TileIndex`
    pub tile_uvs: Vec<AtlasUV>,

    // Packing state
    pub packed_rects: Vec<PackedRect>,
    pub cursor_x: u32,
    pub cursor_y: u32,
    pub row_height: u32,
    pub atlas_image: RgbaImage,
    pub dirty: bool,
}
