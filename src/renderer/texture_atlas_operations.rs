//! Texture Atlas Operations - Pure DOP Functions
//!
//! All functions are pure: take data, return results, no side effects.
//! No methods, no self, just transformations.

use super::texture_atlas_data::{AtlasUV, PackedRect, TextureAtlasData, TileIndex};
use super::texture_library::TextureHandle;
use crate::constants::atlas::TILE_PADDING;
use cgmath::Vector2;
use image::{DynamicImage, RgbaImage};

/// Create new texture atlas data
pub fn create_texture_atlas(
    name: &str,
    handle: TextureHandle,
    atlas_size: u32,
    tile_size: u32,
) -> TextureAtlasData {
    TextureAtlasData {
        name: name.to_string(),
        handle,
        atlas_size,
        tile_size,
        padding: TILE_PADDING,
        tile_images: Vec::new(),
        tile_uvs: Vec::new(),
        packed_rects: Vec::new(),
        cursor_x: 0,
        cursor_y: 0,
        row_height: 0,
        atlas_image: RgbaImage::new(atlas_size, atlas_size),
        dirty: false,
    }
}

/// Add texture to atlas, returning its tile index or `None` when the atlas is full
pub fn add_texture(data: &mut TextureAtlasData, image: &DynamicImage) -> Option<TileIndex> {
    let mut rgba = image.to_rgba8();
    if rgba.width() > data.tile_size || rgba.height() > data.tile_size {
        rgba = image::imageops::crop_imm(&rgba, 0, 0, data.tile_size, data.tile_size).to_image();
    }

    let uv = pack_tile(data, &rgba)?;
    let index = data.tile_uvs.len() as TileIndex;
    data.tile_uvs.push(uv);
    data.tile_images.push(rgba);
    Some(index)
}

/// Add one flat-colored tile per color
pub fn add_solid_tiles(data: &mut TextureAtlasData, colors: &[[u8; 3]]) -> Vec<TileIndex> {
    colors
        .iter()
        .filter_map(|[r, g, b]| add_texture(data, &create_solid_color(*r, *g, *b, data.tile_size)))
        .collect()
}

/// Copy a tile into the atlas image at the next free shelf position
fn pack_tile(data: &mut TextureAtlasData, rgba: &RgbaImage) -> Option<AtlasUV> {
    let width = rgba.width();
    let height = rgba.height();
    let rect = find_packing_position(data, width + data.padding * 2, height + data.padding * 2)?;

    for y in 0..height {
        for x in 0..width {
            data.atlas_image.put_pixel(
                rect.x + data.padding + x,
                rect.y + data.padding + y,
                *rgba.get_pixel(x, y),
            );
        }
    }

    let size = data.atlas_size as f32;
    let uv = AtlasUV {
        min: Vector2::new(
            (rect.x + data.padding) as f32 / size,
            (rect.y + data.padding) as f32 / size,
        ),
        max: Vector2::new(
            (rect.x + data.padding + width) as f32 / size,
            (rect.y + data.padding + height) as f32 / size,
        ),
    };

    data.packed_rects.push(rect);
    data.dirty = true;
    Some(uv)
}

/// Shelf packing: fill the current row, then open a new one below it
fn find_packing_position(data: &mut TextureAtlasData, width: u32, height: u32) -> Option<PackedRect> {
    if width > data.atlas_size || height > data.atlas_size {
        return None;
    }

    if data.cursor_x + width > data.atlas_size {
        data.cursor_y += data.row_height;
        data.cursor_x = 0;
        data.row_height = 0;
    }

    if data.cursor_y + height > data.atlas_size {
        return None;
    }

    let rect = PackedRect {
        x: data.cursor_x,
        y: data.cursor_y,
        width,
        height,
    };
    data.cursor_x += width;
    data.row_height = data.row_height.max(height);
    Some(rect)
}

/// Rebuild the atlas image at `atlas_size`, keeping every tile index
///
/// Fails (leaving the atlas untouched) if the tiles no longer fit.
pub fn repack(data: &mut TextureAtlasData, atlas_size: u32) -> bool {
    let mut packed = create_texture_atlas(&data.name, data.handle, atlas_size, data.tile_size);
    packed.padding = data.padding;

    for image in &data.tile_images {
        match pack_tile(&mut packed, image) {
            Some(uv) => packed.tile_uvs.push(uv),
            None => {
                log::warn!(
                    "[texture_atlas_operations::repack] {} tiles do not fit atlas '{}' at size {}",
                    data.tile_images.len(),
                    data.name,
                    atlas_size
                );
                return false;
            }
        }
    }

    packed.tile_images = std::mem::take(&mut data.tile_images);
    *data = packed;
    true
}

/// Get UV coordinates for a tile
pub fn get_uv(data: &TextureAtlasData, index: TileIndex) -> Option<AtlasUV> {
    data.tile_uvs.get(index as usize).copied()
}

/// Number of tiles in the atlas
pub fn tile_count(data: &TextureAtlasData) -> usize {
    data.tile_uvs.len()
}

/// Percentage of the atlas area taken by packed tiles, padding included
pub fn utilization(data: &TextureAtlasData) -> f32 {
    let used_area: u32 = data.packed_rects.iter().map(|r| r.width * r.height).sum();

    let total_area = data.atlas_size * data.atlas_size;
    (used_area as f32 / total_area as f32) * 100.0
}

/// Create solid color texture
pub fn create_solid_color(r: u8, g: u8, b: u8, size: u32) -> DynamicImage {
    let mut img = RgbaImage::new(size, size);
    for pixel in img.pixels_mut() {
        *pixel = image::Rgba([r, g, b, 255]);
    }
    DynamicImage::ImageRgba8(img)
}
