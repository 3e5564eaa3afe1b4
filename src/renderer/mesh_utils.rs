//! Quad geometry helpers shared by the solid, billboard and fluid passes
//! Pure functions, no mesh state

use crate::constants::voxel::MAX_LIGHT_LEVEL;
use crate::world::core::BlockSide;
use crate::world::storage::{PackedLight, VoxelCell};

/// Unit-square corners walked (0,0) → (1,0) → (1,1) → (0,1)
const FORWARD: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
const REVERSED: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

/// In-plane `(u, v)` corners of a face in emission order
///
/// The order is counter-clockwise when the face is seen from outside the
/// block, given the plane axes from `BlockSide::plane_axes`.
pub fn corner_order(side: BlockSide) -> [[f32; 2]; 4] {
    match side {
        BlockSide::Top | BlockSide::North | BlockSide::East => REVERSED,
        BlockSide::Bottom | BlockSide::South | BlockSide::West => FORWARD,
    }
}

/// World-space corner of a face
///
/// `base` is the minimum corner of the face's first block, `corner` a unit
/// corner from `corner_order`, `width`/`height` the face extent along the u
/// and v axes, and `depth` the face's offset from `base` along the normal.
pub fn corner_position(
    side: BlockSide,
    base: [f32; 3],
    corner: [f32; 2],
    width: f32,
    height: f32,
    depth: f32,
) -> [f32; 3] {
    let (u_axis, v_axis) = side.plane_axes();
    let mut p = base;
    p[side.axis()] += depth;
    p[u_axis] += corner[0] * width;
    p[v_axis] += corner[1] * height;
    p
}

/// Offset of the face plane from the block's minimum corner
pub fn face_depth(side: BlockSide, top: f32) -> f32 {
    match side {
        BlockSide::Top => top,
        _ if side.is_positive() => 1.0,
        _ => 0.0,
    }
}

/// Block-unit tile coordinate of a corner, spanning `[0,width]×[0,height]`
///
/// Vertical faces count v downward so textures stay upright.
pub fn tile_coord(side: BlockSide, corner: [f32; 2], width: f32, height: f32) -> [f32; 2] {
    let v = if side.is_vertical() {
        (1.0 - corner[1]) * height
    } else {
        corner[1] * height
    };
    [corner[0] * width, v]
}

/// Shade one channel: `tint * max(level, grid) / 15`
#[inline]
fn shade(tint: u8, level: u8, grid: u8) -> u8 {
    (tint as u32 * level.max(grid) as u32 / MAX_LIGHT_LEVEL as u32) as u8
}

/// Vertex RGB from a cell's light level and tint and its light grid entry
pub fn vertex_rgb(cell: VoxelCell, light: PackedLight) -> [u8; 3] {
    let tint = cell.light_color();
    let level = cell.light_level();
    [
        shade(tint.r, level, light.r()),
        shade(tint.g, level, light.g()),
        shade(tint.b, level, light.b()),
    ]
}

/// Append four vertices and the two triangles `[i, i+1, i+2, i+2, i+3, i]`
pub fn push_quad<V: Copy>(vertices: &mut Vec<V>, indices: &mut Vec<u32>, quad: [V; 4]) {
    let i = vertices.len() as u32;
    vertices.extend_from_slice(&quad);
    indices.extend_from_slice(&[i, i + 1, i + 2, i + 2, i + 3, i]);
}
