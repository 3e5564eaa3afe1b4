//! Mesh Builder Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in mesh_builder_operations.rs

use super::texture_library::TextureHandle;
use crate::world::core::{BlockSide, BlockType};
use bit_vec::BitVec;
use rustc_hash::FxHashSet;

/// Rectangle of coplanar faces merged during one greedy pass
///
/// Lives only between the merge and the vertex emission of a single plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedFace {
    pub block_type: BlockType,
    pub side: BlockSide,
    /// Local coordinate of the first block within the chunk
    pub origin: [i32; 3],
    /// Extent along the side's u axis, in blocks
    pub width: u32,
    /// Extent along the side's v axis, in blocks
    pub height: u32,
}

/// Scratch state reused across builds so repeated meshing does not reallocate
#[derive(Debug, Default)]
pub struct MeshBuilderData {
    /// Faces to emit in the current plane, `u + v * plane_width`, AIR = none
    pub plane: Vec<BlockType>,
    /// Plane cells already consumed by a merged face
    pub visited: BitVec,
    /// (block type, side) pairs already reported as missing a texture this build
    pub warned: FxHashSet<(BlockType, BlockSide)>,
    /// Texture bound for the solid pass
    pub solid_texture: Option<TextureHandle>,
    /// Set once a second solid texture has been reported
    pub mixed_textures_warned: bool,
    /// Unit faces folded into solid quads this build
    pub source_faces: usize,
}
