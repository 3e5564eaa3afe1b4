//! Chunk Data - Pure DOP
//!
//! NO METHODS beyond trivial accessors. Just data.
//! All transformations happen in chunk_operations.rs

use super::voxel::{PackedLight, VoxelCell};
use crate::constants::core::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};
use crate::world::core::ChunkPos;
use serde::{Deserialize, Serialize};

/// Chunk size in blocks along X (width), Y (height) and Z (depth)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkDimensions {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl ChunkDimensions {
    pub const DEFAULT: Self = Self::new(CHUNK_WIDTH, CHUNK_HEIGHT, CHUNK_DEPTH);

    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub const fn volume(self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// Extent along axis 0 (X), 1 (Y) or 2 (Z)
    pub const fn extent(self, axis: usize) -> u32 {
        match axis {
            0 => self.width,
            1 => self.height,
            _ => self.depth,
        }
    }

    #[inline]
    pub fn contains(self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as u32) < self.width
            && (y as u32) < self.height
            && (z as u32) < self.depth
    }

    pub const fn as_tuple(self) -> (u32, u32, u32) {
        (self.width, self.height, self.depth)
    }
}

impl Default for ChunkDimensions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Single chunk's voxel and light storage
///
/// `cells` and `light` always hold exactly `dimensions.volume()` entries,
/// addressed by `chunk_operations::index_of`.
///
/// Dimensions cannot be changed after creation:
///
/// ```compile_fail
/// use voxel_mesh_core::{chunk_operations, ChunkDimensions, ChunkPos};
///
/// let mut chunk = chunk_operations::create_chunk(ChunkPos::new(0, 0, 0), ChunkDimensions::new(2, 2, 2));
/// chunk.dimensions = ChunkDimensions::new(4, 4, 4);
/// ```
#[derive(Clone, Debug)]
pub struct ChunkData {
    /// Chunk position in chunk coordinates
    pub position: ChunkPos,
    /// Fixed at creation; read through `dimensions()`
    pub(crate) dimensions: ChunkDimensions,
    pub(crate) cells: Vec<VoxelCell>,
    pub(crate) light: Vec<PackedLight>,
    /// Incremented on every write through chunk_operations
    pub revision: u64,
}

impl ChunkData {
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    pub fn dimensions(&self) -> ChunkDimensions {
        self.dimensions
    }
}
