//! World Module
//!
//! Voxel data as the mesher sees it.
//!
//! - **Core**: block identifiers, cube sides, chunk positions, the block registry
//! - **Blocks**: authored block definitions and the built-in block set
//! - **Storage**: bit-packed chunk grids with a parallel light grid

pub mod blocks;
pub mod core;
pub mod storage;

// Re-export core types for convenience
pub use self::core::{BlockRegistry, BlockSide, BlockType, ChunkPos};

pub use blocks::BlockDefinition;

pub use storage::{
    chunk_operations, ChunkData, ChunkDimensions, ChunkNeighbors, LightColor, PackedLight,
    VoxelCell,
};
