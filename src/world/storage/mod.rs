//! Chunk storage
//!
//! Dense, bounds-checked voxel grids with a parallel colored light grid.
//! Chunks own no rendering state.

pub mod chunk_data;
pub mod chunk_operations;
mod neighbors;
mod voxel;

pub use chunk_data::{ChunkData, ChunkDimensions};
pub use neighbors::ChunkNeighbors;
pub use voxel::{LightColor, PackedLight, VoxelCell};
