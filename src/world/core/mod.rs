//! Core world data types and fundamental structures
//!
//! Block identifiers, cube sides, chunk positions and the block registry.

mod block;
mod position;
mod registry;
pub mod registry_data;
pub mod registry_operations;

pub use block::{BlockSide, BlockType};
pub use position::ChunkPos;
pub use registry::BlockRegistry;
pub use registry_data::{BlockRegistryData, ResolvedBlock, TextureRef};
