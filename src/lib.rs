//! Voxel mesh core
//!
//! Chunk storage, a block registry that resolves textures and atlas tiles at
//! registration time, and a greedy mesh builder producing GPU-ready vertex
//! arrays. Data lives in plain structs; behavior lives in the `*_operations`
//! modules as free functions over that data.
//!
//! ```ignore
//! let textures = create_default_textures();
//! let registry = BlockRegistry::new();
//! register_basic_blocks(&registry, &textures)?;
//!
//! let mut chunk = chunk_operations::create_chunk(ChunkPos::new(0, 0, 0), ChunkDimensions::DEFAULT);
//! chunk_operations::set_block_type(&mut chunk, 1, 2, 3, BlockType::GRASS)?;
//!
//! let mesh = build_chunk_mesh(&chunk, &ChunkNeighbors::none(), &registry.snapshot(), &MesherConfig::default());
//! ```

// Constants module
pub mod constants;

pub mod config;
pub mod error;
pub mod renderer;
pub mod world;

pub use config::{BoundaryFacePolicy, MesherConfig};
pub use error::{EngineError, EngineResult, ErrorContext, OptionExt};

pub use renderer::{
    build_chunk_mesh, build_chunk_mesh_with, create_mesh_builder, BillboardVertex, DirtyChunks,
    FluidVertex, MeshData, MeshJob, MeshResult, MeshScheduler, MeshStats, SolidVertex,
    TextureHandle, TextureLibrary, TextureProvider, TextureRegion,
};

pub use world::blocks::{create_default_textures, register_basic_blocks};
pub use world::{
    chunk_operations, BlockDefinition, BlockRegistry, BlockSide, BlockType, ChunkData,
    ChunkDimensions, ChunkNeighbors, ChunkPos, LightColor, PackedLight, VoxelCell,
};
