//! Renderer-facing side of the mesher
//!
//! Texture lookup, vertex formats and the CPU mesh builder. Nothing here
//! touches a GPU device; the external renderer uploads `MeshData` itself.

pub mod mesh_builder_data;
pub mod mesh_builder_operations;
mod mesh_data;
mod mesh_scheduler;
pub mod mesh_utils;
pub mod texture_atlas_data;
pub mod texture_atlas_operations;
mod texture_library;
mod vertex;

pub use mesh_builder_data::{MergedFace, MeshBuilderData};
pub use mesh_builder_operations::{build_chunk_mesh, build_chunk_mesh_with, create_mesh_builder};
pub use mesh_data::{MeshData, MeshStats};
pub use mesh_scheduler::{DirtyChunks, MeshJob, MeshResult, MeshScheduler};
pub use texture_atlas_data::{AtlasUV, TextureAtlasData, TileIndex};
pub use texture_library::{TextureHandle, TextureLibrary, TextureProvider, TextureRegion};
pub use vertex::{BillboardVertex, FluidVertex, SolidVertex};
