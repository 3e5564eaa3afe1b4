//! Mesh Data - built output of one chunk
//!
//! Immutable once built. Rebuilding a chunk produces a new `MeshData` that
//! replaces the old one as a whole.

use super::texture_library::TextureHandle;
use super::vertex::{BillboardVertex, FluidVertex, SolidVertex};
use crate::constants::mesh::INDICES_PER_QUAD;
use crate::world::core::ChunkPos;

/// Vertex and index arrays for the solid, billboard and fluid passes
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub(crate) chunk: ChunkPos,
    pub(crate) solid_vertices: Vec<SolidVertex>,
    pub(crate) solid_indices: Vec<u32>,
    pub(crate) billboard_vertices: Vec<BillboardVertex>,
    pub(crate) billboard_indices: Vec<u32>,
    pub(crate) fluid_vertices: Vec<FluidVertex>,
    pub(crate) fluid_indices: Vec<u32>,
    pub(crate) solid_texture: Option<TextureHandle>,
    /// Unit voxel faces that were folded into the solid quads
    pub(crate) source_faces: usize,
}

impl MeshData {
    /// Mesh with no geometry, renders as nothing
    pub fn empty(chunk: ChunkPos) -> Self {
        Self {
            chunk,
            ..Self::default()
        }
    }

    pub fn chunk_position(&self) -> ChunkPos {
        self.chunk
    }

    pub fn solid_vertices(&self) -> &[SolidVertex] {
        &self.solid_vertices
    }

    pub fn solid_indices(&self) -> &[u32] {
        &self.solid_indices
    }

    pub fn billboard_vertices(&self) -> &[BillboardVertex] {
        &self.billboard_vertices
    }

    pub fn billboard_indices(&self) -> &[u32] {
        &self.billboard_indices
    }

    pub fn fluid_vertices(&self) -> &[FluidVertex] {
        &self.fluid_vertices
    }

    pub fn fluid_indices(&self) -> &[u32] {
        &self.fluid_indices
    }

    /// Texture to bind for the solid pass, None when there is no solid geometry
    pub fn solid_texture(&self) -> Option<TextureHandle> {
        self.solid_texture
    }

    pub fn solid_face_count(&self) -> usize {
        self.solid_indices.len() / INDICES_PER_QUAD
    }

    pub fn billboard_count(&self) -> usize {
        self.billboard_indices.len() / INDICES_PER_QUAD
    }

    pub fn fluid_face_count(&self) -> usize {
        self.fluid_indices.len() / INDICES_PER_QUAD
    }

    pub fn is_empty(&self) -> bool {
        self.solid_indices.is_empty()
            && self.billboard_indices.is_empty()
            && self.fluid_indices.is_empty()
    }

    pub fn stats(&self) -> MeshStats {
        let vertex_size = self.solid_vertices.len() * std::mem::size_of::<SolidVertex>()
            + self.billboard_vertices.len() * std::mem::size_of::<BillboardVertex>()
            + self.fluid_vertices.len() * std::mem::size_of::<FluidVertex>();
        let index_count =
            self.solid_indices.len() + self.billboard_indices.len() + self.fluid_indices.len();
        let index_size = index_count * std::mem::size_of::<u32>();
        MeshStats {
            solid_faces: self.solid_face_count(),
            source_faces: self.source_faces,
            billboards: self.billboard_count(),
            fluid_faces: self.fluid_face_count(),
            vertex_count: self.solid_vertices.len()
                + self.billboard_vertices.len()
                + self.fluid_vertices.len(),
            index_count,
            vertex_size,
            index_size,
            total_size: vertex_size + index_size,
        }
    }
}

/// Mesh statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub solid_faces: usize,
    pub source_faces: usize,
    pub billboards: usize,
    pub fluid_faces: usize,
    pub vertex_count: usize,
    pub index_count: usize,
    pub vertex_size: usize,
    pub index_size: usize,
    pub total_size: usize,
}

impl std::fmt::Display for MeshStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Mesh: {} solid quads (from {} faces), {} billboards, {} fluid faces, {} vertices ({}B), {} indices ({}B), Total: {}B",
            self.solid_faces,
            self.source_faces,
            self.billboards,
            self.fluid_faces,
            self.vertex_count,
            self.vertex_size,
            self.index_count,
            self.index_size,
            self.total_size
        )
    }
}
