//! Vertex formats for the three geometry classes
//!
//! Layouts are bit-exact with what the external renderer's shaders consume.

use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;

/// Solid block vertex
///
/// The fragment stage computes `uv = tile_base + fract(tile_coord) * tile_size`
/// so the texture repeats once per block across a merged quad.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SolidVertex {
    /// World-space position
    pub position: [f32; 3],
    /// RGB = lighting, A = face direction index
    pub color: [u8; 4],
    /// Block-unit coordinate across the merged quad, 0..width by 0..height
    pub tile_coord: [f32; 2],
    /// Atlas region origin, identical on all four corners of a quad
    pub tile_base: [f32; 2],
    /// Atlas region size, identical on all four corners of a quad
    pub tile_size: [f32; 2],
    /// World-space block coordinate for dynamic light sampling
    pub block_coord: [f32; 3],
}

impl SolidVertex {
    pub const ATTRIBS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Unorm8x4,  // color
        2 => Float32x2, // tile_coord
        3 => Float32x2, // tile_base
        4 => Float32x2, // tile_size
        5 => Float32x3, // block_coord
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SolidVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Camera-facing sprite vertex
///
/// Every corner of a quad shares the item center; the renderer rotates
/// `offset` toward the camera.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BillboardVertex {
    /// World-space item center
    pub position: [f32; 3],
    pub color: [u8; 4],
    pub tex_coord: [f32; 2],
    /// Billboard-space offset from the center
    pub offset: [f32; 2],
}

impl BillboardVertex {
    pub const ATTRIBS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Unorm8x4,  // color
        2 => Float32x2, // tex_coord
        3 => Float32x2, // offset
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BillboardVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Liquid surface vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FluidVertex {
    pub position: [f32; 3],
    pub color: [u8; 4],
    pub tex_coord: [f32; 2],
    /// Face direction index as a float
    pub direction: f32,
    /// 1.0 on the top surface, 0.0 elsewhere
    pub top: f32,
}

impl FluidVertex {
    pub const ATTRIBS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Unorm8x4,  // color
        2 => Float32x2, // tex_coord
        3 => Float32,   // direction
        4 => Float32,   // top
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FluidVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

const_assert_eq!(std::mem::size_of::<SolidVertex>(), 52);
const_assert_eq!(std::mem::size_of::<BillboardVertex>(), 32);
const_assert_eq!(std::mem::size_of::<FluidVertex>(), 32);

#[cfg(test)]
mod tests {
    use super::*;

    fn last_attribute_end(attribs: &[wgpu::VertexAttribute]) -> u64 {
        let last = attribs[attribs.len() - 1];
        last.offset + last.format.size()
    }

    #[test]
    fn test_layouts_cover_struct_without_padding() {
        assert_eq!(
            last_attribute_end(&SolidVertex::ATTRIBS),
            SolidVertex::layout().array_stride
        );
        assert_eq!(
            last_attribute_end(&BillboardVertex::ATTRIBS),
            BillboardVertex::layout().array_stride
        );
        assert_eq!(
            last_attribute_end(&FluidVertex::ATTRIBS),
            FluidVertex::layout().array_stride
        );
    }

    #[test]
    fn test_solid_attribute_offsets() {
        let offsets: Vec<u64> = SolidVertex::ATTRIBS.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 16, 24, 32, 40]);
    }

    #[test]
    fn test_vertices_cast_to_bytes() {
        let vertices = [FluidVertex {
            top: 1.0,
            ..FluidVertex::default()
        }; 4];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 4 * 32);
    }
}
