//! Chunk Operations - Pure DOP Functions
//!
//! Every coordinate accessor validates its input and reports the offending
//! coordinate together with the chunk size. Nothing is clamped or wrapped.

use super::chunk_data::{ChunkData, ChunkDimensions};
use super::voxel::{LightColor, PackedLight, VoxelCell};
use crate::error::{EngineError, EngineResult};
use crate::world::core::{BlockType, ChunkPos};
use glam::{IVec3, Vec3};

/// Create new chunk with all air blocks at full light
pub fn create_chunk(position: ChunkPos, dimensions: ChunkDimensions) -> ChunkData {
    create_filled(position, dimensions, VoxelCell::EMPTY)
}

/// Create new chunk with every cell set to `cell`
pub fn create_filled(position: ChunkPos, dimensions: ChunkDimensions, cell: VoxelCell) -> ChunkData {
    let volume = dimensions.volume();
    ChunkData {
        position,
        dimensions,
        cells: vec![cell; volume],
        light: vec![PackedLight::default(); volume],
        revision: 0,
    }
}

/// Row-major index: `x + y*W + z*W*H`
#[inline]
pub fn index_of(dimensions: ChunkDimensions, x: i32, y: i32, z: i32) -> EngineResult<usize> {
    if !dimensions.contains(x, y, z) {
        return Err(EngineError::BlockOutOfBounds {
            pos: (x, y, z),
            size: dimensions.as_tuple(),
        });
    }
    Ok(linear_index(dimensions, x, y, z))
}

/// Inverse of `index_of`
pub fn coords_of(dimensions: ChunkDimensions, index: usize) -> EngineResult<(i32, i32, i32)> {
    let len = dimensions.volume();
    if index >= len {
        return Err(EngineError::IndexOutOfBounds { index, len });
    }
    let width = dimensions.width as usize;
    let layer = width * dimensions.height as usize;
    let x = index % width;
    let y = (index % layer) / width;
    let z = index / layer;
    Ok((x as i32, y as i32, z as i32))
}

/// Caller guarantees the coordinate is inside `dimensions`
#[inline]
pub(crate) fn linear_index(dimensions: ChunkDimensions, x: i32, y: i32, z: i32) -> usize {
    let w = dimensions.width as usize;
    let h = dimensions.height as usize;
    x as usize + y as usize * w + z as usize * w * h
}

/// Non-throwing bounds check
#[inline]
pub fn is_in_bounds(data: &ChunkData, x: i32, y: i32, z: i32) -> bool {
    data.dimensions.contains(x, y, z)
}

/// Cell lookup that returns None outside the chunk
#[inline]
pub fn try_get(data: &ChunkData, x: i32, y: i32, z: i32) -> Option<VoxelCell> {
    if is_in_bounds(data, x, y, z) {
        Some(data.cells[linear_index(data.dimensions, x, y, z)])
    } else {
        None
    }
}

/// Light grid lookup that returns None outside the chunk
#[inline]
pub fn try_get_light_rgb(data: &ChunkData, x: i32, y: i32, z: i32) -> Option<PackedLight> {
    if is_in_bounds(data, x, y, z) {
        Some(data.light[linear_index(data.dimensions, x, y, z)])
    } else {
        None
    }
}

pub fn get(data: &ChunkData, x: i32, y: i32, z: i32) -> EngineResult<VoxelCell> {
    let index = index_of(data.dimensions, x, y, z)?;
    Ok(data.cells[index])
}

pub fn set(data: &mut ChunkData, x: i32, y: i32, z: i32, cell: VoxelCell) -> EngineResult<()> {
    let index = index_of(data.dimensions, x, y, z)?;
    data.cells[index] = cell;
    data.revision += 1;
    Ok(())
}

/// Read-modify-write of a single cell
fn update<F>(data: &mut ChunkData, x: i32, y: i32, z: i32, f: F) -> EngineResult<()>
where
    F: FnOnce(&mut VoxelCell),
{
    let index = index_of(data.dimensions, x, y, z)?;
    f(&mut data.cells[index]);
    data.revision += 1;
    Ok(())
}

pub fn get_block_type(data: &ChunkData, x: i32, y: i32, z: i32) -> EngineResult<BlockType> {
    Ok(get(data, x, y, z)?.block_type())
}

pub fn set_block_type(
    data: &mut ChunkData,
    x: i32,
    y: i32,
    z: i32,
    block_type: BlockType,
) -> EngineResult<()> {
    update(data, x, y, z, |cell| cell.set_block_type(block_type))
}

pub fn get_water_level(data: &ChunkData, x: i32, y: i32, z: i32) -> EngineResult<u8> {
    Ok(get(data, x, y, z)?.water_level())
}

/// Clamped to 0-7
pub fn set_water_level(data: &mut ChunkData, x: i32, y: i32, z: i32, level: u8) -> EngineResult<()> {
    update(data, x, y, z, |cell| cell.set_water_level(level))
}

pub fn get_light_level(data: &ChunkData, x: i32, y: i32, z: i32) -> EngineResult<u8> {
    Ok(get(data, x, y, z)?.light_level())
}

/// Clamped to 0-15
pub fn set_light_level(data: &mut ChunkData, x: i32, y: i32, z: i32, level: u8) -> EngineResult<()> {
    update(data, x, y, z, |cell| cell.set_light_level(level))
}

pub fn get_light_color(data: &ChunkData, x: i32, y: i32, z: i32) -> EngineResult<LightColor> {
    Ok(get(data, x, y, z)?.light_color())
}

pub fn set_light_color(
    data: &mut ChunkData,
    x: i32,
    y: i32,
    z: i32,
    color: LightColor,
) -> EngineResult<()> {
    update(data, x, y, z, |cell| cell.set_light_color(color))
}

/// Colored light grid value at a cell
pub fn get_light_rgb(data: &ChunkData, x: i32, y: i32, z: i32) -> EngineResult<PackedLight> {
    let index = index_of(data.dimensions, x, y, z)?;
    Ok(data.light[index])
}

/// Each channel clamped to 0-15
pub fn set_light_rgb(
    data: &mut ChunkData,
    x: i32,
    y: i32,
    z: i32,
    r: u8,
    g: u8,
    b: u8,
) -> EngineResult<()> {
    let index = index_of(data.dimensions, x, y, z)?;
    data.light[index] = PackedLight::new(r, g, b);
    data.revision += 1;
    Ok(())
}

/// Overwrite every cell; the light grid is left untouched
pub fn fill(data: &mut ChunkData, cell: VoxelCell) {
    data.cells.fill(cell);
    data.revision += 1;
}

/// Number of cells whose block type is not Air
pub fn non_air_count(data: &ChunkData) -> usize {
    data.cells.iter().filter(|cell| !cell.is_air()).count()
}

/// Get cells slice, in `index_of` order
pub fn cells(data: &ChunkData) -> &[VoxelCell] {
    &data.cells
}

/// World-space position of the chunk's (0, 0, 0) cell
pub fn world_origin(data: &ChunkData) -> IVec3 {
    let dims = data.dimensions;
    IVec3::new(
        data.position.x * dims.width as i32,
        data.position.y * dims.height as i32,
        data.position.z * dims.depth as i32,
    )
}

/// World-space center: origin + half dimensions
pub fn world_center(data: &ChunkData) -> Vec3 {
    let dims = data.dimensions;
    world_origin(data).as_vec3()
        + Vec3::new(
            dims.width as f32 * 0.5,
            dims.height as f32 * 0.5,
            dims.depth as f32 * 0.5,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn small_chunk() -> ChunkData {
        create_chunk(ChunkPos::new(0, 0, 0), ChunkDimensions::new(4, 3, 5))
    }

    #[test]
    fn test_new_chunk_is_air_at_full_light() {
        let chunk = create_chunk(ChunkPos::default(), ChunkDimensions::DEFAULT);
        assert_eq!(chunk.cells.len(), 32 * 64 * 32);
        assert_eq!(chunk.light.len(), chunk.cells.len());
        assert_eq!(non_air_count(&chunk), 0);
        assert_eq!(get_light_level(&chunk, 31, 63, 31).unwrap(), 15);
        assert_eq!(get_light_color(&chunk, 0, 0, 0).unwrap(), LightColor::WHITE);
        assert_eq!(get_light_rgb(&chunk, 0, 0, 0).unwrap(), PackedLight::default());
    }

    #[test]
    fn test_storage_matches_dimensions() {
        for dims in [ChunkDimensions::new(2, 2, 2), ChunkDimensions::new(4, 3, 5), ChunkDimensions::DEFAULT] {
            let mut chunk = create_filled(ChunkPos::default(), dims, VoxelCell::of(BlockType::STONE));
            fill(&mut chunk, VoxelCell::EMPTY);
            assert_eq!(chunk.dimensions(), dims);
            assert_eq!(cells(&chunk).len(), dims.volume());
            assert_eq!(chunk.light.len(), dims.volume());
            let (w, h, d) = dims.as_tuple();
            assert!(set_block_type(&mut chunk, w as i32 - 1, h as i32 - 1, d as i32 - 1, BlockType::DIRT).is_ok());
            assert!(set_block_type(&mut chunk, w as i32, 0, 0, BlockType::DIRT).is_err());
        }
    }

    #[test]
    fn test_index_bijection() {
        let dims = ChunkDimensions::new(4, 3, 5);
        let mut seen = HashSet::new();
        for z in 0..5 {
            for y in 0..3 {
                for x in 0..4 {
                    let index = index_of(dims, x, y, z).unwrap();
                    assert!(index < dims.volume());
                    assert!(seen.insert(index));
                    assert_eq!(coords_of(dims, index).unwrap(), (x, y, z));
                }
            }
        }
        assert_eq!(seen.len(), dims.volume());
    }

    #[test]
    fn test_row_major_layout() {
        let dims = ChunkDimensions::new(4, 3, 5);
        assert_eq!(index_of(dims, 1, 0, 0).unwrap(), 1);
        assert_eq!(index_of(dims, 0, 1, 0).unwrap(), 4);
        assert_eq!(index_of(dims, 0, 0, 1).unwrap(), 12);
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let mut chunk = small_chunk();
        let err = get(&chunk, 4, 0, 0).unwrap_err();
        assert_eq!(
            err,
            EngineError::BlockOutOfBounds {
                pos: (4, 0, 0),
                size: (4, 3, 5)
            }
        );
        assert!(get(&chunk, -1, 0, 0).is_err());
        assert!(set_block_type(&mut chunk, 0, 3, 0, BlockType::STONE).is_err());
        assert!(set_light_rgb(&mut chunk, 0, 0, 5, 1, 1, 1).is_err());
        assert_eq!(
            coords_of(chunk.dimensions, 60),
            Err(EngineError::IndexOutOfBounds { index: 60, len: 60 })
        );
        // A failed write changes nothing
        assert_eq!(chunk.revision, 0);
        assert_eq!(non_air_count(&chunk), 0);
    }

    #[test]
    fn test_is_in_bounds() {
        let chunk = small_chunk();
        assert!(is_in_bounds(&chunk, 0, 0, 0));
        assert!(is_in_bounds(&chunk, 3, 2, 4));
        assert!(!is_in_bounds(&chunk, 3, 3, 4));
        assert!(!is_in_bounds(&chunk, 0, -1, 0));
        assert_eq!(try_get(&chunk, 0, 0, 5), None);
    }

    #[test]
    fn test_field_accessors_are_independent() {
        let mut chunk = small_chunk();
        set_block_type(&mut chunk, 1, 1, 1, BlockType::WATER).unwrap();
        set_water_level(&mut chunk, 1, 1, 1, 9).unwrap();
        set_light_level(&mut chunk, 1, 1, 1, 20).unwrap();
        set_light_color(&mut chunk, 1, 1, 1, LightColor::new(200, 100, 50)).unwrap();

        assert_eq!(get_block_type(&chunk, 1, 1, 1).unwrap(), BlockType::WATER);
        assert_eq!(get_water_level(&chunk, 1, 1, 1).unwrap(), 7);
        assert_eq!(get_light_level(&chunk, 1, 1, 1).unwrap(), 15);
        assert_eq!(
            get_light_color(&chunk, 1, 1, 1).unwrap(),
            LightColor::new(200, 100, 50)
        );
        assert_eq!(non_air_count(&chunk), 1);
        assert_eq!(chunk.revision, 4);
    }

    #[test]
    fn test_light_grid() {
        let mut chunk = small_chunk();
        set_light_rgb(&mut chunk, 2, 0, 3, 4, 20, 9).unwrap();
        let light = get_light_rgb(&chunk, 2, 0, 3).unwrap();
        assert_eq!(light.channels(), [4, 15, 9]);
        // Solid blocks keep their light values
        set_block_type(&mut chunk, 2, 0, 3, BlockType::STONE).unwrap();
        assert_eq!(get_light_rgb(&chunk, 2, 0, 3).unwrap(), light);
    }

    #[test]
    fn test_fill_and_count() {
        let mut chunk = small_chunk();
        fill(&mut chunk, VoxelCell::of(BlockType::DIRT));
        assert_eq!(non_air_count(&chunk), 60);
        set(&mut chunk, 0, 0, 0, VoxelCell::EMPTY).unwrap();
        assert_eq!(non_air_count(&chunk), 59);
        assert!(cells(&chunk)[0].is_air());
    }

    #[test]
    fn test_world_origin_and_center() {
        let chunk = create_chunk(ChunkPos::new(1, -1, 2), ChunkDimensions::DEFAULT);
        assert_eq!(world_origin(&chunk), IVec3::new(32, -64, 64));
        assert_eq!(world_center(&chunk), Vec3::new(48.0, -32.0, 80.0));
    }
}
