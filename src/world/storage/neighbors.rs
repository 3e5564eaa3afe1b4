use super::chunk_data::ChunkData;
use super::chunk_operations;
use super::voxel::VoxelCell;
use crate::world::core::{BlockSide, ChunkPos};

/// Borrowed view of the up to six chunks adjacent to the one being meshed
///
/// Indexed by `BlockSide::index()`. `None` means the neighbor is not loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkNeighbors<'a> {
    chunks: [Option<&'a ChunkData>; 6],
}

impl<'a> ChunkNeighbors<'a> {
    /// No neighbor loaded on any side
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(chunks: [Option<&'a ChunkData>; 6]) -> Self {
        Self { chunks }
    }

    /// Gather neighbors of `center` from an external chunk lookup
    pub fn from_lookup<F>(center: ChunkPos, mut lookup: F) -> Self
    where
        F: FnMut(ChunkPos) -> Option<&'a ChunkData>,
    {
        let mut chunks = [None; 6];
        for side in BlockSide::ALL {
            chunks[side.index()] = lookup(center.neighbor(side));
        }
        Self { chunks }
    }

    pub fn with(mut self, side: BlockSide, chunk: &'a ChunkData) -> Self {
        self.chunks[side.index()] = Some(chunk);
        self
    }

    pub fn get(&self, side: BlockSide) -> Option<&'a ChunkData> {
        self.chunks[side.index()]
    }

    pub fn loaded_count(&self) -> usize {
        self.chunks.iter().filter(|c| c.is_some()).count()
    }

    /// Cell in the neighbor chunk directly across `side` from the edge cell
    /// `(x, y, z)` of the current chunk
    ///
    /// Returns None when that neighbor is not loaded or its dimensions do not
    /// cover the mirrored coordinate.
    pub fn cell_across(&self, side: BlockSide, x: i32, y: i32, z: i32) -> Option<VoxelCell> {
        let chunk = self.get(side)?;
        let axis = side.axis();
        let mut p = [x, y, z];
        p[axis] = if side.is_positive() {
            0
        } else {
            chunk.dimensions.extent(axis) as i32 - 1
        };
        chunk_operations::try_get(chunk, p[0], p[1], p[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::core::BlockType;
    use crate::world::storage::chunk_data::ChunkDimensions;

    #[test]
    fn test_cell_across_mirrors_the_edge() {
        let dims = ChunkDimensions::new(4, 4, 4);
        let mut east = chunk_operations::create_chunk(ChunkPos::new(1, 0, 0), dims);
        chunk_operations::set_block_type(&mut east, 0, 2, 3, BlockType::STONE).unwrap();
        let mut below = chunk_operations::create_chunk(ChunkPos::new(0, -1, 0), dims);
        chunk_operations::set_block_type(&mut below, 1, 3, 1, BlockType::SAND).unwrap();

        let neighbors = ChunkNeighbors::none()
            .with(BlockSide::East, &east)
            .with(BlockSide::Bottom, &below);

        assert_eq!(
            neighbors.cell_across(BlockSide::East, 3, 2, 3).map(|c| c.block_type()),
            Some(BlockType::STONE)
        );
        assert_eq!(
            neighbors.cell_across(BlockSide::Bottom, 1, 0, 1).map(|c| c.block_type()),
            Some(BlockType::SAND)
        );
        assert_eq!(neighbors.cell_across(BlockSide::West, 0, 0, 0), None);
        assert_eq!(neighbors.loaded_count(), 2);
    }

    #[test]
    fn test_from_lookup() {
        let dims = ChunkDimensions::new(2, 2, 2);
        let chunks: Vec<ChunkData> = [ChunkPos::new(0, 0, -1), ChunkPos::new(5, 5, 5)]
            .into_iter()
            .map(|pos| chunk_operations::create_chunk(pos, dims))
            .collect();

        let neighbors = ChunkNeighbors::from_lookup(ChunkPos::new(0, 0, 0), |pos| {
            chunks.iter().find(|c| c.position == pos)
        });
        assert!(neighbors.get(BlockSide::North).is_some());
        assert_eq!(neighbors.loaded_count(), 1);
    }
}
