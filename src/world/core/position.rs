use super::block::BlockSide;
use serde::{Deserialize, Serialize};

/// Integer chunk-grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Position of the adjacent chunk across `side`
    pub fn neighbor(self, side: BlockSide) -> Self {
        let (dx, dy, dz) = side.offset();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}
