use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a block type, stored in 8 bits of every voxel cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlockType(pub u8);

// Safe because BlockType is just a u8
unsafe impl bytemuck::Pod for BlockType {}
unsafe impl bytemuck::Zeroable for BlockType {}

impl Default for BlockType {
    fn default() -> Self {
        BlockType::AIR
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BlockType::AIR => write!(f, "Air"),
            BlockType::DIRT => write!(f, "Dirt"),
            BlockType::GRASS => write!(f, "Grass"),
            BlockType::STONE => write!(f, "Stone"),
            BlockType::WATER => write!(f, "Water"),
            BlockType::SAND => write!(f, "Sand"),
            BlockType::WOOD => write!(f, "Wood"),
            BlockType::LEAVES => write!(f, "Leaves"),
            BlockType::GLASS => write!(f, "Glass"),
            BlockType::BRICK => write!(f, "Brick"),
            BlockType::BEDROCK => write!(f, "Bedrock"),
            BlockType::SNOW => write!(f, "Snow"),
            BlockType::LAVA => write!(f, "Lava"),
            BlockType::FLOWER => write!(f, "Flower"),
            BlockType::TALL_GRASS => write!(f, "Tall Grass"),
            _ => write!(f, "Block({})", self.0),
        }
    }
}

impl BlockType {
    pub const AIR: BlockType = BlockType(0);
    pub const DIRT: BlockType = BlockType(1);
    pub const GRASS: BlockType = BlockType(2);
    pub const STONE: BlockType = BlockType(3);
    pub const WATER: BlockType = BlockType(4);
    pub const SAND: BlockType = BlockType(5);
    pub const WOOD: BlockType = BlockType(6);
    pub const LEAVES: BlockType = BlockType(7);
    pub const GLASS: BlockType = BlockType(8);
    pub const BRICK: BlockType = BlockType(9);
    pub const BEDROCK: BlockType = BlockType(10);
    pub const SNOW: BlockType = BlockType(11);
    pub const LAVA: BlockType = BlockType(12);
    pub const FLOWER: BlockType = BlockType(13);
    pub const TALL_GRASS: BlockType = BlockType(14);

    /// Create a new BlockType from a raw u8 value
    pub const fn new(id: u8) -> Self {
        BlockType(id)
    }

    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == 0
    }
}

/// One of the six cube faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockSide {
    /// +Y
    Top = 0,
    /// -Y
    Bottom = 1,
    /// -Z
    North = 2,
    /// +Z
    South = 3,
    /// +X
    East = 4,
    /// -X
    West = 5,
}

impl BlockSide {
    pub const ALL: [BlockSide; 6] = [
        BlockSide::Top,
        BlockSide::Bottom,
        BlockSide::North,
        BlockSide::South,
        BlockSide::East,
        BlockSide::West,
    ];

    /// Index used for per-side arrays and the vertex face-direction channel
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(BlockSide::Top),
            1 => Some(BlockSide::Bottom),
            2 => Some(BlockSide::North),
            3 => Some(BlockSide::South),
            4 => Some(BlockSide::East),
            5 => Some(BlockSide::West),
            _ => None,
        }
    }

    /// Unit offset towards the neighbor cell on this side
    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            BlockSide::Top => (0, 1, 0),
            BlockSide::Bottom => (0, -1, 0),
            BlockSide::North => (0, 0, -1),
            BlockSide::South => (0, 0, 1),
            BlockSide::East => (1, 0, 0),
            BlockSide::West => (-1, 0, 0),
        }
    }

    /// Axis perpendicular to the face (0 = X, 1 = Y, 2 = Z)
    pub const fn axis(self) -> usize {
        match self {
            BlockSide::East | BlockSide::West => 0,
            BlockSide::Top | BlockSide::Bottom => 1,
            BlockSide::North | BlockSide::South => 2,
        }
    }

    /// True when the outward normal points along the positive axis
    pub const fn is_positive(self) -> bool {
        matches!(self, BlockSide::Top | BlockSide::South | BlockSide::East)
    }

    /// In-plane (u, v) axes used for merging and texture tiling
    pub const fn plane_axes(self) -> (usize, usize) {
        match self {
            BlockSide::Top | BlockSide::Bottom => (0, 2),
            BlockSide::North | BlockSide::South => (0, 1),
            BlockSide::East | BlockSide::West => (2, 1),
        }
    }

    pub const fn is_vertical(self) -> bool {
        !matches!(self, BlockSide::Top | BlockSide::Bottom)
    }

    pub const fn opposite(self) -> Self {
        match self {
            BlockSide::Top => BlockSide::Bottom,
            BlockSide::Bottom => BlockSide::Top,
            BlockSide::North => BlockSide::South,
            BlockSide::South => BlockSide::North,
            BlockSide::East => BlockSide::West,
            BlockSide::West => BlockSide::East,
        }
    }

    pub fn normal(self) -> [f32; 3] {
        let (x, y, z) = self.offset();
        [x as f32, y as f32, z as f32]
    }
}

impl fmt::Display for BlockSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockSide::Top => "top",
            BlockSide::Bottom => "bottom",
            BlockSide::North => "north",
            BlockSide::South => "south",
            BlockSide::East => "east",
            BlockSide::West => "west",
        };
        write!(f, "{}", name)
    }
}
