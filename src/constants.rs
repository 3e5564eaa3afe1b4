//! Engine-wide constants

pub mod core {
    /// Default chunk width (X) in blocks
    pub const CHUNK_WIDTH: u32 = 32;
    /// Default chunk height (Y) in blocks
    pub const CHUNK_HEIGHT: u32 = 64;
    /// Default chunk depth (Z) in blocks
    pub const CHUNK_DEPTH: u32 = 32;
}

pub mod voxel {
    /// Maximum stored water level (full source block)
    pub const MAX_WATER_LEVEL: u8 = 7;
    /// Maximum stored light level (full bright)
    pub const MAX_LIGHT_LEVEL: u8 = 15;
    /// Maximum value of one channel in the packed RGB light grid
    pub const MAX_LIGHT_CHANNEL: u8 = 15;
}

pub mod mesh {
    /// Indices emitted per quad (two triangles)
    pub const INDICES_PER_QUAD: usize = 6;
    /// Half extent of a billboard quad in blocks
    pub const BILLBOARD_HALF_EXTENT: f32 = 0.5;
    /// Half extent of an item sprite in blocks
    pub const ITEM_HALF_EXTENT: f32 = 0.25;
}

pub mod atlas {
    /// Pixels of padding around every atlas tile to prevent bleeding
    pub const TILE_PADDING: u32 = 2;
    /// Default atlas tile size in pixels
    pub const DEFAULT_TILE_SIZE: u32 = 16;
}
