//! Basic engine blocks
//!
//! This module defines the fundamental blocks that come with the engine.
//! Games can register additional blocks on top of these.

use crate::constants::atlas::DEFAULT_TILE_SIZE;
use crate::error::EngineResult;
use crate::renderer::{texture_atlas_operations, TextureLibrary, TextureProvider};
use crate::world::blocks::block_data::BlockDefinition;
use crate::world::core::{BlockRegistry, BlockSide, BlockType};

/// Atlas holding the opaque terrain tiles
pub const TERRAIN_ATLAS: &str = "terrain";

/// Tile layout of the terrain atlas, in insertion order
pub mod terrain_tiles {
    pub const DIRT: u32 = 0;
    pub const GRASS_TOP: u32 = 1;
    pub const GRASS_SIDE: u32 = 2;
    pub const STONE: u32 = 3;
    pub const SAND: u32 = 4;
    pub const WOOD_SIDE: u32 = 5;
    pub const WOOD_TOP: u32 = 6;
    pub const LEAVES: u32 = 7;
    pub const BRICK: u32 = 8;
    pub const BEDROCK: u32 = 9;
    pub const SNOW: u32 = 10;
    pub const GLASS: u32 = 11;
}

const TERRAIN_COLORS: [[u8; 3]; 12] = [
    [101, 67, 33],   // dirt
    [0, 154, 23],    // grass top
    [92, 110, 40],   // grass side
    [128, 128, 128], // stone
    [194, 178, 128], // sand
    [139, 69, 19],   // wood side
    [170, 120, 60],  // wood top
    [34, 139, 34],   // leaves
    [150, 60, 50],   // brick
    [40, 40, 40],    // bedrock
    [240, 240, 250], // snow
    [200, 230, 240], // glass
];

/// Standalone textures used by the liquid and sprite blocks
///
/// Everything drawn in the solid pass lives in the terrain atlas, since a
/// chunk binds a single texture for that pass.
pub const STANDALONE_TEXTURES: [&str; 4] = ["water", "lava", "flower", "tall_grass"];

fn terrain(tile: u32) -> String {
    format!("{}#{}", TERRAIN_ATLAS, tile)
}

/// Build a texture library containing everything the basic blocks reference
pub fn create_default_textures() -> TextureLibrary {
    let mut library = TextureLibrary::new();
    library.create_atlas(TERRAIN_ATLAS, 256, DEFAULT_TILE_SIZE);
    if let Some(atlas) = library.atlas_mut(TERRAIN_ATLAS) {
        texture_atlas_operations::add_solid_tiles(atlas, &TERRAIN_COLORS);
    }
    for name in STANDALONE_TEXTURES {
        library.register_texture(name);
    }
    library
}

pub fn create_dirt_definition() -> BlockDefinition {
    BlockDefinition::new(BlockType::DIRT, "dirt").with_all_sides(&terrain(terrain_tiles::DIRT))
}

pub fn create_grass_definition() -> BlockDefinition {
    BlockDefinition::new(BlockType::GRASS, "grass")
        .with_all_sides(&terrain(terrain_tiles::GRASS_SIDE))
        .with_side(BlockSide::Top, &terrain(terrain_tiles::GRASS_TOP))
        .with_side(BlockSide::Bottom, &terrain(terrain_tiles::DIRT))
}

pub fn create_stone_definition() -> BlockDefinition {
    BlockDefinition::new(BlockType::STONE, "stone").with_all_sides(&terrain(terrain_tiles::STONE))
}

pub fn create_sand_definition() -> BlockDefinition {
    BlockDefinition::new(BlockType::SAND, "sand").with_all_sides(&terrain(terrain_tiles::SAND))
}

pub fn create_wood_definition() -> BlockDefinition {
    BlockDefinition::new(BlockType::WOOD, "wood")
        .with_all_sides(&terrain(terrain_tiles::WOOD_SIDE))
        .with_side(BlockSide::Top, &terrain(terrain_tiles::WOOD_TOP))
        .with_side(BlockSide::Bottom, &terrain(terrain_tiles::WOOD_TOP))
}

pub fn create_leaves_definition() -> BlockDefinition {
    BlockDefinition::new(BlockType::LEAVES, "leaves")
        .with_all_sides(&terrain(terrain_tiles::LEAVES))
        .transparent()
}

pub fn create_brick_definition() -> BlockDefinition {
    BlockDefinition::new(BlockType::BRICK, "brick").with_all_sides(&terrain(terrain_tiles::BRICK))
}

pub fn create_bedrock_definition() -> BlockDefinition {
    BlockDefinition::new(BlockType::BEDROCK, "bedrock")
        .with_all_sides(&terrain(terrain_tiles::BEDROCK))
}

/// Snow is a partial-height layer
pub fn create_snow_definition() -> BlockDefinition {
    BlockDefinition::new(BlockType::SNOW, "snow")
        .with_all_sides(&terrain(terrain_tiles::SNOW))
        .with_height(0.125)
}

pub fn create_glass_definition() -> BlockDefinition {
    BlockDefinition::new(BlockType::GLASS, "glass")
        .with_all_sides(&terrain(terrain_tiles::GLASS))
        .transparent()
}

pub fn create_water_definition() -> BlockDefinition {
    BlockDefinition::new(BlockType::WATER, "water")
        .with_all_sides("water")
        .liquid()
        .with_height(0.875)
}

pub fn create_lava_definition() -> BlockDefinition {
    BlockDefinition::new(BlockType::LAVA, "lava")
        .with_all_sides("lava")
        .liquid()
        .with_height(0.875)
}

pub fn create_flower_definition() -> BlockDefinition {
    BlockDefinition::new(BlockType::FLOWER, "flower")
        .with_side(BlockSide::North, "flower")
        .item()
}

pub fn create_tall_grass_definition() -> BlockDefinition {
    BlockDefinition::new(BlockType::TALL_GRASS, "tall_grass")
        .with_side(BlockSide::North, "tall_grass")
        .billboard()
}

/// Every basic block definition, in block type order
pub fn basic_block_definitions() -> Vec<BlockDefinition> {
    vec![
        create_dirt_definition(),
        create_grass_definition(),
        create_stone_definition(),
        create_water_definition(),
        create_sand_definition(),
        create_wood_definition(),
        create_leaves_definition(),
        create_glass_definition(),
        create_brick_definition(),
        create_bedrock_definition(),
        create_snow_definition(),
        create_lava_definition(),
        create_flower_definition(),
        create_tall_grass_definition(),
    ]
}

/// Register all basic engine blocks
///
/// Air is never registered. Returns the total number of faces registered.
pub fn register_basic_blocks(
    registry: &BlockRegistry,
    provider: &dyn TextureProvider,
) -> EngineResult<usize> {
    let mut faces = 0;
    for definition in basic_block_definitions() {
        faces += registry.register(definition, provider)?;
    }
    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_blocks_resolve_against_default_textures() {
        let library = create_default_textures();
        let registry = BlockRegistry::new();
        let faces = register_basic_blocks(&registry, &library).unwrap();

        assert_eq!(registry.len(), 14);
        // 12 cubes with six faces, two sprites with one
        assert_eq!(faces, 12 * 6 + 2);
        assert!(!registry.is_registered(BlockType::AIR));
        assert!(registry.is_liquid(BlockType::WATER));
        assert!(registry.is_transparent(BlockType::LEAVES));
        assert!(!registry.is_transparent(BlockType::STONE));
        assert!(registry.is_solid(BlockType::GLASS));
        assert!(!registry.is_solid(BlockType::TALL_GRASS));
    }

    #[test]
    fn test_grass_uses_distinct_top_texture() {
        let library = create_default_textures();
        let registry = BlockRegistry::new();
        register_basic_blocks(&registry, &library).unwrap();

        let top = registry.get_side_texture(BlockType::GRASS, BlockSide::Top).unwrap();
        let side = registry.get_side_texture(BlockType::GRASS, BlockSide::East).unwrap();
        assert_ne!(top, side);
        assert_eq!(
            Some(top),
            library.get_atlas_tile(TERRAIN_ATLAS, terrain_tiles::GRASS_TOP)
        );
    }

    #[test]
    fn test_solid_pass_blocks_share_terrain_atlas() {
        let library = create_default_textures();
        let registry = BlockRegistry::new();
        register_basic_blocks(&registry, &library).unwrap();
        let terrain = library.atlas(TERRAIN_ATLAS).map(|atlas| atlas.handle);

        for definition in basic_block_definitions() {
            if definition.is_liquid || definition.is_sprite() {
                continue;
            }
            for side in BlockSide::ALL {
                let region = registry
                    .get_side_texture(definition.block_type, side)
                    .unwrap();
                assert_eq!(Some(region.texture), terrain, "{} {}", definition.name, side);
            }
        }
    }
}
