//! Block Registry Operations - Pure DOP Functions
//!
//! All functions are pure: take data, return results, no side effects.
//! No methods, no self, just transformations.

use super::registry_data::{BlockRegistryData, ResolvedBlock, TextureRef};
use super::{BlockSide, BlockType};
use crate::error::{EngineError, EngineResult};
use crate::renderer::{TextureProvider, TextureRegion};
use crate::world::blocks::block_data::BlockDefinition;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

lazy_static! {
    static ref ATLAS_REF: Regex = Regex::new(r"^([^#]+)#(\d+)$").expect("valid atlas reference pattern");
}

/// Create new, empty block registry data
pub fn create_block_registry() -> BlockRegistryData {
    BlockRegistryData::default()
}

/// Split a texture reference into atlas name and tile index, or a bare name
///
/// Anything that is not exactly `<atlas>#<digits>` is a bare name, so
/// `"stone#"` names a texture called `stone#`.
pub fn parse_texture_ref(reference: &str) -> EngineResult<TextureRef<'_>> {
    let Some(captures) = ATLAS_REF.captures(reference) else {
        return Ok(TextureRef::Named(reference));
    };

    let atlas = captures.get(1).map_or("", |m| m.as_str());
    let digits = captures.get(2).map_or("", |m| m.as_str());
    let index = digits.parse::<u32>().map_err(|_| EngineError::ParseError {
        value: digits.to_string(),
        expected_type: "atlas tile index".to_string(),
    })?;

    Ok(TextureRef::AtlasTile { atlas, index })
}

/// Resolve a texture reference against the provider
pub fn resolve_texture_ref(
    reference: &str,
    provider: &dyn TextureProvider,
) -> EngineResult<TextureRegion> {
    match parse_texture_ref(reference)? {
        TextureRef::Named(name) => provider
            .get_texture(name)
            .map(TextureRegion::full)
            .ok_or_else(|| EngineError::TextureNotFound {
                name: name.to_string(),
            }),
        TextureRef::AtlasTile { atlas, index } => {
            if !provider.has_atlas(atlas) {
                return Err(EngineError::AtlasNotFound {
                    atlas: atlas.to_string(),
                });
            }
            provider
                .get_atlas_tile(atlas, index)
                .ok_or_else(|| EngineError::AtlasTileNotFound {
                    atlas: atlas.to_string(),
                    index: index.to_string(),
                })
        }
    }
}

fn resolve_block(
    definition: BlockDefinition,
    provider: &dyn TextureProvider,
) -> EngineResult<ResolvedBlock> {
    if !(definition.height > 0.0 && definition.height <= 1.0) {
        return Err(EngineError::InvalidConfig {
            field: format!("{}.height", definition.name),
            value: definition.height.to_string(),
            reason: "block height must be in (0, 1]".to_string(),
        });
    }

    let mut side_textures = [None; 6];
    for (side, reference) in &definition.sides {
        side_textures[side.index()] = Some(resolve_texture_ref(reference, provider)?);
    }

    Ok(ResolvedBlock {
        definition,
        side_textures,
    })
}

/// Register a block type, replacing any earlier registration of the same type
///
/// Every side must resolve; on error nothing is stored. Returns the number of
/// faces registered.
pub fn register_block(
    data: &mut BlockRegistryData,
    definition: BlockDefinition,
    provider: &dyn TextureProvider,
) -> EngineResult<usize> {
    let block_type = definition.block_type;
    let resolved = resolve_block(definition, provider)?;
    let faces = resolved.side_textures.iter().flatten().count();

    log::info!(
        "Registered block '{}' ({}) with {} faces",
        resolved.definition.name,
        block_type.0,
        faces
    );

    if data.blocks.insert(block_type, Arc::new(resolved)).is_some() {
        log::debug!("Block type {} re-registered, previous entry replaced", block_type);
    }

    Ok(faces)
}

/// Re-resolve every registered block, e.g. after an atlas was re-packed
///
/// All-or-nothing: the registry is only updated when every block resolves.
pub fn refresh_textures(
    data: &mut BlockRegistryData,
    provider: &dyn TextureProvider,
) -> EngineResult<usize> {
    let mut refreshed = BlockRegistryData::default();
    for (block_type, block) in &data.blocks {
        let resolved = resolve_block(block.definition.clone(), provider)?;
        refreshed.blocks.insert(*block_type, Arc::new(resolved));
    }

    let count = refreshed.blocks.len();
    *data = refreshed;
    log::info!("Refreshed textures for {} block types", count);
    Ok(count)
}

/// Get the registered entry for a block type
pub fn get_block(data: &BlockRegistryData, block_type: BlockType) -> Option<&ResolvedBlock> {
    data.blocks.get(&block_type).map(|block| block.as_ref())
}

/// Get the resolved texture for one face, `None` means "emit no face"
pub fn get_side_texture(
    data: &BlockRegistryData,
    block_type: BlockType,
    side: BlockSide,
) -> Option<TextureRegion> {
    get_block(data, block_type).and_then(|block| block.side_textures[side.index()])
}

/// Get block definition by type
pub fn get_definition(data: &BlockRegistryData, block_type: BlockType) -> Option<&BlockDefinition> {
    get_block(data, block_type).map(|block| &block.definition)
}

/// Unregistered block types count as transparent so missing content never
/// hides its neighbors
pub fn is_transparent(data: &BlockRegistryData, block_type: BlockType) -> bool {
    get_definition(data, block_type).map_or(true, |def| def.is_transparent)
}

pub fn is_liquid(data: &BlockRegistryData, block_type: BlockType) -> bool {
    get_definition(data, block_type).map_or(false, |def| def.is_liquid)
}

/// Whether entities collide with the block; unregistered types never do
pub fn is_solid(data: &BlockRegistryData, block_type: BlockType) -> bool {
    get_definition(data, block_type).map_or(false, |def| def.is_solid)
}

/// Check if a block type is registered
pub fn is_registered(data: &BlockRegistryData, block_type: BlockType) -> bool {
    data.blocks.contains_key(&block_type)
}

pub fn registered_count(data: &BlockRegistryData) -> usize {
    data.blocks.len()
}

/// All registered block types in ascending order
pub fn block_types(data: &BlockRegistryData) -> Vec<BlockType> {
    let mut types: Vec<BlockType> = data.blocks.keys().copied().collect();
    types.sort();
    types
}
