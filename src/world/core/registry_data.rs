//! Block Registry Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in registry_operations.rs

use super::BlockType;
use crate::renderer::TextureRegion;
use crate::world::blocks::block_data::BlockDefinition;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A registered block: its definition plus one resolved texture per authored side
#[derive(Debug, Clone)]
pub struct ResolvedBlock {
    pub definition: BlockDefinition,
    /// Indexed by `BlockSide::index()`
    pub side_textures: [Option<TextureRegion>; 6],
}

/// Registry data that stores all block types
///
/// Entries are behind `Arc` so a registry snapshot is cheap to clone and a
/// replaced entry never mutates in place.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistryData {
    pub blocks: FxHashMap<BlockType, Arc<ResolvedBlock>>,
}

/// A parsed texture reference string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureRef<'a> {
    /// `"stone"`
    Named(&'a str),
    /// `"terrain#4"`
    AtlasTile { atlas: &'a str, index: u32 },
}
