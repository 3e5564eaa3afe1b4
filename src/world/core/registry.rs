use super::registry_data::{BlockRegistryData, ResolvedBlock};
use super::registry_operations;
use super::{BlockSide, BlockType};
use crate::error::EngineResult;
use crate::renderer::{TextureProvider, TextureRegion};
use crate::world::blocks::block_data::BlockDefinition;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared, hot-reloadable block registry
///
/// Writers build a new `BlockRegistryData` and swap it in, so a reader holding
/// a `snapshot()` sees every block type either fully before or fully after a
/// registration. Mesh builds take one snapshot for their whole run.
pub struct BlockRegistry {
    current: RwLock<Arc<BlockRegistryData>>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(registry_operations::create_block_registry())),
        }
    }

    /// Register a block type with resolved textures, replacing any previous entry
    pub fn register(
        &self,
        definition: BlockDefinition,
        provider: &dyn TextureProvider,
    ) -> EngineResult<usize> {
        let mut current = self.current.write();
        let mut next = BlockRegistryData::clone(&current);
        let faces = registry_operations::register_block(&mut next, definition, provider)?;
        *current = Arc::new(next);
        Ok(faces)
    }

    /// Re-resolve every texture reference against `provider`
    pub fn refresh_textures(&self, provider: &dyn TextureProvider) -> EngineResult<usize> {
        let mut current = self.current.write();
        let mut next = BlockRegistryData::clone(&current);
        let count = registry_operations::refresh_textures(&mut next, provider)?;
        *current = Arc::new(next);
        Ok(count)
    }

    /// Consistent read-only view of the registry
    pub fn snapshot(&self) -> Arc<BlockRegistryData> {
        self.current.read().clone()
    }

    pub fn get_block(&self, block_type: BlockType) -> Option<Arc<ResolvedBlock>> {
        self.current.read().blocks.get(&block_type).cloned()
    }

    pub fn get_side_texture(&self, block_type: BlockType, side: BlockSide) -> Option<TextureRegion> {
        registry_operations::get_side_texture(&self.current.read(), block_type, side)
    }

    pub fn get_definition(&self, block_type: BlockType) -> Option<BlockDefinition> {
        registry_operations::get_definition(&self.current.read(), block_type).cloned()
    }

    pub fn is_transparent(&self, block_type: BlockType) -> bool {
        registry_operations::is_transparent(&self.current.read(), block_type)
    }

    pub fn is_liquid(&self, block_type: BlockType) -> bool {
        registry_operations::is_liquid(&self.current.read(), block_type)
    }

    pub fn is_solid(&self, block_type: BlockType) -> bool {
        registry_operations::is_solid(&self.current.read(), block_type)
    }

    pub fn is_registered(&self, block_type: BlockType) -> bool {
        registry_operations::is_registered(&self.current.read(), block_type)
    }

    pub fn len(&self) -> usize {
        registry_operations::registered_count(&self.current.read())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
