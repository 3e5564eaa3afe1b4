//! Block Data - Pure DOP
//!
//! Static per-block-type metadata as authored by content scripts or JSON.
//! Texture references are resolved by the registry, not here.

use crate::world::core::{BlockSide, BlockType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_height() -> f32 {
    1.0
}

fn default_solid() -> bool {
    true
}

/// Authored definition of one block type
///
/// `sides` maps a face to either a bare texture name (`"stone"`) or an atlas
/// tile reference (`"terrain#4"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    pub block_type: BlockType,
    pub name: String,
    #[serde(default)]
    pub sides: HashMap<BlockSide, String>,
    #[serde(default)]
    pub is_transparent: bool,
    #[serde(default)]
    pub is_liquid: bool,
    #[serde(default = "default_solid")]
    pub is_solid: bool,
    #[serde(default)]
    pub is_billboard: bool,
    #[serde(default)]
    pub is_item: bool,
    #[serde(default = "default_height")]
    pub height: f32,
}

impl BlockDefinition {
    /// Opaque, solid, full-height block with no textures assigned yet
    pub fn new(block_type: BlockType, name: &str) -> Self {
        Self {
            block_type,
            name: name.to_string(),
            sides: HashMap::new(),
            is_transparent: false,
            is_liquid: false,
            is_solid: true,
            is_billboard: false,
            is_item: false,
            height: 1.0,
        }
    }

    pub fn with_all_sides(mut self, texture: &str) -> Self {
        for side in BlockSide::ALL {
            self.sides.insert(side, texture.to_string());
        }
        self
    }

    pub fn with_side(mut self, side: BlockSide, texture: &str) -> Self {
        self.sides.insert(side, texture.to_string());
        self
    }

    pub fn transparent(mut self) -> Self {
        self.is_transparent = true;
        self
    }

    /// Liquids are transparent and not solid
    pub fn liquid(mut self) -> Self {
        self.is_liquid = true;
        self.is_transparent = true;
        self.is_solid = false;
        self
    }

    /// Full-size camera-facing quad (flowers, tall grass)
    pub fn billboard(mut self) -> Self {
        self.is_billboard = true;
        self.is_transparent = true;
        self.is_solid = false;
        self
    }

    /// Small camera-facing sprite
    pub fn item(mut self) -> Self {
        self.is_item = true;
        self.is_transparent = true;
        self.is_solid = false;
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Billboards and items bypass face culling and merging
    #[inline]
    pub fn is_sprite(&self) -> bool {
        self.is_billboard || self.is_item
    }

    /// Whether this block fully hides the face of a neighbor behind it
    #[inline]
    pub fn occludes(&self) -> bool {
        !self.is_transparent && !self.is_liquid && !self.is_sprite() && self.height >= 1.0
    }
}
