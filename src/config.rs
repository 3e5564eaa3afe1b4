//! Mesher configuration
//!
//! Loaded from TOML. Every field has a default, so an empty document is a
//! valid configuration.

use crate::constants::mesh::{BILLBOARD_HALF_EXTENT, ITEM_HALF_EXTENT};
use crate::error::{EngineError, EngineResult, ErrorContext};
use crate::world::storage::ChunkDimensions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a face on the chunk edge sees when the neighbor chunk is not loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryFacePolicy {
    /// Unloaded neighbor occludes; edge faces appear once the neighbor loads
    #[default]
    Opaque,
    /// Unloaded neighbor is air; edge faces are always emitted
    Empty,
}

/// Mesh builder and chunk layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MesherConfig {
    pub dimensions: ChunkDimensions,
    pub boundary_policy: BoundaryFacePolicy,
    /// Half size of a billboard quad in blocks
    pub billboard_half_extent: f32,
    /// Half size of an item sprite quad in blocks
    pub item_half_extent: f32,
    /// Merge coplanar faces of the same block type
    pub greedy: bool,
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            dimensions: ChunkDimensions::DEFAULT,
            boundary_policy: BoundaryFacePolicy::default(),
            billboard_half_extent: BILLBOARD_HALF_EXTENT,
            item_half_extent: ITEM_HALF_EXTENT,
            greedy: true,
        }
    }
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl MesherConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> EngineResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| EngineError::ParseError {
            value: e.message().to_string(),
            expected_type: "MesherConfig".to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| EngineError::IoError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        let config = Self::from_toml_str(&source)?;
        log::info!(
            "[MesherConfig] Loaded {} (chunk {}x{}x{}, boundary {:?})",
            path.display(),
            config.dimensions.width,
            config.dimensions.height,
            config.dimensions.depth,
            config.boundary_policy
        );
        Ok(config)
    }

    pub fn to_toml_string(&self) -> EngineResult<String> {
        toml::to_string_pretty(self).context("serializing MesherConfig")
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> EngineResult<()> {
        let dims = self.dimensions;
        for (field, value) in [
            ("dimensions.width", dims.width),
            ("dimensions.height", dims.height),
            ("dimensions.depth", dims.depth),
        ] {
            if value == 0 {
                return Err(invalid(field, value, "must be non-zero"));
            }
            if value > i32::MAX as u32 {
                return Err(invalid(field, value, "exceeds i32 coordinate range"));
            }
        }

        for (field, value) in [
            ("billboard_half_extent", self.billboard_half_extent),
            ("item_half_extent", self.item_half_extent),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, value, "must be a positive number"));
            }
        }

        Ok(())
    }
}
