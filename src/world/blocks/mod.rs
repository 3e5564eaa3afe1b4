//! Block definitions and the built-in block set

pub mod basic_blocks;
pub mod block_data;

pub use basic_blocks::{create_default_textures, register_basic_blocks};
pub use block_data::BlockDefinition;
