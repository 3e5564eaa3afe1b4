//! Error handling for the voxel mesh core
//!
//! Registration and bounds errors propagate to the caller as `EngineError`.
//! Lookup misses during meshing never become errors; they are logged and the
//! affected face is skipped.

use thiserror::Error;

/// Main error type for the chunk store, block registry and mesh builder
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    // Chunk store errors
    #[error(
        "Block position ({}, {}, {}) out of bounds for chunk {}x{}x{}",
        pos.0, pos.1, pos.2, size.0, size.1, size.2
    )]
    BlockOutOfBounds {
        pos: (i32, i32, i32),
        size: (u32, u32, u32),
    },

    #[error("Voxel index {index} out of range 0..{len}")]
    IndexOutOfBounds { index: usize, len: usize },

    // Registration errors
    #[error("Texture not found: {name}")]
    TextureNotFound { name: String },

    #[error("Texture atlas not found: {atlas}")]
    AtlasNotFound { atlas: String },

    #[error("Atlas tile {index} not found in atlas {atlas}")]
    AtlasTileNotFound { atlas: String, index: String },

    // Configuration errors
    #[error("Invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error for {path}: {error}")]
    IoError { path: String, error: String },

    #[error("Parse error: '{value}' is not a valid {expected_type}")]
    ParseError {
        value: String,
        expected_type: String,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Type alias for results across the crate
pub type EngineResult<T> = Result<T, EngineError>;

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::IoError {
            path: String::new(),
            error: error.to_string(),
        }
    }
}

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_engine<F>(self, f: F) -> EngineResult<T>
    where
        F: FnOnce() -> EngineError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_engine<F>(self, f: F) -> EngineResult<T>
    where
        F: FnOnce() -> EngineError,
    {
        self.ok_or_else(f)
    }
}

/// Extension trait for attaching a message to foreign errors
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> EngineResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> EngineResult<T> {
        self.map_err(|e| EngineError::Internal {
            message: format!("{}: {}", msg, e),
        })
    }
}
