// src/error.rs

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerrainError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("a {width}x{depth} quad grid does not fit in 32-bit vertex indices")]
    GridTooLarge { width: usize, depth: usize },

    #[error("mesh invariant violated: {0}")]
    MeshInvariant(String),

    #[error("gradient error: {0}")]
    Gradient(String),

    #[error("config error: {0}")]
    Config(String),
}

impl TerrainError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        TerrainError::InvalidParameter { name, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, TerrainError>;
