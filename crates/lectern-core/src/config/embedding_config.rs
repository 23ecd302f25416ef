use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Output dimensionality of the built-in hashed provider.
    pub dimensions: usize,
    /// Capacity of each in-memory embedding cache (entries, not bytes).
    pub cache_capacity: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            cache_capacity: defaults::DEFAULT_EMBEDDING_CACHE_CAPACITY,
        }
    }
}

impl EmbeddingConfig {
    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimensions == 0 {
            return Err(ConfigError::DimensionsNotPositive);
        }
        Ok(())
    }
}
