//! Configuration structs: serde-backed, defaulted, validated at construction.

pub mod defaults;
pub mod embedding_config;
pub mod retriever_config;

pub use embedding_config::EmbeddingConfig;
pub use retriever_config::RetrieverConfig;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Umbrella configuration for the whole engine, as loaded from a single
/// TOML file. Sections absent from the file fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LecternConfig {
    pub retriever: RetrieverConfig,
    pub embedding: EmbeddingConfig,
}

impl LecternConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.retriever.validate()?;
        self.embedding.validate()
    }

    /// Parse from a TOML string and validate.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }
}
