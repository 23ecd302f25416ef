//! # lectern-core
//!
//! Foundation crate for the Lectern retrieval engine.
//! Defines models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{EmbeddingConfig, LecternConfig, RetrieverConfig};
pub use errors::{LecternError, LecternResult};
pub use models::{Material, MaterialType, RetrievalResult};
