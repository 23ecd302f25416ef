//! # lectern-embeddings
//!
//! Embedding support for the semantic retrieval signal: a deterministic
//! built-in provider, cosine similarity, and a capacity-bounded cache.
//! Neural backends plug in through `lectern_core::traits::IEmbeddingProvider`.

pub mod cache;
pub mod providers;
pub mod similarity;

pub use cache::EmbeddingCache;
pub use providers::HashedTfIdf;
pub use similarity::cosine_similarity;
