//! # lectern-retrieval
//!
//! The hybrid retrieval pipeline: per-signal candidate retrieval,
//! Reciprocal Rank Fusion across signals, and Maximal Marginal
//! Relevance re-ranking for diversity.

pub mod diversity;
pub mod engine;
pub mod fusion;
pub mod index;
pub mod signal;
pub mod signals;

pub use engine::HybridRetriever;
pub use index::CorpusIndex;
pub use signal::{ISignalRetriever, SignalHit, SignalRanking};
