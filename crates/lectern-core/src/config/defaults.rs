//! Default values for all configuration fields.

/// RRF fusion enabled by default.
pub const DEFAULT_USE_RRF: bool = true;

/// Default RRF smoothing constant (Cormack et al., 2009).
pub const DEFAULT_RRF_K: u32 = 60;

/// MMR re-ranking enabled by default.
pub const DEFAULT_USE_MMR: bool = true;

/// Default MMR lambda: favors relevance over diversity.
pub const DEFAULT_MMR_LAMBDA: f64 = 0.7;

/// Default dimensionality of the built-in hashed embedding provider.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 256;

/// Default embedding cache capacity (entries, not bytes).
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 4096;
