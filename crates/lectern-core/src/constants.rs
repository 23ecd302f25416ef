/// Lectern system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum token length retained by the corpus tokenizer.
/// Shorter tokens are articles and prepositions in almost all cases.
pub const MIN_TOKEN_LEN: usize = 3;
