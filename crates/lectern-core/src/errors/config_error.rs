/// Configuration validation errors. Raised at construction time;
/// invalid values are never clamped into range.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("rrf_k must be positive, got {value}")]
    RrfKNotPositive { value: u32 },

    #[error("mmr_lambda must be within [0.0, 1.0], got {value}")]
    MmrLambdaOutOfRange { value: f64 },

    #[error("embedding dimensions must be positive")]
    DimensionsNotPositive,

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
