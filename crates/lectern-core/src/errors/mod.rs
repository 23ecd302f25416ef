//! Error taxonomy: per-subsystem enums aggregated into [`LecternError`].

pub mod config_error;
pub mod signal_error;

pub use config_error::ConfigError;
pub use signal_error::SignalError;

/// Top-level error type for the Lectern workspace.
#[derive(Debug, thiserror::Error)]
pub enum LecternError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error("corpus contains no materials")]
    EmptyCorpus,
}

/// Result alias used across the workspace.
pub type LecternResult<T> = Result<T, LecternError>;
