/// Signal retrieval errors.
///
/// The engine treats these as recoverable: the failing signal is
/// logged and excluded for the current call, the request proceeds.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("signal '{signal}' unavailable: {reason}")]
    Unavailable { signal: String, reason: String },

    #[error("embedding failed: {reason}")]
    EmbeddingFailed { reason: String },
}
