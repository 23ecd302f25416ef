use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single ranked result returned to callers.
///
/// Materials are referenced by id; callers resolve content through the
/// retriever or their own store.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RetrievalResult {
    /// Id of the retrieved material.
    pub material_id: String,
    /// Final score, min-max normalized to [0.0, 1.0] within this result set.
    pub score: f64,
    /// Names of the signals that surfaced this material, in signal order.
    pub signals: Vec<String>,
}
