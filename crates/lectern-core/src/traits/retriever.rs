use crate::errors::LecternResult;
use crate::models::RetrievalResult;

/// Query-time retrieval capability consumed by answer generation and
/// knowledge-base search.
pub trait IRetriever: Send + Sync {
    /// Retrieve the `top_k` materials most relevant to `query`, ranked
    /// best-first. Returns fewer results (possibly none) when the
    /// corpus cannot satisfy the request; degenerate inputs are not
    /// errors.
    fn retrieve(&self, query: &str, top_k: usize) -> LecternResult<Vec<RetrievalResult>>;
}
