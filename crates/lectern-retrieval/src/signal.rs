//! Signal retriever capability: one ranked view of the corpus per heuristic.

use lectern_core::errors::LecternResult;

use crate::index::CorpusIndex;

/// One scored hit inside a signal's ranking.
#[derive(Debug, Clone)]
pub struct SignalHit {
    /// Index of the material in the corpus arena.
    pub doc: usize,
    /// 1-based contiguous rank within this signal.
    pub rank: usize,
    /// Raw signal score; scales differ between signals.
    pub raw_score: f64,
}

/// The ordered output of one signal retriever for one query.
#[derive(Debug, Clone)]
pub struct SignalRanking {
    /// Name of the producing signal.
    pub signal: &'static str,
    /// Hits ordered best-first.
    pub hits: Vec<SignalHit>,
}

impl SignalRanking {
    /// Build a ranking from (doc, raw score) pairs already sorted
    /// best-first. Ranks are assigned 1-based in order.
    pub fn from_scored(signal: &'static str, scored: Vec<(usize, f64)>) -> Self {
        let hits = scored
            .into_iter()
            .enumerate()
            .map(|(i, (doc, raw_score))| SignalHit {
                doc,
                rank: i + 1,
                raw_score,
            })
            .collect();
        Self { signal, hits }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// A pluggable signal retriever.
///
/// Implementations must be side-effect free and safe to run
/// concurrently against the same index.
pub trait ISignalRetriever: Send + Sync {
    /// Stable signal name used for provenance and logging.
    fn name(&self) -> &'static str;

    /// Whether the signal can run at all (backend present, model loaded).
    fn is_available(&self) -> bool;

    /// Rank the corpus against a query. Materials judged irrelevant are
    /// omitted; an empty ranking is a valid outcome, not an error.
    fn rank(&self, index: &CorpusIndex, query: &str) -> LecternResult<SignalRanking>;
}
