//! Reciprocal Rank Fusion: fused(m) = Σ 1/(k + rank_s(m))
//!
//! Rank-only fusion combines per-signal orderings without normalizing
//! their incompatible raw score scales.

use std::collections::HashMap;

use crate::index::CorpusIndex;
use crate::signal::SignalRanking;

/// A candidate after rank fusion.
#[derive(Debug, Clone)]
pub struct FusedCandidate {
    /// Index of the material in the corpus arena.
    pub doc: usize,
    /// Fused RRF score (higher is more relevant).
    pub fused_score: f64,
    /// Names of the signals that surfaced this material, in signal order.
    pub signals: Vec<&'static str>,
}

/// Fuse per-signal rankings with Reciprocal Rank Fusion.
///
/// Each signal ranking a material contributes `1/(rrf_k + rank)`;
/// signals that omit it contribute nothing. Candidates come back
/// sorted by fused score descending, ties by material id ascending.
pub fn fuse(index: &CorpusIndex, rankings: &[SignalRanking], rrf_k: u32) -> Vec<FusedCandidate> {
    let mut scores: HashMap<usize, f64> = HashMap::new();
    let mut provenance: HashMap<usize, Vec<&'static str>> = HashMap::new();

    for ranking in rankings {
        for hit in &ranking.hits {
            *scores.entry(hit.doc).or_default() += 1.0 / (f64::from(rrf_k) + hit.rank as f64);
            provenance.entry(hit.doc).or_default().push(ranking.signal);
        }
    }

    let mut candidates: Vec<FusedCandidate> = scores
        .into_iter()
        .map(|(doc, fused_score)| FusedCandidate {
            doc,
            fused_score,
            signals: provenance.remove(&doc).unwrap_or_default(),
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.fused_score
            .partial_cmp(&a.fused_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| index.id(a.doc).cmp(index.id(b.doc)))
    });

    candidates
}

/// Tag a single ranking with RRF-shaped scores without re-ordering it.
///
/// Applied when only one signal ran, so the diversity stage sees the
/// same score shape whether or not fusion happened.
pub fn pass_through(ranking: &SignalRanking, rrf_k: u32) -> Vec<FusedCandidate> {
    ranking
        .hits
        .iter()
        .map(|hit| FusedCandidate {
            doc: hit.doc,
            fused_score: 1.0 / (f64::from(rrf_k) + hit.rank as f64),
            signals: vec![ranking.signal],
        })
        .collect()
}
