//! Maximal Marginal Relevance: mmr(c) = λ·rel(c) − (1−λ)·max_sim(c, selected)
//!
//! Greedy re-ranking that trades relevance against redundancy so the
//! final slate covers distinct aspects of the query.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use lectern_embeddings::cosine_similarity;

use crate::fusion::FusedCandidate;
use crate::index::CorpusIndex;

/// How candidate-to-candidate similarity is measured during selection.
///
/// Cosine is used when the semantic signal contributed to the current
/// retrieval; token overlap is the text-only fallback.
pub enum SimilarityMeasure<'a> {
    /// Jaccard similarity over the corpus token sets.
    TokenOverlap(&'a CorpusIndex),
    /// Cosine similarity over pre-fetched embeddings, clamped at zero
    /// so dissimilar pairs never reward a candidate.
    Cosine(HashMap<usize, Arc<Vec<f32>>>),
}

impl SimilarityMeasure<'_> {
    fn between(&self, a: usize, b: usize) -> f64 {
        match self {
            SimilarityMeasure::TokenOverlap(index) => index.jaccard(a, b),
            SimilarityMeasure::Cosine(embeddings) => {
                match (embeddings.get(&a), embeddings.get(&b)) {
                    (Some(va), Some(vb)) => cosine_similarity(va, vb).max(0.0),
                    _ => 0.0,
                }
            }
        }
    }
}

/// Greedily select up to `top_k` candidates by MMR score.
///
/// Relevance is each candidate's fused score relative to the best one,
/// so the λ trade-off operates on a 0..=1 scale regardless of how many
/// signals fused. Ties break toward the higher fused score, then the
/// lexicographically smaller material id. `λ = 1.0` reproduces the
/// fused order truncated to `top_k`.
pub fn select(
    index: &CorpusIndex,
    candidates: &[FusedCandidate],
    top_k: usize,
    lambda: f64,
    measure: &SimilarityMeasure,
) -> Vec<FusedCandidate> {
    if candidates.is_empty() || top_k == 0 {
        return Vec::new();
    }

    let max_fused = candidates
        .iter()
        .map(|c| c.fused_score)
        .fold(f64::NEG_INFINITY, f64::max);
    let relevance: Vec<f64> = candidates
        .iter()
        .map(|c| {
            if max_fused > 0.0 {
                c.fused_score / max_fused
            } else {
                0.0
            }
        })
        .collect();

    let take = top_k.min(candidates.len());
    let mut selected: Vec<FusedCandidate> = Vec::with_capacity(take);
    let mut picked = vec![false; candidates.len()];
    // Running max similarity to anything already selected.
    let mut max_sim = vec![0.0_f64; candidates.len()];

    while selected.len() < take {
        let mut best: Option<(usize, f64)> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            if picked[i] {
                continue;
            }
            let mmr = lambda * relevance[i] - (1.0 - lambda) * max_sim[i];
            let replaces = match best {
                None => true,
                Some((j, best_mmr)) => {
                    match mmr.partial_cmp(&best_mmr).unwrap_or(Ordering::Equal) {
                        Ordering::Greater => true,
                        Ordering::Less => false,
                        Ordering::Equal => match candidate
                            .fused_score
                            .partial_cmp(&candidates[j].fused_score)
                            .unwrap_or(Ordering::Equal)
                        {
                            Ordering::Greater => true,
                            Ordering::Less => false,
                            Ordering::Equal => index.id(candidate.doc) < index.id(candidates[j].doc),
                        },
                    }
                }
            };
            if replaces {
                best = Some((i, mmr));
            }
        }

        let Some((winner, _)) = best else {
            break;
        };
        picked[winner] = true;
        let winner_doc = candidates[winner].doc;
        for (i, candidate) in candidates.iter().enumerate() {
            if !picked[i] {
                let sim = measure.between(candidate.doc, winner_doc);
                if sim > max_sim[i] {
                    max_sim[i] = sim;
                }
            }
        }
        selected.push(candidates[winner].clone());
    }

    selected
}

#[cfg(test)]
mod tests {
    use test_fixtures::material;

    use super::*;

    fn candidate(doc: usize, fused_score: f64) -> FusedCandidate {
        FusedCandidate {
            doc,
            fused_score,
            signals: vec!["lexical"],
        }
    }

    fn selected_ids(index: &CorpusIndex, picks: &[FusedCandidate]) -> Vec<String> {
        picks.iter().map(|c| index.id(c.doc).to_string()).collect()
    }

    #[test]
    fn lambda_one_reproduces_fused_order() {
        let index = CorpusIndex::build(vec![
            material("m1", "", "binary search trees"),
            material("m2", "", "binary search forests"),
            material("m3", "", "binary search heaps"),
        ]);
        let candidates = vec![candidate(0, 0.3), candidate(1, 0.2), candidate(2, 0.1)];
        let picks = select(
            &index,
            &candidates,
            3,
            1.0,
            &SimilarityMeasure::TokenOverlap(&index),
        );
        assert_eq!(selected_ids(&index, &picks), vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn lambda_zero_still_picks_most_relevant_first() {
        let index = CorpusIndex::build(vec![
            material("m1", "", "sorting"),
            material("m2", "", "graphs"),
        ]);
        let candidates = vec![candidate(0, 0.5), candidate(1, 0.4)];
        let picks = select(
            &index,
            &candidates,
            1,
            0.0,
            &SimilarityMeasure::TokenOverlap(&index),
        );
        // All similarities are zero in the first round, so the fused
        // tie-break decides.
        assert_eq!(selected_ids(&index, &picks), vec!["m1"]);
    }

    #[test]
    fn near_duplicate_is_displaced_by_a_distinct_candidate() {
        let index = CorpusIndex::build(vec![
            material("m1", "", "binary search algorithm on sorted array"),
            material("m2", "", "binary search algorithm on sorted list"),
            material("m3", "", "singly linked list basics for search operations"),
        ]);
        // Fused scores from a single lexical ranking m1 > m2 > m3.
        let candidates = vec![
            candidate(0, 1.0 / 61.0),
            candidate(1, 1.0 / 62.0),
            candidate(2, 1.0 / 63.0),
        ];
        let picks = select(
            &index,
            &candidates,
            2,
            0.5,
            &SimilarityMeasure::TokenOverlap(&index),
        );
        // m2 shares 4 of 6 tokens with m1, m3 only 1 of 10, so the
        // redundancy penalty pushes m3 past m2.
        assert_eq!(selected_ids(&index, &picks), vec!["m1", "m3"]);
    }

    #[test]
    fn empty_candidates_select_nothing() {
        let index = CorpusIndex::build(vec![material("m1", "", "sorting")]);
        let picks = select(
            &index,
            &[],
            5,
            0.7,
            &SimilarityMeasure::TokenOverlap(&index),
        );
        assert!(picks.is_empty());
    }

    #[test]
    fn top_k_zero_selects_nothing() {
        let index = CorpusIndex::build(vec![material("m1", "", "sorting")]);
        let candidates = vec![candidate(0, 0.5)];
        let picks = select(
            &index,
            &candidates,
            0,
            0.7,
            &SimilarityMeasure::TokenOverlap(&index),
        );
        assert!(picks.is_empty());
    }

    #[test]
    fn top_k_beyond_pool_returns_every_candidate() {
        let index = CorpusIndex::build(vec![
            material("m1", "", "sorting"),
            material("m2", "", "graphs"),
        ]);
        let candidates = vec![candidate(0, 0.5), candidate(1, 0.4)];
        let picks = select(
            &index,
            &candidates,
            10,
            0.7,
            &SimilarityMeasure::TokenOverlap(&index),
        );
        assert_eq!(picks.len(), 2);
    }

    #[test]
    fn negative_cosine_is_clamped_to_zero() {
        let index = CorpusIndex::build(vec![
            material("m1", "", "a"),
            material("m2", "", "b"),
            material("m3", "", "c"),
        ]);
        let candidates = vec![candidate(0, 1.0), candidate(1, 0.8), candidate(2, 0.9)];
        let embeddings: HashMap<usize, Arc<Vec<f32>>> = [
            (0, Arc::new(vec![1.0, 0.0])),
            (1, Arc::new(vec![-1.0, 0.0])),
            (2, Arc::new(vec![0.0, 1.0])),
        ]
        .into_iter()
        .collect();
        let picks = select(
            &index,
            &candidates,
            2,
            0.5,
            &SimilarityMeasure::Cosine(embeddings),
        );
        // m2 points opposite m1; unclamped cosine would hand it a
        // bonus large enough to beat m3, clamped it loses on relevance.
        assert_eq!(selected_ids(&index, &picks), vec!["m1", "m3"]);
    }

    #[test]
    fn missing_embeddings_count_as_dissimilar() {
        let index = CorpusIndex::build(vec![
            material("m1", "", "binary search"),
            material("m2", "", "binary search"),
            material("m3", "", "graphs"),
        ]);
        let candidates = vec![candidate(0, 1.0), candidate(1, 0.9), candidate(2, 0.5)];
        let picks = select(
            &index,
            &candidates,
            2,
            0.5,
            &SimilarityMeasure::Cosine(HashMap::new()),
        );
        // With no vectors to compare, no redundancy penalty applies and
        // the fused order survives, duplicate text or not.
        assert_eq!(selected_ids(&index, &picks), vec!["m1", "m2"]);
    }
}
