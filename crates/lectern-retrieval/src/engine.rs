//! Hybrid retrieval pipeline: per-signal ranking, RRF fusion, MMR diversity.

use std::fmt;
use std::sync::Arc;

use lectern_core::config::{EmbeddingConfig, RetrieverConfig};
use lectern_core::errors::{LecternError, LecternResult};
use lectern_core::models::{Material, RetrievalResult};
use lectern_core::traits::{IEmbeddingProvider, IRetriever};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::diversity::{self, SimilarityMeasure};
use crate::fusion::{self, FusedCandidate};
use crate::index::CorpusIndex;
use crate::signal::{ISignalRetriever, SignalRanking};
use crate::signals::{LexicalRetriever, SemanticRetriever, SEMANTIC_SIGNAL};

/// Course-material retrieval engine.
///
/// The lexical signal always runs; the semantic signal and any custom
/// signals are attached with the builder methods. Rankings are fused
/// with Reciprocal Rank Fusion and re-ranked for diversity with
/// Maximal Marginal Relevance, both tunable through [`RetrieverConfig`].
pub struct HybridRetriever {
    index: CorpusIndex,
    config: RetrieverConfig,
    lexical: LexicalRetriever,
    semantic: Option<SemanticRetriever>,
    extra: Vec<Box<dyn ISignalRetriever>>,
}

impl HybridRetriever {
    /// Build a retriever over a corpus. Fails when the config is invalid.
    pub fn build(materials: Vec<Material>, config: RetrieverConfig) -> LecternResult<Self> {
        config.validate()?;
        let index = CorpusIndex::build(materials);
        info!(
            materials = index.len(),
            use_rrf = config.use_rrf,
            use_mmr = config.use_mmr,
            "hybrid retriever ready"
        );
        Ok(Self {
            index,
            config,
            lexical: LexicalRetriever::new(),
            semantic: None,
            extra: Vec::new(),
        })
    }

    /// Like [`HybridRetriever::build`], but rejects an empty corpus.
    ///
    /// Callers that treat "nothing uploaded yet" as a caller error use
    /// this; `build` itself accepts an empty corpus and retrieval over
    /// it returns no results.
    pub fn build_non_empty(materials: Vec<Material>, config: RetrieverConfig) -> LecternResult<Self> {
        if materials.is_empty() {
            return Err(LecternError::EmptyCorpus);
        }
        Self::build(materials, config)
    }

    /// Attach the semantic signal with default embedding settings.
    pub fn with_semantic(self, provider: Arc<dyn IEmbeddingProvider>) -> Self {
        self.with_semantic_config(provider, &EmbeddingConfig::default())
    }

    /// Attach the semantic signal with explicit embedding settings.
    pub fn with_semantic_config(
        mut self,
        provider: Arc<dyn IEmbeddingProvider>,
        config: &EmbeddingConfig,
    ) -> Self {
        self.semantic = Some(SemanticRetriever::with_config(provider, config));
        self
    }

    /// Attach a custom signal that runs alongside the built-in ones.
    pub fn with_signal(mut self, signal: Box<dyn ISignalRetriever>) -> Self {
        self.extra.push(signal);
        self
    }

    /// Look up a material by id.
    pub fn material(&self, id: &str) -> Option<&Material> {
        self.index.get(id)
    }

    /// Number of distinct materials in the corpus.
    pub fn corpus_len(&self) -> usize {
        self.index.len()
    }

    /// Run the full pipeline for one query.
    ///
    /// Retrieval never fails: signals that are unavailable or error out
    /// are skipped with a warning, and an empty slate is a valid
    /// outcome. Scores are min-max normalized over the returned slate.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Vec<RetrievalResult> {
        if top_k == 0 || self.index.is_empty() || query.trim().is_empty() {
            debug!(top_k, materials = self.index.len(), "nothing to retrieve");
            return Vec::new();
        }

        // Step 1: collect the signals eligible for this call.
        let mut signals: Vec<&dyn ISignalRetriever> = vec![&self.lexical];
        if let Some(semantic) = &self.semantic {
            signals.push(semantic);
        }
        for extra in &self.extra {
            signals.push(extra.as_ref());
        }
        if !self.config.use_rrf && signals.len() > 1 {
            debug!(
                primary = signals[0].name(),
                "fusion disabled, running primary signal only"
            );
            signals.truncate(1);
        }

        // Step 2: rank the corpus per signal, in parallel.
        let mut rankings: Vec<SignalRanking> = signals
            .par_iter()
            .filter_map(|signal| self.run_signal(*signal, query))
            .collect();
        rankings.retain(|ranking| !ranking.is_empty());
        if rankings.is_empty() {
            debug!("no signal surfaced any material");
            return Vec::new();
        }

        // Step 3: fuse multi-signal rankings, or tag the single survivor.
        let candidates = if rankings.len() > 1 {
            fusion::fuse(&self.index, &rankings, self.config.rrf_k)
        } else {
            fusion::pass_through(&rankings[0], self.config.rrf_k)
        };
        let semantic_contributed = rankings.iter().any(|r| r.signal == SEMANTIC_SIGNAL);
        info!(
            signals = rankings.len(),
            candidates = candidates.len(),
            semantic = semantic_contributed,
            "fused candidate pool"
        );

        // Step 4: diversity re-ranking, or plain truncation.
        let slate = if self.config.use_mmr {
            let measure = self.similarity_measure(semantic_contributed, &candidates);
            diversity::select(
                &self.index,
                &candidates,
                top_k,
                self.config.mmr_lambda,
                &measure,
            )
        } else {
            let mut slate = candidates;
            slate.truncate(top_k);
            slate
        };

        // Step 5: normalize scores over the returned slate.
        self.to_results(slate)
    }

    fn run_signal(&self, signal: &dyn ISignalRetriever, query: &str) -> Option<SignalRanking> {
        if !signal.is_available() {
            warn!(signal = signal.name(), "signal unavailable, skipping");
            return None;
        }
        match signal.rank(&self.index, query) {
            Ok(ranking) => {
                debug!(
                    signal = ranking.signal,
                    hits = ranking.len(),
                    "signal ranked corpus"
                );
                Some(ranking)
            }
            Err(error) => {
                warn!(signal = signal.name(), error = %error, "signal failed, skipping");
                None
            }
        }
    }

    /// Pick the pairwise similarity measure for MMR.
    ///
    /// Cosine over embeddings when the semantic signal contributed to
    /// this call, token overlap otherwise. A failed embedding fetch
    /// downgrades to token overlap rather than aborting retrieval.
    fn similarity_measure<'a>(
        &'a self,
        semantic_contributed: bool,
        candidates: &[FusedCandidate],
    ) -> SimilarityMeasure<'a> {
        if semantic_contributed {
            if let Some(semantic) = &self.semantic {
                match semantic.embeddings_for(&self.index, candidates.iter().map(|c| c.doc)) {
                    Ok(embeddings) => return SimilarityMeasure::Cosine(embeddings),
                    Err(error) => {
                        warn!(error = %error, "embedding fetch failed, using token overlap");
                    }
                }
            }
        }
        SimilarityMeasure::TokenOverlap(&self.index)
    }

    fn to_results(&self, slate: Vec<FusedCandidate>) -> Vec<RetrievalResult> {
        let min = slate
            .iter()
            .map(|c| c.fused_score)
            .fold(f64::INFINITY, f64::min);
        let max = slate
            .iter()
            .map(|c| c.fused_score)
            .fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        slate
            .into_iter()
            .map(|candidate| RetrievalResult {
                material_id: self.index.id(candidate.doc).to_string(),
                score: if range > 0.0 {
                    (candidate.fused_score - min) / range
                } else {
                    1.0
                },
                signals: candidate.signals.iter().map(|s| (*s).to_string()).collect(),
            })
            .collect()
    }
}

/// Manual impl: the boxed custom signals are trait objects without a
/// `Debug` bound, so they and the other internal state are elided.
impl fmt::Debug for HybridRetriever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridRetriever")
            .field("config", &self.config)
            .field("lexical", &self.lexical)
            .finish_non_exhaustive()
    }
}

impl IRetriever for HybridRetriever {
    fn retrieve(&self, query: &str, top_k: usize) -> LecternResult<Vec<RetrievalResult>> {
        Ok(HybridRetriever::retrieve(self, query, top_k))
    }
}
