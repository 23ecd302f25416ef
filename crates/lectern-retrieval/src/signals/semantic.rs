//! Semantic signal: embedding cosine similarity against the query.

use std::collections::HashMap;
use std::sync::Arc;

use lectern_core::config::EmbeddingConfig;
use lectern_core::errors::{LecternResult, SignalError};
use lectern_core::traits::IEmbeddingProvider;
use lectern_embeddings::{cosine_similarity, EmbeddingCache};
use tracing::debug;

use crate::index::CorpusIndex;
use crate::signal::{ISignalRetriever, SignalRanking};

pub const SEMANTIC_SIGNAL: &str = "semantic";

/// Ranks materials by cosine similarity between query and material
/// embeddings. Only positive similarities enter the ranking; ties
/// break by material id ascending.
///
/// Corpus embeddings are computed lazily and cached by material id;
/// query embeddings are cached by query text. Both caches are filled
/// idempotently, so concurrent retrieve calls stay race-free.
pub struct SemanticRetriever {
    provider: Arc<dyn IEmbeddingProvider>,
    corpus_cache: EmbeddingCache,
    query_cache: EmbeddingCache,
}

impl SemanticRetriever {
    pub fn new(provider: Arc<dyn IEmbeddingProvider>) -> Self {
        Self::with_config(provider, &EmbeddingConfig::default())
    }

    pub fn with_config(provider: Arc<dyn IEmbeddingProvider>, config: &EmbeddingConfig) -> Self {
        Self {
            provider,
            corpus_cache: EmbeddingCache::new(config.cache_capacity),
            query_cache: EmbeddingCache::new(config.cache_capacity),
        }
    }

    fn material_embedding(
        &self,
        index: &CorpusIndex,
        doc: usize,
    ) -> LecternResult<Arc<Vec<f32>>> {
        let id = index.id(doc);
        if let Some(hit) = self.corpus_cache.get(id) {
            return Ok(hit);
        }
        let vector = self.provider.embed(&index.embedding_text(doc))?;
        Ok(self.corpus_cache.insert(id.to_string(), vector))
    }

    fn query_embedding(&self, query: &str) -> LecternResult<Arc<Vec<f32>>> {
        if let Some(hit) = self.query_cache.get(query) {
            return Ok(hit);
        }
        let vector = self.provider.embed(query)?;
        Ok(self.query_cache.insert(query.to_string(), vector))
    }

    /// Embeddings for a set of candidate docs, keyed by doc index.
    /// Used by the diversity selector's cosine measure.
    pub fn embeddings_for(
        &self,
        index: &CorpusIndex,
        docs: impl Iterator<Item = usize>,
    ) -> LecternResult<HashMap<usize, Arc<Vec<f32>>>> {
        docs.map(|doc| Ok((doc, self.material_embedding(index, doc)?)))
            .collect()
    }
}

impl ISignalRetriever for SemanticRetriever {
    fn name(&self) -> &'static str {
        SEMANTIC_SIGNAL
    }

    fn is_available(&self) -> bool {
        self.provider.is_available()
    }

    fn rank(&self, index: &CorpusIndex, query: &str) -> LecternResult<SignalRanking> {
        if !self.provider.is_available() {
            return Err(SignalError::Unavailable {
                signal: SEMANTIC_SIGNAL.to_string(),
                reason: format!("embedding provider '{}' not available", self.provider.name()),
            }
            .into());
        }

        let query_vector = self.query_embedding(query)?;
        let mut scored: Vec<(usize, f64)> = Vec::new();
        for doc in 0..index.len() {
            let material_vector = self.material_embedding(index, doc)?;
            let similarity =
                cosine_similarity(query_vector.as_slice(), material_vector.as_slice());
            if similarity > 0.0 {
                scored.push((doc, similarity));
            }
        }

        // Similarity descending, then material id ascending.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| index.id(a.0).cmp(index.id(b.0)))
        });

        debug!(
            provider = self.provider.name(),
            candidates = scored.len(),
            "semantic ranking complete"
        );

        Ok(SignalRanking::from_scored(SEMANTIC_SIGNAL, scored))
    }
}
