//! Hashed TF-IDF embedding provider.
//!
//! Signed feature hashing over term frequencies: each term lands in a
//! fixed-dimension bucket with a hash-derived sign, so colliding terms
//! tend to cancel instead of piling up. Deterministic, no model files.

use std::collections::HashMap;

use lectern_core::config::EmbeddingConfig;
use lectern_core::errors::LecternResult;
use lectern_core::traits::IEmbeddingProvider;

/// Deterministic hashed TF-IDF embedding provider.
///
/// Far less semantically rich than a neural encoder, but always
/// available, which keeps the semantic signal usable out of the box.
/// Callers with a real model supply their own `IEmbeddingProvider`.
pub struct HashedTfIdf {
    dimensions: usize,
}

impl HashedTfIdf {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Build a provider sized by config.
    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self::new(config.dimensions)
    }

    /// FNV-1a hash of a term. The bucket comes from the low bits, the
    /// contribution sign from the top bit.
    fn hash_term(term: &str) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= u64::from(*b);
            h = h.wrapping_mul(0x100000001b3);
        }
        h
    }

    /// Lowercase alphanumeric terms; single characters are dropped.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| s.len() >= 2)
            .map(|s| s.to_lowercase())
            .collect()
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let terms = Self::tokenize(text);
        let mut vector = vec![0.0f32; self.dimensions];
        if terms.is_empty() {
            return vector;
        }

        let mut counts: HashMap<&str, f32> = HashMap::new();
        for term in &terms {
            *counts.entry(term.as_str()).or_default() += 1.0;
        }

        let total = terms.len() as f32;
        for (term, count) in &counts {
            let tf = count / total;
            // IDF stand-in: weight grows with term length.
            let weight = tf * (1.0 + (term.len() as f32).ln());
            let h = Self::hash_term(term);
            let bucket = (h as usize) % self.dimensions;
            vector[bucket] += if (h >> 63) == 0 { weight } else { -weight };
        }

        // L2 normalize so cosine reduces to a dot product.
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vector {
                *v /= norm;
            }
        }

        vector
    }
}

impl Default for HashedTfIdf {
    fn default() -> Self {
        Self::from_config(&EmbeddingConfig::default())
    }
}

impl IEmbeddingProvider for HashedTfIdf {
    fn embed(&self, text: &str) -> LecternResult<Vec<f32>> {
        Ok(self.embed_text(text))
    }

    fn embed_batch(&self, texts: &[String]) -> LecternResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-tfidf"
    }

    fn is_available(&self) -> bool {
        true
    }
}
