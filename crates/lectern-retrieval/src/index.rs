//! Corpus normalization: arena of materials, id lookup, token sets.

use std::collections::{HashMap, HashSet};

use lectern_core::constants::MIN_TOKEN_LEN;
use lectern_core::models::Material;
use tracing::warn;

/// Lowercase term set: split on non-alphanumeric characters, drop
/// short tokens and stop-words.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .map(str::to_lowercase)
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !is_stop_word(t))
        .collect()
}

fn is_stop_word(word: &str) -> bool {
    matches!(
        word,
        "the"
            | "and"
            | "for"
            | "are"
            | "but"
            | "not"
            | "you"
            | "all"
            | "can"
            | "had"
            | "her"
            | "was"
            | "one"
            | "our"
            | "out"
            | "has"
            | "have"
            | "been"
            | "from"
            | "this"
            | "that"
            | "with"
            | "they"
            | "will"
            | "each"
            | "which"
            | "their"
            | "said"
            | "what"
            | "its"
            | "into"
            | "more"
            | "other"
            | "how"
            | "why"
            | "does"
            | "did"
    )
}

/// Read-only view of a corpus, built once per retriever.
///
/// Materials live in one owned arena; rankings and candidates refer to
/// them by index so no stage copies content. Duplicate ids keep the
/// first occurrence.
pub struct CorpusIndex {
    materials: Vec<Material>,
    token_sets: Vec<HashSet<String>>,
    by_id: HashMap<String, usize>,
}

impl CorpusIndex {
    /// Normalize a corpus: dedupe by id, tokenize title + content.
    pub fn build(materials: Vec<Material>) -> Self {
        let mut deduped: Vec<Material> = Vec::with_capacity(materials.len());
        let mut by_id: HashMap<String, usize> = HashMap::with_capacity(materials.len());
        for material in materials {
            if by_id.contains_key(&material.id) {
                warn!(id = %material.id, "duplicate material id, keeping first occurrence");
                continue;
            }
            by_id.insert(material.id.clone(), deduped.len());
            deduped.push(material);
        }

        let token_sets = deduped
            .iter()
            .map(|m| {
                let mut terms = tokenize(&m.title);
                terms.extend(tokenize(&m.content));
                terms
            })
            .collect();

        Self {
            materials: deduped,
            token_sets,
            by_id,
        }
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Material id at an arena index.
    pub fn id(&self, doc: usize) -> &str {
        &self.materials[doc].id
    }

    /// Material at an arena index.
    pub fn material(&self, doc: usize) -> &Material {
        &self.materials[doc]
    }

    /// Look up a material by id.
    pub fn get(&self, id: &str) -> Option<&Material> {
        self.by_id.get(id).map(|&doc| &self.materials[doc])
    }

    /// Token set at an arena index.
    pub fn token_set(&self, doc: usize) -> &HashSet<String> {
        &self.token_sets[doc]
    }

    /// Jaccard similarity over two materials' token sets.
    /// Returns 0.0 when either set is empty.
    pub fn jaccard(&self, a: usize, b: usize) -> f64 {
        let (sa, sb) = (&self.token_sets[a], &self.token_sets[b]);
        if sa.is_empty() || sb.is_empty() {
            return 0.0;
        }
        let intersection = sa.intersection(sb).count();
        let union = sa.len() + sb.len() - intersection;
        intersection as f64 / union as f64
    }

    /// Text handed to the embedding provider: title and content joined,
    /// or content alone when the title is empty.
    pub fn embedding_text(&self, doc: usize) -> String {
        let material = &self.materials[doc];
        if material.title.is_empty() {
            material.content.clone()
        } else {
            format!("{}\n{}", material.title, material.content)
        }
    }
}
