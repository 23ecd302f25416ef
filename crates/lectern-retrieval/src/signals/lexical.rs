//! Lexical signal: normalized query-term coverage.

use lectern_core::errors::LecternResult;

use crate::index::{tokenize, CorpusIndex};
use crate::signal::{ISignalRetriever, SignalRanking};

pub const LEXICAL_SIGNAL: &str = "lexical";

/// Ranks materials by the share of query terms their text contains
/// (matched query terms over total query terms, in [0, 1]).
///
/// Always available. Materials with zero overlap are omitted; ties
/// break by material id ascending.
#[derive(Debug, Default)]
pub struct LexicalRetriever;

impl LexicalRetriever {
    pub fn new() -> Self {
        Self
    }
}

impl ISignalRetriever for LexicalRetriever {
    fn name(&self) -> &'static str {
        LEXICAL_SIGNAL
    }

    fn is_available(&self) -> bool {
        true
    }

    fn rank(&self, index: &CorpusIndex, query: &str) -> LecternResult<SignalRanking> {
        let query_terms = tokenize(query);
        if query_terms.is_empty() {
            return Ok(SignalRanking::from_scored(LEXICAL_SIGNAL, Vec::new()));
        }
        let total = query_terms.len() as f64;

        let mut scored: Vec<(usize, f64)> = (0..index.len())
            .filter_map(|doc| {
                let matched = query_terms
                    .iter()
                    .filter(|term| index.token_set(doc).contains(*term))
                    .count();
                if matched == 0 {
                    None
                } else {
                    Some((doc, matched as f64 / total))
                }
            })
            .collect();

        // Coverage descending, then material id ascending.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| index.id(a.0).cmp(index.id(b.0)))
        });

        Ok(SignalRanking::from_scored(LEXICAL_SIGNAL, scored))
    }
}
