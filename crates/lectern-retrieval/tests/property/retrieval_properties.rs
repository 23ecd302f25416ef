use std::collections::HashSet;

use lectern_core::config::RetrieverConfig;
use lectern_core::models::Material;
use lectern_retrieval::fusion::fuse;
use lectern_retrieval::{CorpusIndex, HybridRetriever, SignalRanking};
use proptest::prelude::*;
use test_fixtures::material;

const WORDS: &[&str] = &[
    "binary",
    "search",
    "sorting",
    "graphs",
    "trees",
    "hashing",
    "recursion",
    "lists",
    "arrays",
    "heaps",
    "stacks",
    "queues",
    "complexity",
    "dynamic",
    "greedy",
    "matrices",
    "probability",
    "calculus",
    "vectors",
    "induction",
];

fn arb_content() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 3..12).prop_map(|words| words.join(" "))
}

fn arb_corpus() -> impl Strategy<Value = Vec<Material>> {
    prop::collection::vec(arb_content(), 1..20).prop_map(|contents| {
        contents
            .into_iter()
            .enumerate()
            .map(|(i, content)| material(&format!("m{:02}", i), "", &content))
            .collect()
    })
}

fn arb_query() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..4).prop_map(|words| words.join(" "))
}

fn arb_agreeing_rankings() -> impl Strategy<Value = (Vec<usize>, usize)> {
    (2usize..12)
        .prop_flat_map(|n| Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
        .prop_flat_map(|order| {
            let max_prefix = order.len();
            (Just(order), 0..=max_prefix)
        })
}

fn ids(results: &[lectern_core::models::RetrievalResult]) -> Vec<String> {
    results.iter().map(|r| r.material_id.clone()).collect()
}

proptest! {
    #[test]
    fn retrieval_is_deterministic(corpus in arb_corpus(), query in arb_query()) {
        let engine = HybridRetriever::build(corpus, RetrieverConfig::default()).unwrap();
        let first = engine.retrieve(&query, 5);
        let second = engine.retrieve(&query, 5);
        prop_assert_eq!(ids(&first), ids(&second));
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(a.score, b.score);
        }
    }

    #[test]
    fn results_are_unique_and_bounded(
        corpus in arb_corpus(),
        query in arb_query(),
        top_k in 0usize..10,
    ) {
        let corpus_len = corpus.len();
        let engine = HybridRetriever::build(corpus, RetrieverConfig::default()).unwrap();
        let results = engine.retrieve(&query, top_k);
        prop_assert!(results.len() <= top_k.min(corpus_len));
        let unique: HashSet<&str> = results.iter().map(|r| r.material_id.as_str()).collect();
        prop_assert_eq!(unique.len(), results.len());
    }

    #[test]
    fn scores_stay_in_the_unit_interval(corpus in arb_corpus(), query in arb_query()) {
        let engine = HybridRetriever::build(corpus, RetrieverConfig::default()).unwrap();
        for result in engine.retrieve(&query, 10) {
            prop_assert!(
                (0.0..=1.0).contains(&result.score),
                "score out of range: {}",
                result.score
            );
        }
    }

    #[test]
    fn full_lambda_matches_plain_fusion(corpus in arb_corpus(), query in arb_query()) {
        let fused = HybridRetriever::build(
            corpus.clone(),
            RetrieverConfig { use_mmr: false, ..RetrieverConfig::default() },
        )
        .unwrap();
        let diversified = HybridRetriever::build(
            corpus,
            RetrieverConfig { mmr_lambda: 1.0, ..RetrieverConfig::default() },
        )
        .unwrap();
        prop_assert_eq!(
            ids(&fused.retrieve(&query, 5)),
            ids(&diversified.retrieve(&query, 5))
        );
    }

    #[test]
    fn an_agreeing_signal_never_reorders_fusion((order, prefix) in arb_agreeing_rankings()) {
        let corpus: Vec<Material> = (0..order.len())
            .map(|i| material(&format!("m{:02}", i), "", "shared text"))
            .collect();
        let index = CorpusIndex::build(corpus);
        let base = SignalRanking::from_scored(
            "lexical",
            order.iter().map(|&doc| (doc, 1.0)).collect(),
        );
        // The second signal repeats a prefix of the base order at the
        // same ranks: it agrees on every pair it ranks and is silent
        // on the rest.
        let agreeing = SignalRanking::from_scored(
            "semantic",
            order[..prefix].iter().map(|&doc| (doc, 1.0)).collect(),
        );
        let fused: Vec<usize> = fuse(&index, &[base, agreeing], 60)
            .iter()
            .map(|c| c.doc)
            .collect();
        prop_assert_eq!(fused, order);
    }

    #[test]
    fn arbitrary_queries_never_panic(corpus in arb_corpus(), query in ".{0,40}") {
        let engine = HybridRetriever::build(corpus, RetrieverConfig::default()).unwrap();
        let _ = engine.retrieve(&query, 5);
    }

    #[test]
    fn blank_queries_return_nothing(corpus in arb_corpus(), pad in "[ \\t]{0,10}") {
        let engine = HybridRetriever::build(corpus, RetrieverConfig::default()).unwrap();
        prop_assert!(engine.retrieve(&pad, 5).is_empty());
    }
}
