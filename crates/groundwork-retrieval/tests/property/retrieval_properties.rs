use std::collections::BTreeSet;
use std::sync::Arc;

use groundwork_core::config::RetrievalConfig;
use groundwork_core::models::{KnowledgeBaseId, RetrievalRequest, RetrieverType};
use groundwork_retrieval::neighbors::partition;
use groundwork_retrieval::reorder::long_context_reorder;
use groundwork_retrieval::retrievers::weighted_rrf;
use groundwork_retrieval::{BackendContext, RetrievalEngine};
use proptest::prelude::*;
use test_fixtures::{document, scored, MockChunkStore, MockEmbedder, MockSparseEncoder, MockSparseIndex};

fn strategy() -> impl Strategy<Value = RetrieverType> {
    prop_oneof![
        Just(RetrieverType::Dense),
        Just(RetrieverType::Sparse),
        Just(RetrieverType::Ensemble),
    ]
}

proptest! {
    #[test]
    fn reorder_is_a_permutation(items in prop::collection::vec(any::<u32>(), 0..64)) {
        let mut before = items.clone();
        let mut after = long_context_reorder(items);
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn reorder_is_deterministic(items in prop::collection::vec(any::<u32>(), 0..64)) {
        prop_assert_eq!(long_context_reorder(items.clone()), long_context_reorder(items));
    }

    #[test]
    fn reorder_puts_the_best_item_at_an_edge(len in 1usize..64) {
        let out = long_context_reorder((0..len).collect::<Vec<_>>());
        prop_assert!(out.first() == Some(&0) || out.last() == Some(&0));
    }

    #[test]
    fn partition_respects_window(
        nums in prop::collection::vec(0i64..40, 0..40),
        target in 0i64..40,
        window in 0usize..6,
    ) {
        let n = partition(document("d", nums), target, window);
        prop_assert!(n.previous.len() <= window);
        prop_assert!(n.next.len() <= window);
        let prev: Vec<i64> = n.previous.iter().map(|t| t[2..].parse().unwrap()).collect();
        let next: Vec<i64> = n.next.iter().map(|t| t[2..].parse().unwrap()).collect();
        prop_assert!(prev.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(next.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(prev.iter().all(|p| *p < target));
        prop_assert!(next.iter().all(|p| *p > target));
    }

    #[test]
    fn fusion_never_duplicates(
        a in prop::collection::vec(0i64..20, 0..20),
        b in prop::collection::vec(0i64..20, 0..20),
    ) {
        let list = |nums: &[i64]| nums.iter().map(|n| scored("d", *n, 1.0)).collect::<Vec<_>>();
        let fused = weighted_rrf(&[(list(&a), 0.5), (list(&b), 0.5)], 60);
        let distinct: BTreeSet<i64> = a.iter().chain(&b).copied().collect();
        prop_assert_eq!(fused.len(), distinct.len());
        prop_assert!(fused.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn engine_respects_limit_filter_and_window(
        limit in 1usize..8,
        window in 0usize..4,
        pad in 0usize..4,
        strategy in strategy(),
        filter_docs in prop::collection::btree_set(prop_oneof![Just("a"), Just("b"), Just("c")], 0..3),
    ) {
        let hits: Vec<_> = ["a", "b", "c"]
            .iter()
            .flat_map(|doc| (0..6).map(move |n| scored(doc, n * 2, 1.0 / (n + 1) as f64)))
            .collect();
        let corpus = ["a", "b", "c"].iter().flat_map(|doc| document(doc, 0..12)).collect();
        let context = BackendContext::new(
            Arc::new(MockEmbedder::default()),
            Arc::new(MockSparseEncoder::new()),
            Arc::new(MockSparseIndex::new(hits.clone())),
            Arc::new(MockChunkStore::new("primary").with_hits(hits).with_corpus(corpus)),
            Arc::new(MockChunkStore::new("secondary")),
        );
        let config = RetrievalConfig { candidate_pad: pad, ..RetrievalConfig::default() };
        let engine = RetrievalEngine::new(Arc::new(context), config);

        let mut request = RetrievalRequest::new("q", KnowledgeBaseId::new("kb").unwrap())
            .with_limit(limit)
            .with_window(window)
            .with_retriever(strategy);
        if !filter_docs.is_empty() {
            request = request.with_doc_ids(filter_docs.iter().copied());
        }

        let outcome = engine.retrieve(&request).unwrap();
        prop_assert!(outcome.results.len() <= limit);
        for r in &outcome.results {
            if !filter_docs.is_empty() {
                prop_assert!(filter_docs.contains(r.chunk.chunk.doc_id.as_str()));
            }
            prop_assert!(r.previous_texts.len() <= window);
            prop_assert!(r.next_texts.len() <= window);
        }
    }
}
