use std::collections::BTreeSet;

use groundwork_core::models::{parse_chunk_num, Chunk, FilterClause, FilterSet};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn chunk(doc_id: &str, chunk_num: i64) -> Chunk {
    let mut metadata = Map::new();
    metadata.insert("doc_id".into(), Value::String(doc_id.to_string()));
    metadata.insert("chunk_num".into(), json!(chunk_num));
    Chunk::from_metadata(format!("{doc_id}-{chunk_num}"), "text", metadata).unwrap()
}

fn doc_id() -> impl Strategy<Value = String> {
    "[a-e]{1,3}"
}

proptest! {
    #[test]
    fn doc_clause_admits_exactly_its_members(
        allowed in prop::collection::btree_set(doc_id(), 1..5),
        candidate in doc_id(),
        score in 0.0f64..1.0,
    ) {
        let filter = FilterSet::new(vec![FilterClause::DocumentIdIn(allowed.clone())]);
        prop_assert_eq!(filter.admits(&chunk(&candidate, 0), score), allowed.contains(&candidate));
    }

    #[test]
    fn clauses_are_anded(
        allowed in prop::collection::btree_set(doc_id(), 0..5),
        candidate in doc_id(),
        min in 0.0f64..1.0,
        score in 0.0f64..1.0,
    ) {
        let filter = FilterSet::new(vec![
            FilterClause::DocumentIdIn(allowed.clone()),
            FilterClause::ScoreAtLeast(min),
        ]);
        // An empty id set places no restriction on documents.
        let doc_ok = allowed.is_empty() || allowed.contains(&candidate);
        prop_assert_eq!(filter.admits(&chunk(&candidate, 0), score), doc_ok && score >= min);
    }

    #[test]
    fn match_all_admits_everything(candidate in doc_id(), score in -1.0f64..1.0) {
        prop_assert!(FilterSet::match_all().admits(&chunk(&candidate, 3), score));
    }

    #[test]
    fn chunk_num_parses_every_encoding(n in -100_000i64..100_000) {
        prop_assert_eq!(parse_chunk_num(&json!(n)), Some(n));
        prop_assert_eq!(parse_chunk_num(&json!(n.to_string())), Some(n));
        prop_assert_eq!(parse_chunk_num(&json!(n as f64)), Some(n));
    }

    #[test]
    fn fractional_chunk_num_is_rejected(n in -1_000i64..1_000) {
        prop_assert_eq!(parse_chunk_num(&json!(n as f64 + 0.5)), None);
    }
}

#[test]
fn empty_id_set_is_unrestricted() {
    let filter = FilterSet::new(vec![FilterClause::DocumentIdIn(BTreeSet::new())]);
    assert!(filter.admits(&chunk("anything", 1), 0.0));
}
