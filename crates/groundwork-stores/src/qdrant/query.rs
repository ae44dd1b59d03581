//! Request bodies for the Qdrant points API.

use groundwork_core::models::{FilterClause, FilterSet, SparseVector};
use groundwork_core::traits::NeighborQuery;
use groundwork_core::constants::{META_CHUNK_NUM, META_DOC_ID};
use serde::Serialize;
use serde_json::{json, Value};

/// A [`FilterSet`] split into Qdrant's filter object and score threshold.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedFilter {
    pub filter: Option<Value>,
    pub score_threshold: Option<f64>,
}

/// Render a filter set against payload metadata stored under `metadata_key`.
///
/// `DocumentIdIn` becomes a `should` over exact doc id matches.
/// `ScoreAtLeast` is not a payload condition and becomes `score_threshold`.
pub fn render_filter(filter: &FilterSet, metadata_key: &str) -> RenderedFilter {
    let mut rendered = RenderedFilter::default();
    let doc_key = format!("{metadata_key}.{META_DOC_ID}");

    for clause in filter.clauses() {
        match clause {
            FilterClause::DocumentIdIn(ids) if !ids.is_empty() => {
                let should: Vec<Value> = ids
                    .iter()
                    .flat_map(|id| doc_id_matches(&doc_key, id))
                    .collect();
                rendered.filter = Some(json!({ "should": should }));
            }
            FilterClause::DocumentIdIn(_) => {}
            FilterClause::ScoreAtLeast(min) => {
                rendered.score_threshold =
                    Some(rendered.score_threshold.map_or(*min, |s| s.max(*min)));
            }
        }
    }
    rendered
}

/// Match conditions for one document id. Payload values are typed, so an id
/// spelled as a canonical integer also matches an integer `doc_id`.
fn doc_id_matches(doc_key: &str, id: &str) -> Vec<Value> {
    let mut matches = vec![json!({ "key": doc_key, "match": { "value": id } })];
    if let Some(n) = id.parse::<i64>().ok().filter(|n| n.to_string() == id) {
        matches.push(json!({ "key": doc_key, "match": { "value": n } }));
    }
    matches
}

/// Body of `POST /collections/{name}/points/search`.
#[derive(Debug, Serialize)]
pub struct SearchRequest<V: Serialize> {
    pub vector: V,
    pub limit: usize,
    pub with_payload: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f64>,
}

impl<V: Serialize> SearchRequest<V> {
    pub fn new(vector: V, limit: usize, rendered: RenderedFilter) -> Self {
        Self {
            vector,
            limit,
            with_payload: true,
            filter: rendered.filter,
            score_threshold: rendered.score_threshold,
        }
    }
}

/// A sparse query vector addressed by name.
#[derive(Debug, Serialize)]
pub struct NamedSparseVector<'a> {
    pub name: &'a str,
    pub vector: &'a SparseVector,
}

/// Body of `POST /collections/{name}/points/scroll` for a neighbor scan.
pub fn neighbor_scroll_body(query: &NeighborQuery, metadata_key: &str) -> Value {
    let (lo, hi) = query.range();
    let chunk_key = format!("{metadata_key}.{META_CHUNK_NUM}");
    let mut doc = doc_id_matches(&format!("{metadata_key}.{META_DOC_ID}"), &query.doc_id);
    let doc_condition = if doc.len() == 1 {
        doc.remove(0)
    } else {
        json!({ "should": doc })
    };
    json!({
        "filter": {
            "must": [
                doc_condition,
                { "key": chunk_key, "range": { "gte": lo, "lte": hi } }
            ],
            "must_not": [
                { "key": chunk_key, "match": { "value": query.chunk_num } }
            ]
        },
        "limit": query.window.saturating_mul(2),
        "with_payload": true
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn empty_filter_renders_nothing() {
        assert_eq!(render_filter(&FilterSet::match_all(), "metadata"), RenderedFilter::default());
    }

    #[test]
    fn doc_ids_render_as_should() {
        let ids: BTreeSet<String> = ["a".to_string(), "b".to_string()].into();
        let filter = FilterSet::new(vec![FilterClause::DocumentIdIn(ids)]);
        let rendered = render_filter(&filter, "metadata");
        assert_eq!(
            rendered.filter,
            Some(json!({ "should": [
                { "key": "metadata.doc_id", "match": { "value": "a" } },
                { "key": "metadata.doc_id", "match": { "value": "b" } }
            ]}))
        );
        assert_eq!(rendered.score_threshold, None);
    }

    #[test]
    fn integer_doc_ids_also_match_numeric_payloads() {
        let ids: BTreeSet<String> = ["42".to_string(), "042".to_string()].into();
        let filter = FilterSet::new(vec![FilterClause::DocumentIdIn(ids)]);
        let rendered = render_filter(&filter, "metadata");
        assert_eq!(
            rendered.filter,
            Some(json!({ "should": [
                { "key": "metadata.doc_id", "match": { "value": "042" } },
                { "key": "metadata.doc_id", "match": { "value": "42" } },
                { "key": "metadata.doc_id", "match": { "value": 42 } }
            ]}))
        );
    }

    #[test]
    fn scroll_body_matches_numeric_doc_id_either_way() {
        let body = neighbor_scroll_body(&NeighborQuery::new("7", 1, 1), "metadata");
        assert_eq!(
            body["filter"]["must"][0],
            json!({ "should": [
                { "key": "metadata.doc_id", "match": { "value": "7" } },
                { "key": "metadata.doc_id", "match": { "value": 7 } }
            ]})
        );
    }

    #[test]
    fn score_clause_becomes_threshold() {
        let filter = FilterSet::new(vec![
            FilterClause::ScoreAtLeast(0.3),
            FilterClause::ScoreAtLeast(0.1),
        ]);
        let rendered = render_filter(&filter, "metadata");
        assert!(rendered.filter.is_none());
        assert_eq!(rendered.score_threshold, Some(0.3));
    }

    #[test]
    fn search_body_omits_absent_parts() {
        let body = SearchRequest::new(vec![0.5_f32], 4, RenderedFilter::default());
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({ "vector": [0.5], "limit": 4, "with_payload": true }));
    }

    #[test]
    fn sparse_vector_is_named() {
        let sparse = SparseVector::new(vec![7], vec![0.25]).unwrap();
        let body = SearchRequest::new(
            NamedSparseVector { name: "sparse_vector", vector: &sparse },
            2,
            RenderedFilter::default(),
        );
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value["vector"],
            json!({ "name": "sparse_vector", "vector": { "indices": [7], "values": [0.25] } })
        );
    }

    #[test]
    fn scroll_body_excludes_target() {
        let body = neighbor_scroll_body(&NeighborQuery::new("d1", 5, 2), "metadata");
        assert_eq!(body["limit"], json!(4));
        assert_eq!(body["filter"]["must"][1]["range"], json!({ "gte": 3, "lte": 7 }));
        assert_eq!(body["filter"]["must_not"][0]["match"]["value"], json!(5));
    }
}
