//! SQL over the ingestion schema:
//! `collection(uuid, name, cmetadata)` and
//! `embedding(id, collection_id, embedding, document, cmetadata)`.
//!
//! Document ids are compared as text; numeric ids in `cmetadata` match their
//! decimal spelling.

use groundwork_core::errors::{BackendError, GroundResult};
use groundwork_core::models::{Chunk, FilterSet, ScoredChunk};
use groundwork_core::traits::NeighborQuery;
use rusqlite::{params, params_from_iter, Connection};
use serde_json::{Map, Value};
use tracing::debug;

use super::similarity::{cosine_similarity, decode_embedding};
use super::{to_storage_err, BACKEND};

/// A row that survived scoring; metadata is parsed only for the top k.
struct Candidate {
    id: String,
    document: String,
    cmetadata: String,
    score: f64,
}

/// Brute-force cosine search over one collection.
pub fn dense_search(
    conn: &Connection,
    collection: &str,
    query: &[f32],
    filter: &FilterSet,
    k: usize,
) -> GroundResult<Vec<ScoredChunk>> {
    if k == 0 {
        return Ok(Vec::new());
    }

    let mut sql = String::from(
        "SELECT e.id, e.embedding, e.document, e.cmetadata
         FROM embedding e
         JOIN collection c ON c.uuid = e.collection_id
         WHERE c.name = ?1",
    );
    let mut args: Vec<&str> = vec![collection];
    if let Some(ids) = filter.doc_ids() {
        let placeholders: Vec<String> = (0..ids.len()).map(|i| format!("?{}", i + 2)).collect();
        sql.push_str(&format!(
            " AND CAST(json_extract(e.cmetadata, '$.doc_id') AS TEXT) IN ({})",
            placeholders.join(", ")
        ));
        args.extend(ids.iter().map(String::as_str));
    }

    let mut stmt = conn.prepare(&sql).map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params_from_iter(args), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Vec<u8>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .map_err(to_storage_err)?;

    let min_score = filter.min_score();
    let mut skipped = 0usize;
    let mut candidates = Vec::new();
    for row in rows {
        let (id, blob, document, cmetadata) = row.map_err(to_storage_err)?;
        let stored = decode_embedding(&blob);
        if stored.len() != query.len() {
            skipped += 1;
            continue;
        }
        let score = cosine_similarity(query, &stored);
        if min_score.is_some_and(|min| score < min) {
            continue;
        }
        candidates.push(Candidate {
            id,
            document,
            cmetadata,
            score,
        });
    }
    if skipped > 0 {
        debug!(collection, skipped, "rows with mismatched dimensions ignored");
    }

    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(k);

    candidates
        .into_iter()
        .map(|c| {
            let chunk = to_chunk(c.id, c.document, &c.cmetadata)?;
            Ok(ScoredChunk::new(chunk, c.score))
        })
        .collect()
}

/// One row per distinct sequence number in the query window, ascending.
pub fn neighbor_scan(
    conn: &Connection,
    collection: &str,
    query: &NeighborQuery,
) -> GroundResult<Vec<Chunk>> {
    let (lo, hi) = query.range();
    let mut stmt = conn
        .prepare(
            "SELECT e.id, e.document, e.cmetadata,
                    CAST(json_extract(e.cmetadata, '$.chunk_num') AS INTEGER) AS num
             FROM embedding e
             JOIN collection c ON c.uuid = e.collection_id
             WHERE c.name = ?1
               AND CAST(json_extract(e.cmetadata, '$.doc_id') AS TEXT) = ?2
               AND CAST(json_extract(e.cmetadata, '$.chunk_num') AS INTEGER) BETWEEN ?3 AND ?4
               AND CAST(json_extract(e.cmetadata, '$.chunk_num') AS INTEGER) != ?5
             GROUP BY num
             ORDER BY num",
        )
        .map_err(to_storage_err)?;

    let rows = stmt
        .query_map(params![collection, query.doc_id, lo, hi, query.chunk_num], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .map_err(to_storage_err)?;

    rows.map(|row| {
        let (id, document, cmetadata) = row.map_err(to_storage_err)?;
        to_chunk(id, document, &cmetadata)
    })
    .collect()
}

fn to_chunk(id: String, document: String, cmetadata: &str) -> GroundResult<Chunk> {
    let metadata: Map<String, Value> = serde_json::from_str(cmetadata)
        .map_err(|e| malformed(format!("row {id}: cmetadata is not a JSON object: {e}")))?;
    Chunk::from_metadata(id.clone(), document, metadata)
        .map_err(|reason| malformed(format!("row {id}: {reason}")).into())
}

fn malformed(reason: String) -> BackendError {
    BackendError::MalformedResponse {
        backend: BACKEND.to_string(),
        reason,
    }
}
