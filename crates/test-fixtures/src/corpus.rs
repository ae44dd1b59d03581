//! Typed access to `data/corpus.json`.

use std::path::PathBuf;

use groundwork_core::models::Chunk;
use serde::Deserialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Corpus {
    pub knowledge_base: String,
    pub documents: Vec<CorpusDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusDocument {
    pub doc_id: String,
    pub source: String,
    pub chunks: Vec<CorpusChunk>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusChunk {
    pub chunk_num: i64,
    pub text: String,
    pub embedding: Vec<f32>,
}

impl Corpus {
    /// Every chunk paired with its embedding, in file order.
    pub fn chunks(&self) -> Vec<(Chunk, Vec<f32>)> {
        self.documents
            .iter()
            .flat_map(|doc| {
                doc.chunks.iter().map(move |c| {
                    let mut metadata = Map::new();
                    metadata.insert("doc_id".into(), Value::String(doc.doc_id.clone()));
                    metadata.insert("chunk_num".into(), json!(c.chunk_num));
                    metadata.insert("source".into(), Value::String(doc.source.clone()));
                    let chunk = Chunk {
                        id: format!("{}-{}", doc.doc_id, c.chunk_num),
                        doc_id: doc.doc_id.clone(),
                        chunk_num: c.chunk_num,
                        text: c.text.clone(),
                        metadata,
                    };
                    (chunk, c.embedding.clone())
                })
            })
            .collect()
    }
}

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

/// Load the shared corpus.
///
/// # Panics
/// Panics if the file is missing or does not parse.
pub fn load_corpus() -> Corpus {
    let path = data_path("corpus.json");
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}
