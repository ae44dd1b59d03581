//! A temporary SQLite database in the ingestion schema.

use std::path::{Path, PathBuf};

use groundwork_core::models::Chunk;
use rusqlite::{params, Connection};
use serde_json::Value;
use tempfile::TempDir;

use crate::corpus::Corpus;

/// Tables the ingestion pipeline owns. The engine never creates them.
pub const SCHEMA: &str = "
    CREATE TABLE collection (
        uuid TEXT PRIMARY KEY,
        name TEXT UNIQUE NOT NULL,
        cmetadata TEXT
    );
    CREATE TABLE embedding (
        id TEXT PRIMARY KEY,
        collection_id TEXT NOT NULL REFERENCES collection(uuid),
        embedding BLOB NOT NULL,
        document TEXT NOT NULL,
        cmetadata TEXT NOT NULL
    );
";

pub fn embedding_to_blob(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Database file in a temp dir plus a writable connection for seeding.
pub struct SqliteFixture {
    _dir: TempDir,
    path: PathBuf,
    conn: Connection,
}

impl SqliteFixture {
    /// # Panics
    /// Panics if the temp dir or schema cannot be created.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vectors.db");
        let conn = Connection::open(&path).expect("open fixture db");
        conn.execute_batch(SCHEMA).expect("create schema");
        Self {
            _dir: dir,
            path,
            conn,
        }
    }

    /// Fixture seeded with every chunk of the corpus.
    pub fn with_corpus(corpus: &Corpus) -> Self {
        let fixture = Self::new();
        let collection = fixture.add_collection(&corpus.knowledge_base);
        for (chunk, embedding) in corpus.chunks() {
            fixture.add_chunk(&collection, &chunk, &embedding);
        }
        fixture
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a collection and return its uuid.
    pub fn add_collection(&self, name: &str) -> String {
        let uuid = uuid::Uuid::new_v4().to_string();
        self.conn
            .execute(
                "INSERT INTO collection (uuid, name, cmetadata) VALUES (?1, ?2, '{}')",
                params![uuid, name],
            )
            .expect("insert collection");
        uuid
    }

    pub fn add_chunk(&self, collection_uuid: &str, chunk: &Chunk, embedding: &[f32]) {
        self.add_row(
            collection_uuid,
            &chunk.id,
            &chunk.text,
            &Value::Object(chunk.metadata.clone()),
            embedding,
        );
    }

    /// Insert a raw row; lets tests store metadata the engine must reject.
    pub fn add_row(
        &self,
        collection_uuid: &str,
        id: &str,
        document: &str,
        cmetadata: &Value,
        embedding: &[f32],
    ) {
        self.conn
            .execute(
                "INSERT INTO embedding (id, collection_id, embedding, document, cmetadata)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    id,
                    collection_uuid,
                    embedding_to_blob(embedding),
                    document,
                    cmetadata.to_string()
                ],
            )
            .expect("insert embedding");
    }
}

impl Default for SqliteFixture {
    fn default() -> Self {
        Self::new()
    }
}
