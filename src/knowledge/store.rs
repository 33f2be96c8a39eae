//! The public knowledge store facade.
//!
//! [`KnowledgeStore`] composes the fact store and the search engine behind an
//! async surface. Each operation is a self-contained request: clone the
//! shared connection handle, hop to a blocking thread, lock, delegate, and
//! map failures into the [`KnowledgeError`] taxonomy per call site. The store
//! holds no cache and no locks of its own — SQLite's transactional
//! guarantees are the only concurrency boundary.

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::error::KnowledgeError;
use super::types::{Fact, SearchResult};
use super::{facts, search};
use crate::db;

/// Default number of results returned by a similarity search.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Async facade over the persisted fact collection.
#[derive(Clone)]
pub struct KnowledgeStore {
    db: Arc<Mutex<Connection>>,
}

impl KnowledgeStore {
    /// Wrap an already-open connection (used by tests and callers that
    /// share one connection across subsystems).
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }

    /// Open (or create) the knowledge database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KnowledgeError> {
        let conn = db::open_database(path).map_err(|e| KnowledgeError::Backend {
            message: e.to_string(),
            source: Some(e.into()),
        })?;
        Ok(Self::new(Arc::new(Mutex::new(conn))))
    }

    /// Insert or update a fact keyed on its text. Returns the fact id.
    ///
    /// On update, `source` and `confidence` are overwritten and `updated_at`
    /// refreshes; a previously stored embedding is left untouched.
    pub async fn store_fact(
        &self,
        text: &str,
        source: Option<&str>,
        confidence: Option<f64>,
    ) -> Result<i64, KnowledgeError> {
        validate_text(text)?;
        let text = text.to_string();
        let source = source.map(str::to_string);
        let confidence = confidence.unwrap_or(1.0);

        let stored_text = text.clone();
        let id = self
            .run(move |conn| facts::upsert_fact(conn, &text, source.as_deref(), confidence))
            .await
            .map_err(|e| storage_error(stored_text.clone(), e))?;

        tracing::info!(id, text = %stored_text, "fact stored");
        Ok(id)
    }

    /// Same upsert semantics as [`store_fact`], additionally (over)writing
    /// the embedding.
    pub async fn store_fact_with_embedding(
        &self,
        text: &str,
        embedding: Vec<f32>,
        source: Option<&str>,
        confidence: Option<f64>,
    ) -> Result<i64, KnowledgeError> {
        validate_text(text)?;
        let text = text.to_string();
        let source = source.map(str::to_string);
        let confidence = confidence.unwrap_or(1.0);
        let dims = embedding.len();

        let stored_text = text.clone();
        let id = self
            .run(move |conn| {
                facts::upsert_fact_with_embedding(
                    conn,
                    &text,
                    &embedding,
                    source.as_deref(),
                    confidence,
                )
            })
            .await
            .map_err(|e| storage_error(stored_text.clone(), e))?;

        tracing::info!(id, text = %stored_text, dims, "fact stored with embedding");
        Ok(id)
    }

    /// Point lookup by id. The embedding, if present, is decoded.
    pub async fn get_fact(&self, id: i64) -> Result<Fact, KnowledgeError> {
        self.run(move |conn| facts::get_fact(conn, id)).await
    }

    /// Enumerate all facts, most recently touched first. With
    /// `include_embeddings` false (the cheap path) every fact carries an
    /// absent embedding.
    pub async fn get_all_facts(
        &self,
        include_embeddings: bool,
    ) -> Result<Vec<Fact>, KnowledgeError> {
        self.run(move |conn| facts::get_all_facts(conn, include_embeddings))
            .await
    }

    /// Brute-force cosine search over embedded facts. Returns at most
    /// `limit` results scoring strictly above
    /// [`MIN_SIMILARITY`](search::MIN_SIMILARITY), best first.
    pub async fn search_by_embedding(
        &self,
        query: Vec<f32>,
        limit: usize,
    ) -> Result<Vec<SearchResult>, KnowledgeError> {
        let results = self
            .run(move |conn| search::search_by_embedding(conn, &query, limit))
            .await?;
        tracing::info!(matched = results.len(), limit, "embedding search served");
        Ok(results)
    }

    /// Remove a fact. Deleting a missing id fails with `NotFound`.
    pub async fn delete_fact(&self, id: i64) -> Result<(), KnowledgeError> {
        self.run(move |conn| facts::delete_fact(conn, id)).await?;
        tracing::info!(id, "fact deleted");
        Ok(())
    }

    /// Overwrite only a fact's embedding, refreshing `updated_at`.
    pub async fn update_embedding(
        &self,
        id: i64,
        embedding: Vec<f32>,
    ) -> Result<(), KnowledgeError> {
        self.run(move |conn| facts::update_embedding(conn, id, &embedding))
            .await?;
        tracing::info!(id, "embedding updated");
        Ok(())
    }

    /// Attach a category label (categorizer collaborator boundary).
    pub async fn add_category(&self, id: i64, category: &str) -> Result<(), KnowledgeError> {
        let category = category.to_string();
        self.run(move |conn| facts::add_category(conn, id, &category))
            .await
    }

    /// Run a closure against the shared connection on a blocking thread.
    async fn run<T, F>(&self, f: F) -> Result<T, KnowledgeError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, KnowledgeError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|e| KnowledgeError::internal(format!("db lock poisoned: {e}")))?;
            f(&conn)
        })
        .await
        .map_err(|e| KnowledgeError::internal(format!("db task failed: {e}")))?
    }
}

/// Reject empty fact text on the write path.
fn validate_text(text: &str) -> Result<(), KnowledgeError> {
    if text.trim().is_empty() {
        return Err(KnowledgeError::Storage {
            text: text.to_string(),
            message: "fact text must not be empty".into(),
            source: None,
        });
    }
    Ok(())
}

/// Reclassify a write-path failure as `Storage` carrying the offending
/// text. `NotFound` never occurs on the upsert path; anything else is a
/// failed unique-key write.
fn storage_error(text: String, err: KnowledgeError) -> KnowledgeError {
    match err {
        KnowledgeError::Storage { .. } => err,
        KnowledgeError::Backend { message, source } => KnowledgeError::Storage {
            text,
            message,
            source,
        },
        other => other,
    }
}
