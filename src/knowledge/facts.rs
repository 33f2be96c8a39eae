//! Fact persistence — upsert, lookup, enumeration, deletion, and embedding
//! updates.
//!
//! All operations here are synchronous and take a `&Connection`; the async
//! [`KnowledgeStore`](super::store::KnowledgeStore) facade wraps them. The
//! upsert is a single `INSERT .. ON CONFLICT .. RETURNING` statement, so the
//! unique-text constraint is the sole serialization point for concurrent
//! writers.

use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

use super::codec;
use super::error::KnowledgeError;
use super::types::Fact;

/// Insert a fact, or update `source`/`confidence` if one with the same text
/// already exists. The embedding and `created_at` are left untouched on
/// conflict. Returns the row id either way.
pub fn upsert_fact(
    conn: &Connection,
    text: &str,
    source: Option<&str>,
    confidence: f64,
) -> Result<i64, KnowledgeError> {
    let now = chrono::Utc::now().to_rfc3339();
    let id = conn.query_row(
        "INSERT INTO facts (text, source, confidence, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?4) \
         ON CONFLICT(text) DO UPDATE SET \
             source = excluded.source, \
             confidence = excluded.confidence, \
             updated_at = excluded.updated_at \
         RETURNING id",
        params![text, source, confidence, now],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Same upsert semantics as [`upsert_fact`], but additionally encodes and
/// (over)writes the embedding column.
pub fn upsert_fact_with_embedding(
    conn: &Connection,
    text: &str,
    embedding: &[f32],
    source: Option<&str>,
    confidence: f64,
) -> Result<i64, KnowledgeError> {
    let now = chrono::Utc::now().to_rfc3339();
    let blob = codec::encode(embedding);
    let id = conn.query_row(
        "INSERT INTO facts (text, source, confidence, embedding, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
         ON CONFLICT(text) DO UPDATE SET \
             source = excluded.source, \
             confidence = excluded.confidence, \
             embedding = excluded.embedding, \
             updated_at = excluded.updated_at \
         RETURNING id",
        params![text, source, confidence, blob, now],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Point lookup by id, with the embedding decoded and categories loaded.
pub fn get_fact(conn: &Connection, id: i64) -> Result<Fact, KnowledgeError> {
    let row: Option<(i64, String, Option<String>, f64, Option<Vec<u8>>, String, String)> = conn
        .query_row(
            "SELECT id, text, source, confidence, embedding, created_at, updated_at \
             FROM facts WHERE id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                ))
            },
        )
        .optional()?;

    let Some((id, text, source, confidence, blob, created_at, updated_at)) = row else {
        return Err(KnowledgeError::NotFound { id });
    };

    let embedding = blob.as_deref().map(codec::decode).transpose()?;
    let categories = load_categories(conn, id)?;

    Ok(Fact {
        id,
        text,
        source,
        confidence,
        embedding,
        categories,
        created_at,
        updated_at,
    })
}

/// Enumerate all facts, most recently touched first (ties broken by id,
/// newest first).
///
/// When `include_embeddings` is false the blob column is not selected at
/// all and every returned fact carries `embedding: None`, regardless of
/// what is stored.
pub fn get_all_facts(
    conn: &Connection,
    include_embeddings: bool,
) -> Result<Vec<Fact>, KnowledgeError> {
    let sql = if include_embeddings {
        "SELECT id, text, source, confidence, embedding, created_at, updated_at \
         FROM facts ORDER BY updated_at DESC, id DESC"
    } else {
        "SELECT id, text, source, confidence, NULL, created_at, updated_at \
         FROM facts ORDER BY updated_at DESC, id DESC"
    };

    let mut stmt = conn.prepare(sql)?;
    let rows: Vec<(i64, String, Option<String>, f64, Option<Vec<u8>>, String, String)> = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut categories = load_all_categories(conn)?;

    let mut facts = Vec::with_capacity(rows.len());
    for (id, text, source, confidence, blob, created_at, updated_at) in rows {
        let embedding = blob.as_deref().map(codec::decode).transpose()?;
        facts.push(Fact {
            id,
            text,
            source,
            confidence,
            embedding,
            categories: categories.remove(&id).unwrap_or_default(),
            created_at,
            updated_at,
        });
    }
    Ok(facts)
}

/// Remove a fact. Deleting a missing row fails with `NotFound`, detected
/// via the affected-row count.
pub fn delete_fact(conn: &Connection, id: i64) -> Result<(), KnowledgeError> {
    let rows = conn.execute("DELETE FROM facts WHERE id = ?1", params![id])?;
    if rows == 0 {
        return Err(KnowledgeError::NotFound { id });
    }
    Ok(())
}

/// Overwrite only the embedding column, refreshing `updated_at`.
pub fn update_embedding(
    conn: &Connection,
    id: i64,
    embedding: &[f32],
) -> Result<(), KnowledgeError> {
    let now = chrono::Utc::now().to_rfc3339();
    let blob = codec::encode(embedding);
    let rows = conn.execute(
        "UPDATE facts SET embedding = ?1, updated_at = ?2 WHERE id = ?3",
        params![blob, now, id],
    )?;
    if rows == 0 {
        return Err(KnowledgeError::NotFound { id });
    }
    Ok(())
}

/// Attach a category label to a fact. Idempotent — attaching the same label
/// twice is a no-op. Used by the categorizer collaborator; the core contract
/// only reads categories.
pub fn add_category(conn: &Connection, id: i64, category: &str) -> Result<(), KnowledgeError> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM facts WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(KnowledgeError::NotFound { id });
    }
    conn.execute(
        "INSERT OR IGNORE INTO fact_categories (fact_id, category) VALUES (?1, ?2)",
        params![id, category],
    )?;
    Ok(())
}

fn load_categories(conn: &Connection, id: i64) -> Result<Vec<String>, KnowledgeError> {
    let mut stmt = conn.prepare(
        "SELECT category FROM fact_categories WHERE fact_id = ?1 ORDER BY category",
    )?;
    let categories = stmt
        .query_map(params![id], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(categories)
}

fn load_all_categories(conn: &Connection) -> Result<HashMap<i64, Vec<String>>, KnowledgeError> {
    let mut stmt =
        conn.prepare("SELECT fact_id, category FROM fact_categories ORDER BY category")?;
    let rows: Vec<(i64, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut map: HashMap<i64, Vec<String>> = HashMap::new();
    for (fact_id, category) in rows {
        map.entry(fact_id).or_default().push(category);
    }
    Ok(map)
}
