#![allow(dead_code)]

use mnemo::db;
use mnemo::knowledge::KnowledgeStore;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Open a fresh in-memory database with the schema applied.
pub fn test_db() -> Connection {
    db::open_memory_database().unwrap()
}

/// A [`KnowledgeStore`] over a fresh in-memory database.
pub fn test_store() -> KnowledgeStore {
    KnowledgeStore::new(Arc::new(Mutex::new(test_db())))
}

/// Generate a deterministic 8-dim embedding with a spike at position `seed`.
/// Distinct seeds produce orthogonal vectors.
pub fn spike_embedding(seed: usize) -> Vec<f32> {
    let mut v = vec![0.0f32; 8];
    v[seed % 8] = 1.0;
    v
}

/// Generate an embedding with high cosine similarity to `base`.
pub fn similar_embedding(base: &[f32]) -> Vec<f32> {
    let mut v = base.to_vec();
    for x in &mut v {
        *x += 0.05;
    }
    v
}
