//! Core knowledge types.
//!
//! Defines [`Fact`] (a stored natural-language statement) and
//! [`SearchResult`] (a fact plus its similarity score, produced only by
//! search, never persisted).

use serde::{Deserialize, Serialize};

/// A stored fact, matching the `facts` table schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
    /// Integer primary key, assigned by the store on first creation and
    /// stable for the fact's lifetime.
    pub id: i64,
    /// The natural-language statement. Unique — no two facts share a text.
    pub text: String,
    /// Free-form provenance (e.g. `"chat"`, `"calendar-import"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Conventionally in `[0.0, 1.0]`; defaults to 1.0.
    pub confidence: f64,
    /// Embedding vector, present only after an explicit embedding write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    /// Labels attached by the categorizer collaborator. Read-only here.
    pub categories: Vec<String>,
    /// RFC 3339 creation timestamp. Immutable after creation.
    pub created_at: String,
    /// RFC 3339 last-modification timestamp. Refreshed on every mutation,
    /// including embedding-only updates.
    pub updated_at: String,
}

/// A fact ranked by cosine similarity against a query vector.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub fact: Fact,
    pub similarity: f64,
}
