//! SQL DDL for the knowledge store tables.
//!
//! Defines the `facts`, `fact_categories`, and `schema_meta` tables. All DDL
//! uses `IF NOT EXISTS` for idempotent initialization.

use rusqlite::Connection;

/// All schema DDL statements.
const SCHEMA_SQL: &str = r#"
-- Core fact storage. Text is the unique key; embedding is a packed
-- little-endian f32 blob, NULL until the fact has been vectorized.
CREATE TABLE IF NOT EXISTS facts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL UNIQUE,
    source TEXT,
    confidence REAL NOT NULL DEFAULT 1.0,
    embedding BLOB,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_facts_updated ON facts(updated_at);

-- Associated labels, attached by the categorizer collaborator.
CREATE TABLE IF NOT EXISTS fact_categories (
    fact_id INTEGER NOT NULL REFERENCES facts(id) ON DELETE CASCADE,
    category TEXT NOT NULL,
    UNIQUE(fact_id, category)
);

CREATE INDEX IF NOT EXISTS idx_fact_categories_fact ON fact_categories(fact_id);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    // Set initial schema version if not already present
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}
