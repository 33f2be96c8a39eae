//! CLI subcommand implementations.
//!
//! Inspection and maintenance surface for the knowledge database. The
//! assistant's chat loop and embedding client live elsewhere; everything
//! here goes through the [`KnowledgeStore`] facade.

use anyhow::Result;
use serde::Serialize;

use crate::config::MnemoConfig;
use crate::knowledge::{Fact, KnowledgeStore};

fn open_store(config: &MnemoConfig) -> Result<KnowledgeStore> {
    let db_path = config.resolved_db_path();
    Ok(KnowledgeStore::open(&db_path)?)
}

/// Store a fact from the command line (no embedding — the assistant's
/// embedding client backfills vectors separately).
pub async fn add(
    config: &MnemoConfig,
    text: &str,
    source: Option<&str>,
    confidence: Option<f64>,
) -> Result<()> {
    let store = open_store(config)?;
    let id = store.store_fact(text, source, confidence).await?;
    println!("Stored fact {id}");
    Ok(())
}

/// List all facts, most recently touched first.
pub async fn list(config: &MnemoConfig, with_embeddings: bool) -> Result<()> {
    let store = open_store(config)?;
    let facts = store.get_all_facts(with_embeddings).await?;

    if facts.is_empty() {
        println!("No facts stored.");
        return Ok(());
    }

    for fact in &facts {
        let dims = match &fact.embedding {
            Some(v) => format!("{}d", v.len()),
            None => "-".to_string(),
        };
        println!(
            "{:>6}  {:<50}  conf={:.2}  emb={}  {}",
            fact.id,
            truncate(&fact.text, 50),
            fact.confidence,
            dims,
            fact.updated_at
        );
    }
    println!("\n{} facts.", facts.len());
    Ok(())
}

/// Show one fact in full.
pub async fn show(config: &MnemoConfig, id: i64) -> Result<()> {
    let store = open_store(config)?;
    let fact = store.get_fact(id).await?;

    println!("Fact {}", fact.id);
    println!("{}", "=".repeat(40));
    println!("  Text:        {}", fact.text);
    println!("  Source:      {}", fact.source.as_deref().unwrap_or("-"));
    println!("  Confidence:  {:.2}", fact.confidence);
    match &fact.embedding {
        Some(v) => println!("  Embedding:   {} dimensions", v.len()),
        None => println!("  Embedding:   none"),
    }
    if !fact.categories.is_empty() {
        println!("  Categories:  {}", fact.categories.join(", "));
    }
    println!("  Created:     {}", fact.created_at);
    println!("  Updated:     {}", fact.updated_at);
    Ok(())
}

/// Semantic search with a raw query vector (JSON array of floats).
///
/// Debugging aid — in the assistant the query vector comes from the
/// embedding client, not the command line.
pub async fn search(config: &MnemoConfig, query_json: &str, limit: usize) -> Result<()> {
    let query: Vec<f32> =
        serde_json::from_str(query_json).map_err(|e| anyhow::anyhow!("invalid query vector: {e}"))?;

    let store = open_store(config)?;
    let results = store.search_by_embedding(query, limit).await?;

    if results.is_empty() {
        println!("No matches above the similarity threshold.");
        return Ok(());
    }

    for r in &results {
        println!(
            "{:.4}  {:>6}  {}",
            r.similarity,
            r.fact.id,
            truncate(&r.fact.text, 60)
        );
    }
    Ok(())
}

/// Delete a fact by id.
pub async fn delete(config: &MnemoConfig, id: i64) -> Result<()> {
    let store = open_store(config)?;
    store.delete_fact(id).await?;
    println!("Deleted fact {id}");
    Ok(())
}

/// Display knowledge store statistics in the terminal.
pub async fn stats(config: &MnemoConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let store = open_store(config)?;
    let facts = store.get_all_facts(true).await?;

    let total = facts.len();
    let embedded = facts.iter().filter(|f| f.embedding.is_some()).count();
    let db_size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    println!("Knowledge Store Statistics");
    println!("{}", "=".repeat(40));
    println!("  Total facts:         {total}");
    println!("  With embedding:      {embedded}");
    println!("  Without embedding:   {}", total - embedded);
    println!("  Database size:       {db_size} bytes");

    if let Some(newest) = facts.first() {
        println!("  Last updated:        {}", newest.updated_at);
    }
    Ok(())
}

/// Export format — wraps all facts.
#[derive(Debug, Serialize)]
struct ExportData {
    facts: Vec<Fact>,
}

/// Export all facts (embeddings included) as JSON to stdout.
pub async fn export(config: &MnemoConfig) -> Result<()> {
    let store = open_store(config)?;
    let facts = store.get_all_facts(true).await?;

    let data = ExportData { facts };
    let json = serde_json::to_string_pretty(&data)?;
    println!("{json}");

    eprintln!("Exported {} facts.", data.facts.len());
    Ok(())
}

/// Truncate text to max_chars characters, appending "..." if truncated.
fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((end, _)) => format!("{}...", &text[..end]),
    }
}
