//! Knowledge store for a personal assistant — persistent facts with
//! embedding-based semantic recall.
//!
//! Facts are short natural-language statements, unique by text, each
//! optionally annotated with an f32 embedding vector produced by an external
//! embedding client. The store answers exact lookups and brute-force
//! cosine-similarity queries over those vectors.
//!
//! # Architecture
//!
//! - **Storage**: SQLite; embeddings live in a plain BLOB column as packed
//!   little-endian f32 (no vector index — sized for a personal knowledge
//!   base, not a large corpus)
//! - **Search**: full scan, cosine similarity, strict 0.5 threshold
//! - **Surface**: the async [`knowledge::KnowledgeStore`] facade, consumed
//!   by the assistant's chat orchestration and tool handlers
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`db`] — SQLite database initialization and schema
//! - [`knowledge`] — Core engine: codec, errors, fact store, search, facade

pub mod config;
pub mod db;
pub mod knowledge;
