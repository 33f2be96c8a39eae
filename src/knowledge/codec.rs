//! Embedding wire format — packed little-endian f32, 4 bytes per element.
//!
//! No header, no length prefix, no dimensionality marker: a vector of `n`
//! elements encodes to exactly `4 * n` bytes. Any producer of embeddings must
//! emit this exact layout for round-trip correctness.

use thiserror::Error;

/// Failure decoding a stored embedding blob.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The blob length is not a multiple of 4 — corrupt storage, not a
    /// truncatable remainder.
    #[error("embedding blob length {len} is not a multiple of 4")]
    TruncatedBlob { len: usize },
}

/// Encode an embedding vector as packed little-endian f32 bytes.
pub fn encode(embedding: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * 4);
    for value in embedding {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Decode a packed little-endian f32 blob back into a vector.
///
/// Exact inverse of [`encode`]: `decode(&encode(v)) == Ok(v)` for every
/// finite-valued `v`. Fails on a blob whose length is not a multiple of 4.
pub fn decode(bytes: &[u8]) -> Result<Vec<f32>, CodecError> {
    if bytes.len() % 4 != 0 {
        return Err(CodecError::TruncatedBlob { len: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
