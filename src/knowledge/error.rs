//! Typed failure taxonomy for the knowledge store.
//!
//! Every store and search operation returns exactly one of these kinds on
//! failure. Not-found conditions are detected structurally (zero rows
//! affected, `QueryReturnedNoRows`) — never by matching backend message text.

use thiserror::Error;

use super::codec::CodecError;

/// Underlying cause carried alongside a [`KnowledgeError`] kind.
pub type ErrorSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A knowledge store failure.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// The referenced fact id does not exist. Recoverable by the caller.
    #[error("fact not found: {id}")]
    NotFound { id: i64 },

    /// A write-path failure (insert/upsert) for a specific fact text.
    #[error("failed to store fact {text:?}: {message}")]
    Storage {
        text: String,
        message: String,
        #[source]
        source: Option<ErrorSource>,
    },

    /// Any other backend failure: connectivity, query failure, corrupt
    /// stored blob.
    #[error("knowledge backend failure: {message}")]
    Backend {
        message: String,
        #[source]
        source: Option<ErrorSource>,
    },
}

impl From<rusqlite::Error> for KnowledgeError {
    fn from(err: rusqlite::Error) -> Self {
        KnowledgeError::Backend {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<CodecError> for KnowledgeError {
    fn from(err: CodecError) -> Self {
        KnowledgeError::Backend {
            message: format!("corrupt stored embedding: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

impl KnowledgeError {
    /// Internal (non-backend) failure, e.g. a poisoned lock or a failed
    /// blocking task.
    pub(crate) fn internal(message: impl Into<String>) -> Self {
        KnowledgeError::Backend {
            message: message.into(),
            source: None,
        }
    }
}
