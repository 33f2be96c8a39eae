pub mod codec;
pub mod error;
pub mod facts;
pub mod search;
pub mod store;
pub mod types;

pub use error::KnowledgeError;
pub use store::KnowledgeStore;
pub use types::{Fact, SearchResult};
