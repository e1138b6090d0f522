//! Index module for Skiff.
//!
//! The index maps terms to posting sets inside a [`TermSkipList`]; the
//! [`Indexer`] feeds it analyzed documents.

pub mod config;
pub mod indexer;
pub mod level;
pub mod skiplist;

use ahash::AHashSet;

/// Identifier of a document, assigned densely from 0 by ingestion.
pub type DocId = u64;

/// Unordered set of documents containing a term.
pub type PostingSet = AHashSet<DocId>;

// Re-export commonly used types
pub use config::IndexConfig;
pub use indexer::Indexer;
pub use level::{LevelGenerator, LevelSource, RngLevelSource};
pub use skiplist::{IndexStats, TermSkipList};
