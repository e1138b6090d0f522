//! # Skiff
//!
//! An in-memory inverted index kept in a skiplist, with boolean AND search.
//!
//! ## Features
//!
//! - Ordered term index with expected O(log n) insert and lookup
//! - Range lookups over the term order
//! - Idempotent posting-set updates
//! - A single analysis pipeline shared by indexing and querying
//! - Seedable level generation for reproducible index shapes

pub mod analysis;
pub mod cli;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;

pub mod prelude {
    pub use crate::analysis::analyzer::{Analyzer, SimpleAnalyzer};
    pub use crate::document::{Document, DocumentRegistry};
    pub use crate::engine::{SearchEngine, SearchHit};
    pub use crate::error::{Result, SkiffError};
    pub use crate::index::{DocId, IndexConfig, Indexer, PostingSet, TermSkipList};
    pub use crate::query::QueryEngine;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
