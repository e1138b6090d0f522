//! Search engine facade tying ingestion, indexing and querying together.
//!
//! [`SearchEngine`] owns an [`Indexer`] and a [`DocumentRegistry`]. It hands
//! out document ids itself, so documents from several sources can be loaded
//! into one engine; ids carried by incoming [`Document`]s are not reused.
//!
//! # Examples
//!
//! ```
//! use skiff::engine::SearchEngine;
//! use skiff::index::IndexConfig;
//!
//! let mut engine = SearchEngine::new(IndexConfig::default()).unwrap();
//! engine.add_document("The Dark Knight", "Batman faces the Joker").unwrap();
//! engine.add_document("Batman Begins", "Batman trains").unwrap();
//!
//! let hits = engine.search("batman joker").unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name, "The Dark Knight");
//! ```

use std::path::Path;
use std::time::Instant;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentRegistry, TsvDocumentReader};
use crate::error::Result;
use crate::index::{DocId, IndexConfig, IndexStats, Indexer};
use crate::query::{QueryEngine, TermMatch};

/// A matching document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Document id.
    pub doc_id: DocId,
    /// Display name from the registry.
    pub name: String,
}

/// Outcome of loading a document source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Documents added by this load.
    pub documents: usize,
    /// Sum over added documents of their distinct term counts.
    pub distinct_terms: usize,
    /// Wall time spent loading.
    pub duration_ms: u64,
}

/// Engine-wide statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Documents registered.
    pub documents: usize,
    /// Shape of the term index.
    pub index: IndexStats,
}

/// Indexes documents and answers queries with named hits.
#[derive(Debug)]
pub struct SearchEngine {
    indexer: Indexer,
    registry: DocumentRegistry,
}

impl SearchEngine {
    /// Create an empty engine.
    pub fn new(config: IndexConfig) -> Result<Self> {
        Ok(SearchEngine {
            indexer: Indexer::new(config)?,
            registry: DocumentRegistry::new(),
        })
    }

    /// Register and index one document, returning its id.
    pub fn add_document(&mut self, name: &str, text: &str) -> Result<DocId> {
        let doc_id = self.registry.register(name);
        self.indexer.index_document(doc_id, text)?;
        Ok(doc_id)
    }

    /// Load every document from `documents`.
    ///
    /// Loading stops at the first error, which is returned. Documents added
    /// before the error stay indexed and searchable.
    pub fn load<I>(&mut self, documents: I) -> Result<LoadReport>
    where
        I: IntoIterator<Item = Result<Document>>,
    {
        let start = Instant::now();
        let mut report = LoadReport {
            documents: 0,
            distinct_terms: 0,
            duration_ms: 0,
        };

        for document in documents {
            let document = match document {
                Ok(document) => document,
                Err(e) => {
                    warn!(
                        "document source failed after {} documents: {e}",
                        report.documents
                    );
                    return Err(e);
                }
            };

            let doc_id = self.registry.register(document.name);
            report.distinct_terms += self.indexer.index_document(doc_id, &document.text)?;
            report.documents += 1;
        }

        report.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            "loaded {} documents ({} distinct terms per document summed) in {} ms",
            report.documents, report.distinct_terms, report.duration_ms
        );

        Ok(report)
    }

    /// Load a tab-separated file.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
        let reader = TsvDocumentReader::open(path)?;
        self.load(reader)
    }

    /// A query engine over the current index.
    pub fn query_engine(&self) -> QueryEngine<'_> {
        QueryEngine::new(self.indexer.index(), self.indexer.analyzer().clone())
    }

    /// Documents containing every term of `query`, ascending by id.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let doc_ids = self.query_engine().resolve(query)?;
        Ok(self.hits(doc_ids))
    }

    /// Documents containing any term between `low` and `high` inclusive.
    ///
    /// Bounds are normalized like query terms, keeping only the first term of
    /// each: `range("Bat Man", "joker")` searches `"bat"..="joker"`.
    pub fn range(&self, low: &str, high: &str) -> Result<Vec<SearchHit>> {
        let doc_ids = self.query_engine().range(low, high)?;
        Ok(self.hits(doc_ids))
    }

    /// Per-term match counts for `query`.
    pub fn explain(&self, query: &str) -> Result<Vec<TermMatch>> {
        self.query_engine().explain(query)
    }

    /// Engine statistics.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            documents: self.registry.len(),
            index: self.indexer.index().stats(),
        }
    }

    /// The document registry.
    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    /// The indexer, and through it the term index.
    pub fn indexer(&self) -> &Indexer {
        &self.indexer
    }

    fn hits(&self, doc_ids: Vec<DocId>) -> Vec<SearchHit> {
        doc_ids
            .into_iter()
            .map(|doc_id| SearchHit {
                doc_id,
                name: self
                    .registry
                    .name(doc_id)
                    .map_or_else(|| format!("Doc_{doc_id}"), str::to_string),
            })
            .collect()
    }
}
