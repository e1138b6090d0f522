//! Builds a [`TermSkipList`] from document text.

use std::sync::Arc;

use ahash::AHashSet;
use log::trace;

use crate::analysis::analyzer::{Analyzer, SimpleAnalyzer};
use crate::error::Result;
use crate::index::config::IndexConfig;
use crate::index::skiplist::TermSkipList;
use crate::index::DocId;

/// Feeds analyzed documents into a term index.
///
/// # Examples
///
/// ```
/// use skiff::index::{IndexConfig, Indexer};
///
/// let mut indexer = Indexer::new(IndexConfig::default()).unwrap();
/// let terms = indexer.index_document(0, "The Dark Knight, the dark!").unwrap();
///
/// assert_eq!(terms, 3);
/// assert!(indexer.index().lookup("dark").contains(&0));
/// ```
pub struct Indexer {
    index: TermSkipList,
    analyzer: Arc<dyn Analyzer>,
    documents_indexed: usize,
}

impl Indexer {
    /// Create an indexer over an empty index, using [`SimpleAnalyzer`].
    pub fn new(config: IndexConfig) -> Result<Self> {
        Ok(Self::with_analyzer(
            TermSkipList::new(config)?,
            Arc::new(SimpleAnalyzer::new()),
        ))
    }

    /// Create an indexer over an existing index with a custom analyzer.
    pub fn with_analyzer(index: TermSkipList, analyzer: Arc<dyn Analyzer>) -> Self {
        Indexer {
            index,
            analyzer,
            documents_indexed: 0,
        }
    }

    /// Index every distinct term of `text` under `doc_id`.
    ///
    /// Returns the number of distinct terms found. Text that reduces to no
    /// terms is accepted and changes nothing.
    pub fn index_document(&mut self, doc_id: DocId, text: &str) -> Result<usize> {
        let mut seen = AHashSet::new();
        let mut distinct = Vec::new();
        for term in self.analyzer.terms(text)? {
            if seen.insert(term.clone()) {
                distinct.push(term);
            }
        }

        for term in &distinct {
            self.index.insert(term, doc_id);
        }

        self.documents_indexed += 1;
        trace!("document {doc_id}: {} distinct terms", distinct.len());

        Ok(distinct.len())
    }

    /// Index a batch of `(doc_id, text)` pairs. Returns the total number of
    /// distinct terms indexed across the batch, counted per document.
    pub fn index_documents<I, T>(&mut self, documents: I) -> Result<usize>
    where
        I: IntoIterator<Item = (DocId, T)>,
        T: AsRef<str>,
    {
        let mut total = 0;
        for (doc_id, text) in documents {
            total += self.index_document(doc_id, text.as_ref())?;
        }
        Ok(total)
    }

    /// The index built so far.
    pub fn index(&self) -> &TermSkipList {
        &self.index
    }

    /// The analyzer used to turn text into terms.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Number of `index_document` calls so far.
    pub fn documents_indexed(&self) -> usize {
        self.documents_indexed
    }

    /// Consume the indexer and return the index.
    pub fn into_index(self) -> TermSkipList {
        self.index
    }
}

impl std::fmt::Debug for Indexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Indexer")
            .field("terms", &self.index.len())
            .field("analyzer", &self.analyzer.name())
            .field("documents_indexed", &self.documents_indexed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::PipelineAnalyzer;
    use crate::analysis::tokenizer::WhitespaceTokenizer;

    fn indexer() -> Indexer {
        Indexer::new(IndexConfig::default().with_seed(17)).unwrap()
    }

    #[test]
    fn test_index_document_dedups_terms() {
        let mut indexer = indexer();
        let count = indexer.index_document(0, "joker Joker JOKER! batman").unwrap();

        assert_eq!(count, 2);
        assert_eq!(indexer.index().len(), 2);
        assert_eq!(indexer.index().posting_count(), 2);
        assert_eq!(indexer.documents_indexed(), 1);
    }

    #[test]
    fn test_empty_and_punctuation_only_text() {
        let mut indexer = indexer();
        assert_eq!(indexer.index_document(0, "").unwrap(), 0);
        assert_eq!(indexer.index_document(1, "-- ?! ...").unwrap(), 0);
        assert!(indexer.index().is_empty());
        assert_eq!(indexer.documents_indexed(), 2);
    }

    #[test]
    fn test_index_documents_batch() {
        let mut indexer = indexer();
        let total = indexer
            .index_documents(vec![(0, "batman joker"), (1, "batman robin")])
            .unwrap();

        assert_eq!(total, 4);
        let index = indexer.into_index();
        assert_eq!(index.len(), 3);
        assert_eq!(index.lookup("batman").len(), 2);
        assert!(index.validate().is_ok());
    }

    #[test]
    fn test_custom_analyzer() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()));
        let index = TermSkipList::new(IndexConfig::default().with_seed(1)).unwrap();
        let mut indexer = Indexer::with_analyzer(index, Arc::new(analyzer));

        indexer.index_document(0, "Case Kept!").unwrap();
        assert!(indexer.index().contains("Case"));
        assert!(indexer.index().contains("Kept!"));
        assert!(!indexer.index().contains("case"));
    }
}
