//! Boolean AND query engine.
//!
//! A query is analyzed with the same analyzer that built the index. A
//! document matches when it contains every resulting term. Terms that are
//! not in the index simply match nothing; a query with no usable terms
//! matches nothing as well.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use skiff::analysis::analyzer::SimpleAnalyzer;
//! use skiff::index::{IndexConfig, Indexer};
//! use skiff::query::QueryEngine;
//!
//! let mut indexer = Indexer::new(IndexConfig::default()).unwrap();
//! indexer.index_document(0, "batman joker").unwrap();
//! indexer.index_document(1, "batman robin").unwrap();
//!
//! let engine = QueryEngine::new(indexer.index(), Arc::new(SimpleAnalyzer::new()));
//! assert_eq!(engine.resolve("Batman").unwrap(), vec![0, 1]);
//! assert_eq!(engine.resolve("joker BATMAN").unwrap(), vec![0]);
//! assert!(engine.resolve("zzz").unwrap().is_empty());
//! ```

use std::sync::Arc;

use ahash::AHashSet;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;
use crate::index::skiplist::TermSkipList;
use crate::index::{DocId, PostingSet};

/// How many documents a single query term matched on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMatch {
    /// The analyzed term.
    pub term: String,
    /// Number of documents containing the term.
    pub documents: usize,
}

/// Resolves queries against a borrowed [`TermSkipList`].
pub struct QueryEngine<'a> {
    index: &'a TermSkipList,
    analyzer: Arc<dyn Analyzer>,
}

impl<'a> QueryEngine<'a> {
    /// Create an engine. `analyzer` must be the one the index was built with.
    pub fn new(index: &'a TermSkipList, analyzer: Arc<dyn Analyzer>) -> Self {
        QueryEngine { index, analyzer }
    }

    /// Documents containing every term of `query`, ascending.
    pub fn resolve(&self, query: &str) -> Result<Vec<DocId>> {
        let terms = self.query_terms(query)?;
        if terms.is_empty() {
            debug!("query '{query}' has no usable terms");
            return Ok(Vec::new());
        }

        let mut postings: Vec<&PostingSet> = Vec::with_capacity(terms.len());
        for term in &terms {
            match self.index.postings(term) {
                Some(set) => postings.push(set),
                None => {
                    debug!("term '{term}' is not indexed");
                    return Ok(Vec::new());
                }
            }
        }

        // Start from the rarest term so the running intersection stays small.
        postings.sort_by_key(|set| set.len());
        let mut result: PostingSet = postings[0].clone();
        for set in &postings[1..] {
            result.retain(|doc| set.contains(doc));
            if result.is_empty() {
                break;
            }
        }

        Ok(sorted(result))
    }

    /// Documents containing any term `t` with `low <= t <= high`, ascending.
    ///
    /// Each bound is normalized to its first analyzed term, so `"Bat"` and
    /// `"bat"` are the same bound. A bound of several words keeps only its
    /// first term, so `"bat man"` is the bound `"bat"`. A bound with no
    /// analyzed term is used verbatim.
    pub fn range(&self, low: &str, high: &str) -> Result<Vec<DocId>> {
        let low = self.normalize_bound(low)?;
        let high = self.normalize_bound(high)?;
        Ok(sorted(self.index.range_lookup(&low, &high)))
    }

    /// Per-term match counts for `query`, in query order.
    pub fn explain(&self, query: &str) -> Result<Vec<TermMatch>> {
        Ok(self
            .query_terms(query)?
            .into_iter()
            .map(|term| {
                let documents = self.index.postings(&term).map_or(0, |set| set.len());
                TermMatch { term, documents }
            })
            .collect())
    }

    /// The distinct analyzed terms of `query`, in first-seen order.
    pub fn query_terms(&self, query: &str) -> Result<Vec<String>> {
        let mut seen = AHashSet::new();
        Ok(self
            .analyzer
            .terms(query)?
            .into_iter()
            .filter(|term| seen.insert(term.clone()))
            .collect())
    }

    fn normalize_bound(&self, bound: &str) -> Result<String> {
        Ok(self
            .analyzer
            .terms(bound)?
            .into_iter()
            .next()
            .unwrap_or_else(|| bound.to_string()))
    }
}

fn sorted(set: PostingSet) -> Vec<DocId> {
    let mut docs: Vec<DocId> = set.into_iter().collect();
    docs.sort_unstable();
    docs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::SimpleAnalyzer;
    use crate::index::{IndexConfig, Indexer};

    fn build(documents: &[&str]) -> Indexer {
        let mut indexer = Indexer::new(IndexConfig::default().with_seed(23)).unwrap();
        for (doc_id, text) in documents.iter().enumerate() {
            indexer.index_document(doc_id as DocId, text).unwrap();
        }
        indexer
    }

    fn engine(indexer: &Indexer) -> QueryEngine<'_> {
        QueryEngine::new(indexer.index(), Arc::new(SimpleAnalyzer::new()))
    }

    #[test]
    fn test_single_term() {
        let indexer = build(&["batman joker", "batman"]);
        assert_eq!(engine(&indexer).resolve("batman").unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_and_semantics_are_order_independent() {
        let indexer = build(&["batman joker", "batman", "joker"]);
        let engine = engine(&indexer);

        assert_eq!(engine.resolve("batman joker").unwrap(), vec![0]);
        assert_eq!(engine.resolve("joker batman").unwrap(), vec![0]);
        assert_eq!(engine.resolve("joker joker batman").unwrap(), vec![0]);
    }

    #[test]
    fn test_empty_and_unknown_queries() {
        let indexer = build(&["batman"]);
        let engine = engine(&indexer);

        assert!(engine.resolve("").unwrap().is_empty());
        assert!(engine.resolve("   ").unwrap().is_empty());
        assert!(engine.resolve("?!").unwrap().is_empty());
        assert!(engine.resolve("zzz").unwrap().is_empty());
        assert!(engine.resolve("batman zzz").unwrap().is_empty());
    }

    #[test]
    fn test_punctuation_in_query_is_ignored() {
        let indexer = build(&["Bat-Man!", "other"]);
        let engine = engine(&indexer);

        assert_eq!(engine.resolve("batman").unwrap(), vec![0]);
        assert_eq!(engine.resolve("BAT-MAN -- !").unwrap(), vec![0]);
    }

    #[test]
    fn test_results_are_sorted() {
        let documents: Vec<String> = (0..50).map(|i| format!("common doc{i}")).collect();
        let refs: Vec<&str> = documents.iter().map(String::as_str).collect();
        let indexer = build(&refs);

        let result = engine(&indexer).resolve("common").unwrap();
        assert_eq!(result, (0..50).collect::<Vec<DocId>>());
    }

    #[test]
    fn test_range() {
        let indexer = build(&["apple", "banana", "cherry", "date"]);
        let engine = engine(&indexer);

        assert_eq!(engine.range("b", "cz").unwrap(), vec![1, 2]);
        assert_eq!(engine.range("B", "CZ").unwrap(), vec![1, 2]);
        assert!(engine.range("x", "z").unwrap().is_empty());
    }

    #[test]
    fn test_range_keeps_first_term_of_each_bound() {
        let indexer = build(&["apple", "banana", "cherry", "date"]);
        let engine = engine(&indexer);

        // "Banana Split" is the bound "banana"; "cherry pie" is "cherry".
        assert_eq!(engine.range("Banana Split", "cherry pie").unwrap(), vec![1, 2]);
        assert_eq!(engine.range("b", "date apple").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_explain() {
        let indexer = build(&["batman joker", "batman"]);
        let matches = engine(&indexer).explain("Batman robin batman").unwrap();

        assert_eq!(
            matches,
            vec![
                TermMatch {
                    term: "batman".to_string(),
                    documents: 2
                },
                TermMatch {
                    term: "robin".to_string(),
                    documents: 0
                },
            ]
        );
    }
}
