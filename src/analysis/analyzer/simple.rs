//! The analyzer shared by indexing and querying.
//!
//! Text is split on whitespace, lowercased, stripped of everything outside
//! `[a-z0-9]`, and tokens left empty are dropped. There is no stemming and no
//! stop-word list.
//!
//! # Examples
//!
//! ```
//! use skiff::analysis::analyzer::{Analyzer, SimpleAnalyzer};
//!
//! let analyzer = SimpleAnalyzer::new();
//! let terms = analyzer.terms("Bat-Man! meets the JOKER -- again").unwrap();
//!
//! assert_eq!(terms, vec!["batman", "meets", "the", "joker", "again"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{AlphanumericFilter, LowercaseFilter};
use crate::analysis::tokenizer::WhitespaceTokenizer;
use crate::error::Result;

/// Whitespace tokenization followed by lowercase and `[a-z0-9]` cleaning.
#[derive(Clone, Debug)]
pub struct SimpleAnalyzer {
    inner: PipelineAnalyzer,
}

impl SimpleAnalyzer {
    /// Create the analyzer.
    pub fn new() -> Self {
        let inner = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(AlphanumericFilter::new()))
            .with_name("simple");

        SimpleAnalyzer { inner }
    }
}

impl Default for SimpleAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for SimpleAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_analyzer() {
        let analyzer = SimpleAnalyzer::new();

        assert_eq!(analyzer.terms("Bat-Man!").unwrap(), vec!["batman"]);
        assert_eq!(
            analyzer.terms("The Dark  Knight\t(2008)").unwrap(),
            vec!["the", "dark", "knight", "2008"]
        );
    }

    #[test]
    fn test_nothing_left() {
        let analyzer = SimpleAnalyzer::new();

        assert!(analyzer.terms("").unwrap().is_empty());
        assert!(analyzer.terms("   ").unwrap().is_empty());
        assert!(analyzer.terms("-- !! ...").unwrap().is_empty());
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let analyzer = SimpleAnalyzer::new();
        let terms = analyzer.terms("Joker joker JOKER!").unwrap();
        assert_eq!(terms, vec!["joker", "joker", "joker"]);
    }

    #[test]
    fn test_information_separators_split_terms() {
        let analyzer = SimpleAnalyzer::new();
        assert_eq!(analyzer.terms("bat\u{1f}man").unwrap(), vec!["bat", "man"]);
        assert_eq!(analyzer.terms("Bat\u{1c}MAN!").unwrap(), vec!["bat", "man"]);
    }

    #[test]
    fn test_positions_survive_filtering() {
        let analyzer = SimpleAnalyzer::new();
        let tokens: Vec<_> = analyzer.analyze("a -- b").unwrap().collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].position, 2);
    }
}
