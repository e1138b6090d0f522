//! Analyzer implementations that combine tokenizers and filters.

use crate::analysis::token::TokenStream;
use crate::error::Result;

mod pipeline;
mod simple;

pub use pipeline::PipelineAnalyzer;
pub use simple::SimpleAnalyzer;

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Analyze the given text and keep only the term strings, in order.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}
