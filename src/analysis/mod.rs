//! Text analysis module for Skiff.
//!
//! Analysis turns raw text into index terms. The same pipeline is used when a
//! document is indexed and when a query is resolved, so both sides always
//! agree on what a term looks like.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
