//! Token filters applied after tokenization.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform a token stream.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod alphanumeric;
pub mod lowercase;

pub use alphanumeric::AlphanumericFilter;
pub use lowercase::LowercaseFilter;
