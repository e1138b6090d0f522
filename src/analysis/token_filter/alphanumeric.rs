//! Alphanumeric filter implementation.

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A filter that keeps only `[a-z0-9]` characters of each token.
///
/// Everything else, including uppercase ASCII and all non-ASCII characters,
/// is dropped, so this filter is meant to run after [`LowercaseFilter`].
/// A token left with no characters is dropped from the stream; the
/// surviving tokens keep their original positions.
///
/// [`LowercaseFilter`]: super::LowercaseFilter
#[derive(Clone, Debug, Default)]
pub struct AlphanumericFilter;

impl AlphanumericFilter {
    /// Create a new alphanumeric filter.
    pub fn new() -> Self {
        AlphanumericFilter
    }

    fn is_kept(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit()
    }
}

impl Filter for AlphanumericFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .filter_map(|token| {
                if token.text.chars().all(Self::is_kept) {
                    return (!token.is_empty()).then_some(token);
                }

                let cleaned: String = token.text.chars().filter(|&c| Self::is_kept(c)).collect();
                (!cleaned.is_empty()).then(|| token.with_text(cleaned))
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "alphanumeric"
    }
}
