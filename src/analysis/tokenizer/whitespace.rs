//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A tokenizer that splits text on runs of whitespace.
///
/// Whitespace is anything `char::is_whitespace` accepts, so tabs, newlines
/// and Unicode spaces all separate tokens. The ASCII information separators
/// U+001C to U+001F also split tokens. The tokens themselves are left
/// untouched; case folding and punctuation stripping are the filters' job.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }

    fn is_separator(ch: char) -> bool {
        ch.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&ch)
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;

        for (offset, ch) in text.char_indices() {
            match (Self::is_separator(ch), start) {
                (true, Some(begin)) => {
                    tokens.push(Token::with_offsets(
                        &text[begin..offset],
                        tokens.len(),
                        begin,
                        offset,
                    ));
                    start = None;
                }
                (false, None) => start = Some(offset),
                _ => {}
            }
        }

        if let Some(begin) = start {
            tokens.push(Token::with_offsets(
                &text[begin..],
                tokens.len(),
                begin,
                text.len(),
            ));
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
