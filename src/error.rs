//! Error types for the Skiff library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SkiffError`] enum. Absence of data is never an error: a term that was
//! never indexed looks up to an empty posting set, and a query with no usable
//! tokens resolves to an empty result.
//!
//! # Examples
//!
//! ```
//! use skiff::error::{Result, SkiffError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SkiffError::config("max_level must be >= 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Skiff operations.
#[derive(Error, Debug)]
pub enum SkiffError {
    /// I/O errors (reading a document source, stdin, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed index configuration, rejected at construction time.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Index structure errors (invariant violations found by validation)
    #[error("Index error: {0}")]
    Index(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with SkiffError.
pub type Result<T> = std::result::Result<T, SkiffError>;

impl SkiffError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SkiffError::Config(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        SkiffError::Index(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SkiffError::config("max_level must be >= 1");
        assert_eq!(
            error.to_string(),
            "Configuration error: max_level must be >= 1"
        );

        let error = SkiffError::index("level 0 out of order");
        assert_eq!(error.to_string(), "Index error: level 0 out of order");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let skiff_error = SkiffError::from(io_error);

        match skiff_error {
            SkiffError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<u64>("not json").unwrap_err();
        let skiff_error = SkiffError::from(json_error);
        assert!(matches!(skiff_error, SkiffError::Json(_)));
        assert!(skiff_error.to_string().starts_with("JSON error:"));
    }
}
