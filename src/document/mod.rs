//! Documents, their display names, and the sources they are read from.

pub mod reader;
pub mod registry;

use serde::{Deserialize, Serialize};

use crate::index::DocId;

pub use reader::TsvDocumentReader;
pub use registry::DocumentRegistry;

/// A document as delivered by ingestion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Dense id assigned in ingestion order.
    pub id: DocId,
    /// Display name.
    pub name: String,
    /// Raw text to index. May be empty.
    pub text: String,
}

impl Document {
    /// Create a new document.
    pub fn new<N: Into<String>, T: Into<String>>(id: DocId, name: N, text: T) -> Self {
        Document {
            id,
            name: name.into(),
            text: text.into(),
        }
    }
}
