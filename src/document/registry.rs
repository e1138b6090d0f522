//! Maps document ids back to display names.

use serde::{Deserialize, Serialize};

use crate::index::DocId;

/// Display names of loaded documents, indexed by [`DocId`].
///
/// Ids are dense and assigned in registration order, so the registry is a
/// plain vector.
///
/// # Examples
///
/// ```
/// use skiff::document::DocumentRegistry;
///
/// let mut registry = DocumentRegistry::new();
/// let id = registry.register("The Dark Knight");
///
/// assert_eq!(id, 0);
/// assert_eq!(registry.name(id), Some("The Dark Knight"));
/// assert_eq!(registry.name(1), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRegistry {
    names: Vec<String>,
}

impl DocumentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name and return the id it was given.
    pub fn register<S: Into<String>>(&mut self, name: S) -> DocId {
        self.names.push(name.into());
        (self.names.len() - 1) as DocId
    }

    /// Display name of `id`.
    pub fn name(&self, id: DocId) -> Option<&str> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.names.get(index))
            .map(String::as_str)
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no document has been registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_dense() {
        let mut registry = DocumentRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.register("a"), 0);
        assert_eq!(registry.register("b"), 1);
        assert_eq!(registry.register("a"), 2);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.name(2), Some("a"));
        assert_eq!(registry.name(3), None);
    }
}
