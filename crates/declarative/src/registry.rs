//! Resource registry - resource kinds addressable by type name

use crate::error::{Error, Result};
use crate::resource::{BoxedResource, ErasedResource, Resource, boxed};
use std::collections::BTreeMap;

/// Resource kinds a provider exposes, keyed by type name
#[derive(Default)]
pub struct Registry {
    resources: BTreeMap<&'static str, BoxedResource>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource kind, replacing any previous one with the same name
    pub fn register<R: Resource + 'static>(&mut self, resource: R) {
        let resource = boxed(resource);
        let name = resource.type_name();
        if self.resources.insert(name, resource).is_some() {
            log::warn!("Resource type {name} registered twice; keeping the latest");
        }
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<R: Resource + 'static>(mut self, resource: R) -> Self {
        self.register(resource);
        self
    }

    /// Look up a resource kind
    pub fn get(&self, type_name: &str) -> Result<&dyn ErasedResource> {
        self.resources
            .get(type_name)
            .map(|resource| &**resource)
            .ok_or_else(|| Error::UnknownResourceType(type_name.to_string()))
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    /// Number of registered resource kinds
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::resource::tests::NoteResource;

    #[test]
    fn test_register_and_get() {
        let registry = Registry::new().with(NoteResource::default());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.type_names(), vec!["note"]);
        assert_eq!(registry.get("note").unwrap().type_name(), "note");
    }

    #[test]
    fn test_unknown_type() {
        let registry = Registry::new();
        assert!(registry.is_empty());

        let err = registry.get("langfuse_nope").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownResourceType);
        assert_eq!(err.to_string(), "unknown resource type: langfuse_nope");
    }

    #[test]
    fn test_duplicate_registration_replaces() {
        let mut registry = Registry::new();
        registry.register(NoteResource::default());
        registry.register(NoteResource::default());
        assert_eq!(registry.len(), 1);
    }
}
