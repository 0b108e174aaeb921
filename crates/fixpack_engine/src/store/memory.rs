use std::collections::HashMap;

use fixpack_base::{FilePath, FixpackError, FixpackResult};

use crate::corpus::Corpus;
use crate::fixture::Fixture;
use crate::store::traits::FixtureStore;

/// An in-memory fixture store backed by a HashMap.
///
/// Keeps every definition of a path in insertion order, so last-wins
/// reads and variant listing both stay O(1) lookups. First-seen path
/// order is tracked separately to keep listings deterministic.
///
/// # Example
///
/// ```
/// use fixpack_base::FilePath;
/// use fixpack_engine::{Fixture, FixtureContent, FixtureStore};
/// use fixpack_engine::store::InMemoryStore;
///
/// let mut store = InMemoryStore::new();
/// store
///     .insert(Fixture::new(
///         FilePath::from("include/base.h"),
///         FixtureContent::from("#pragma once"),
///         0,
///     ))
///     .unwrap();
///
/// assert!(store.contains(&FilePath::from("include/base.h")).unwrap());
/// assert_eq!(store.len().unwrap(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    fixtures: HashMap<FilePath, Vec<Fixture>>,
    path_order: Vec<FilePath>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        Self {
            fixtures: HashMap::new(),
            path_order: Vec::new(),
        }
    }

    /// Create a store holding every definition of the given corpus.
    pub fn from_corpus(corpus: &Corpus) -> FixpackResult<Self> {
        let mut store = Self::new();
        for fixture in corpus.iter() {
            store.insert(fixture.clone())?;
        }
        Ok(store)
    }
}

impl FixtureStore for InMemoryStore {
    fn insert(&mut self, fixture: Fixture) -> FixpackResult<()> {
        let slot = self.fixtures.entry(fixture.path().clone()).or_default();
        if slot.is_empty() {
            self.path_order.push(fixture.path().clone());
        }
        slot.push(fixture);
        Ok(())
    }

    fn get(&self, path: &FilePath) -> FixpackResult<Fixture> {
        self.fixtures
            .get(path)
            .and_then(|variants| variants.last())
            .cloned()
            .ok_or_else(|| Box::new(FixpackError::path_not_found(path.clone())))
    }

    fn variants(&self, path: &FilePath) -> FixpackResult<Vec<Fixture>> {
        self.fixtures
            .get(path)
            .cloned()
            .ok_or_else(|| Box::new(FixpackError::path_not_found(path.clone())))
    }

    fn contains(&self, path: &FilePath) -> FixpackResult<bool> {
        Ok(self.fixtures.contains_key(path))
    }

    fn list(&self) -> FixpackResult<Vec<Fixture>> {
        let mut resolved = Vec::with_capacity(self.path_order.len());
        for path in &self.path_order {
            resolved.push(self.get(path)?);
        }
        Ok(resolved)
    }

    fn paths(&self) -> FixpackResult<Vec<FilePath>> {
        Ok(self.path_order.clone())
    }

    fn clear(&mut self) -> FixpackResult<()> {
        self.fixtures.clear();
        self.path_order.clear();
        Ok(())
    }

    fn len(&self) -> FixpackResult<usize> {
        Ok(self.path_order.len())
    }

    fn is_empty(&self) -> FixpackResult<bool> {
        Ok(self.fixtures.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureContent;

    fn fixture(path: &str, content: &str, ordinal: usize) -> Fixture {
        Fixture::new(FilePath::from(path), FixtureContent::from(content), ordinal)
    }

    #[test]
    fn test_store_new() {
        let store = InMemoryStore::new();
        assert!(store.is_empty().unwrap());
        assert_eq!(store.len().unwrap(), 0);
    }

    #[test]
    fn test_store_insert_and_get() {
        let mut store = InMemoryStore::new();
        store
            .insert(fixture("include/base.h", "// base\n", 0))
            .unwrap();

        let retrieved = store.get(&FilePath::from("include/base.h")).unwrap();
        assert_eq!(retrieved.content().as_bytes(), b"// base\n");
    }

    #[test]
    fn test_store_get_missing_is_not_found() {
        let store = InMemoryStore::new();

        let err = store.get(&FilePath::from("missing.h")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_store_insert_same_path_appends_variant() {
        let mut store = InMemoryStore::new();
        store.insert(fixture("base.h", "v1", 0)).unwrap();
        store.insert(fixture("base.h", "v2", 1)).unwrap();

        // Reads resolve to the later definition
        let resolved = store.get(&FilePath::from("base.h")).unwrap();
        assert_eq!(resolved.content().as_bytes(), b"v2");

        // Both definitions are still reachable
        let variants = store.variants(&FilePath::from("base.h")).unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].content().as_bytes(), b"v1");
        assert_eq!(variants[1].content().as_bytes(), b"v2");

        // Distinct path count is unaffected
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_store_variants_missing_is_not_found() {
        let store = InMemoryStore::new();

        let err = store.variants(&FilePath::from("missing.h")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_store_contains() {
        let mut store = InMemoryStore::new();

        assert!(!store.contains(&FilePath::from("base.h")).unwrap());
        store.insert(fixture("base.h", "x", 0)).unwrap();
        assert!(store.contains(&FilePath::from("base.h")).unwrap());
    }

    #[test]
    fn test_store_list_resolved_in_first_seen_order() {
        let mut store = InMemoryStore::new();
        store.insert(fixture("b.h", "b", 0)).unwrap();
        store.insert(fixture("a.h", "a1", 1)).unwrap();
        store.insert(fixture("a.h", "a2", 2)).unwrap();

        let list = store.list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].path(), &FilePath::from("b.h"));
        assert_eq!(list[1].path(), &FilePath::from("a.h"));
        assert_eq!(list[1].content().as_bytes(), b"a2");
    }

    #[test]
    fn test_store_paths() {
        let mut store = InMemoryStore::new();
        store.insert(fixture("b.h", "b", 0)).unwrap();
        store.insert(fixture("a.h", "a", 1)).unwrap();

        assert_eq!(
            store.paths().unwrap(),
            vec![FilePath::from("b.h"), FilePath::from("a.h")]
        );
    }

    #[test]
    fn test_store_clear() {
        let mut store = InMemoryStore::new();
        store.insert(fixture("a.h", "a", 0)).unwrap();
        store.insert(fixture("b.h", "b", 1)).unwrap();

        assert_eq!(store.len().unwrap(), 2);
        store.clear().unwrap();
        assert!(store.is_empty().unwrap());
        assert!(store.paths().unwrap().is_empty());
    }

    #[test]
    fn test_store_from_corpus() {
        let corpus = Corpus::from_fixtures(vec![
            (FilePath::from("base.h"), FixtureContent::from("v1")),
            (FilePath::from("derived.h"), FixtureContent::from("d")),
            (FilePath::from("base.h"), FixtureContent::from("v2")),
        ]);

        let store = InMemoryStore::from_corpus(&corpus).unwrap();
        assert_eq!(store.len().unwrap(), 2);

        let resolved = store.get(&FilePath::from("base.h")).unwrap();
        assert_eq!(resolved.content().as_bytes(), b"v2");
        assert_eq!(resolved.ordinal(), 2);

        let variants = store.variants(&FilePath::from("base.h")).unwrap();
        assert_eq!(variants.len(), 2);
    }

    #[test]
    fn test_store_handle_basic_operations() {
        use crate::store::StoreHandle;

        let handle = StoreHandle::new(InMemoryStore::new());
        handle.insert(fixture("base.h", "content", 0)).unwrap();

        assert!(handle.contains(&FilePath::from("base.h")).unwrap());
        assert_eq!(handle.len().unwrap(), 1);

        let retrieved = handle.get(&FilePath::from("base.h")).unwrap();
        assert_eq!(retrieved.content().as_bytes(), b"content");

        handle.clear().unwrap();
        assert!(handle.is_empty().unwrap());
    }

    #[test]
    fn test_store_handle_clone_shares_state() {
        use crate::store::StoreHandle;

        let handle1 = StoreHandle::new(InMemoryStore::new());
        handle1.insert(fixture("base.h", "content", 0)).unwrap();

        let handle2 = handle1.clone();
        assert!(handle2.contains(&FilePath::from("base.h")).unwrap());
        assert_eq!(handle2.len().unwrap(), 1);
    }

    #[test]
    fn test_store_handle_concurrent_readers() {
        use crate::store::StoreHandle;
        use std::thread;

        let handle = StoreHandle::new(InMemoryStore::new());
        for i in 0..10 {
            handle
                .insert(fixture(&format!("file{}.h", i), "content", i))
                .unwrap();
        }

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let handle = handle.clone();
                thread::spawn(move || {
                    for i in 0..10 {
                        let path = FilePath::from(format!("file{}.h", i));
                        assert!(handle.get(&path).is_ok());
                    }
                })
            })
            .collect();

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
