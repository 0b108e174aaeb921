use std::sync::Arc;

use parking_lot::RwLock;

use fixpack_base::{FilePath, FixpackResult};

use crate::fixture::Fixture;

/// Trait for fixture storage implementations.
///
/// A store is populated once at load time and read-only afterwards;
/// there is deliberately no `remove`, since fixtures are never destroyed
/// at runtime. All operations return `FixpackResult` for consistent
/// error handling.
pub trait FixtureStore: Send + Sync + 'static {
    /// Add a fixture definition.
    ///
    /// Inserting a path that already exists does not replace the earlier
    /// definition; it appends a new variant that takes precedence on
    /// reads.
    fn insert(&mut self, fixture: Fixture) -> FixpackResult<()>;

    /// Retrieve the effective definition for a path.
    ///
    /// The last inserted definition wins. An absent path fails with
    /// `ErrorKind::PathNotFound`; a default or empty value is never
    /// returned.
    fn get(&self, path: &FilePath) -> FixpackResult<Fixture>;

    /// Retrieve every definition for a path, in insertion order.
    fn variants(&self, path: &FilePath) -> FixpackResult<Vec<Fixture>>;

    /// Check if a path has at least one definition.
    fn contains(&self, path: &FilePath) -> FixpackResult<bool>;

    /// List the effective definition of every path, in first-seen order.
    fn list(&self) -> FixpackResult<Vec<Fixture>>;

    /// List distinct paths in first-seen order.
    fn paths(&self) -> FixpackResult<Vec<FilePath>>;

    /// Clear all fixtures from the store.
    fn clear(&mut self) -> FixpackResult<()>;

    /// Number of distinct paths in the store.
    fn len(&self) -> FixpackResult<usize>;

    /// Returns true if the store contains no fixtures.
    fn is_empty(&self) -> FixpackResult<bool>;
}

/// A thread-safe handle to a fixture store.
///
/// StoreHandle provides cheap cloning (via Arc) and interior mutability
/// (via RwLock). After the load phase the store is only read, so any
/// number of readers proceed concurrently without writer contention.
///
/// This follows the same pattern as `PalHandle` in fixpack_base.
#[derive(Clone)]
pub struct StoreHandle(Arc<RwLock<dyn FixtureStore>>);

impl StoreHandle {
    /// Create a new StoreHandle wrapping the given store implementation.
    pub fn new<S: FixtureStore>(store: S) -> Self {
        Self(Arc::new(RwLock::new(store)))
    }

    /// Add a fixture definition.
    ///
    /// See [`FixtureStore::insert`] for details.
    pub fn insert(&self, fixture: Fixture) -> FixpackResult<()> {
        self.0.write().insert(fixture)
    }

    /// Retrieve the effective definition for a path.
    ///
    /// See [`FixtureStore::get`] for details.
    pub fn get(&self, path: &FilePath) -> FixpackResult<Fixture> {
        self.0.read().get(path)
    }

    /// Retrieve every definition for a path.
    ///
    /// See [`FixtureStore::variants`] for details.
    pub fn variants(&self, path: &FilePath) -> FixpackResult<Vec<Fixture>> {
        self.0.read().variants(path)
    }

    /// Check if a path has a definition.
    ///
    /// See [`FixtureStore::contains`] for details.
    pub fn contains(&self, path: &FilePath) -> FixpackResult<bool> {
        self.0.read().contains(path)
    }

    /// List effective definitions.
    ///
    /// See [`FixtureStore::list`] for details.
    pub fn list(&self) -> FixpackResult<Vec<Fixture>> {
        self.0.read().list()
    }

    /// List distinct paths.
    ///
    /// See [`FixtureStore::paths`] for details.
    pub fn paths(&self) -> FixpackResult<Vec<FilePath>> {
        self.0.read().paths()
    }

    /// Clear all fixtures.
    ///
    /// See [`FixtureStore::clear`] for details.
    pub fn clear(&self) -> FixpackResult<()> {
        self.0.write().clear()
    }

    /// Number of distinct paths.
    ///
    /// See [`FixtureStore::len`] for details.
    pub fn len(&self) -> FixpackResult<usize> {
        self.0.read().len()
    }

    /// Check if the store is empty.
    ///
    /// See [`FixtureStore::is_empty`] for details.
    pub fn is_empty(&self) -> FixpackResult<bool> {
        self.0.read().is_empty()
    }
}
