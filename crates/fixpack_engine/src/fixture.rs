//! The fixture data model.
//!
//! A fixture is a pre-authored input file served to an external test
//! harness: a relative path plus the literal bytes stored at that path.
//! Contents are opaque; nothing in this crate interprets, normalizes or
//! transforms them, because the consuming harness asserts on exact bytes.

use fixpack_base::{FilePath, FixpackResult, err};

/// The literal bytes of a fixture.
///
/// A thin newtype over `Vec<u8>` that makes the "opaque, never
/// transformed" contract explicit at the type level. A UTF-8 view is
/// offered for display purposes only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureContent(Vec<u8>);

impl FixtureContent {
    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the content and returns the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the content as UTF-8 text, for display only.
    pub fn as_utf8(&self) -> FixpackResult<&str> {
        std::str::from_utf8(&self.0).map_err(|_e| err!("Fixture content is not valid UTF-8"))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for FixtureContent {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for FixtureContent {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for FixtureContent {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for FixtureContent {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

/// A single fixture definition: a path, its bytes, and its position in
/// corpus order.
///
/// The same path may be defined more than once in a corpus; `ordinal`
/// (the zero-based position of this definition in corpus order) is what
/// tells the definitions apart. Fixtures are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    path: FilePath,
    content: FixtureContent,
    ordinal: usize,
}

impl Fixture {
    pub fn new(path: FilePath, content: FixtureContent, ordinal: usize) -> Self {
        Self {
            path,
            content,
            ordinal,
        }
    }

    /// Returns the fixture's relative path.
    pub fn path(&self) -> &FilePath {
        &self.path
    }

    /// Returns the fixture's literal bytes.
    pub fn content(&self) -> &FixtureContent {
        &self.content
    }

    /// Returns the position of this definition in corpus order.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}
