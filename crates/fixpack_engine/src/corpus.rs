//! The fixture corpus: an ordered list of definitions plus a path index.
//!
//! A corpus is allowed to define the same path more than once with
//! different bytes. A real filesystem cannot represent that, so reads
//! resolve to the last definition in corpus order (the overwrite
//! semantics a filesystem would apply), while every definition stays
//! reachable through [`Corpus::variants`].

use std::collections::HashMap;
use std::fmt::Write as _;

use fixpack_base::{FilePath, FixpackError, FixpackResult};

use crate::fixture::{Fixture, FixtureContent};

/// An immutable, ordered collection of fixture definitions.
///
/// Construction assigns each definition an ordinal in input order and is
/// fully deterministic: building twice from the same entries yields equal
/// corpora.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    fixtures: Vec<Fixture>,
    index: HashMap<FilePath, Vec<usize>>,
    path_order: Vec<FilePath>,
}

impl Corpus {
    /// Build a corpus from `(path, content)` entries in corpus order.
    pub fn from_fixtures(entries: Vec<(FilePath, FixtureContent)>) -> Self {
        let mut fixtures = Vec::with_capacity(entries.len());
        let mut index: HashMap<FilePath, Vec<usize>> = HashMap::new();
        let mut path_order = Vec::new();

        for (ordinal, (path, content)) in entries.into_iter().enumerate() {
            let slot = index.entry(path.clone()).or_default();
            if slot.is_empty() {
                path_order.push(path.clone());
            }
            slot.push(ordinal);
            fixtures.push(Fixture::new(path, content, ordinal));
        }

        Self {
            fixtures,
            index,
            path_order,
        }
    }

    /// Return the effective definition for `path`.
    ///
    /// When a path is defined multiple times, the last definition in
    /// corpus order wins. An absent path is an error, never a default.
    pub fn resolve(&self, path: &FilePath) -> FixpackResult<&Fixture> {
        let indices = self
            .index
            .get(path)
            .ok_or_else(|| Box::new(FixpackError::path_not_found(path.clone())))?;
        // index entries are never empty
        let last = *indices.last().ok_or_else(|| {
            Box::new(FixpackError::path_not_found(path.clone()))
        })?;
        Ok(&self.fixtures[last])
    }

    /// Return every definition for `path`, in corpus order.
    pub fn variants(&self, path: &FilePath) -> FixpackResult<Vec<&Fixture>> {
        let indices = self
            .index
            .get(path)
            .ok_or_else(|| Box::new(FixpackError::path_not_found(path.clone())))?;
        Ok(indices.iter().map(|&i| &self.fixtures[i]).collect())
    }

    /// Returns true if `path` has at least one definition.
    pub fn contains(&self, path: &FilePath) -> bool {
        self.index.contains_key(path)
    }

    /// Iterate over distinct paths in first-seen corpus order.
    pub fn paths(&self) -> impl Iterator<Item = &FilePath> {
        self.path_order.iter()
    }

    /// Iterate over every definition in corpus order.
    pub fn iter(&self) -> impl Iterator<Item = &Fixture> {
        self.fixtures.iter()
    }

    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.path_order.len()
    }

    /// Total number of definitions, duplicates included.
    pub fn fixture_count(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Render a one-line-per-path summary of the corpus.
    ///
    /// Used by the CLI listing and snapshot tests.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for path in self.paths() {
            let variants = self.index.get(path).map(Vec::len).unwrap_or(0);
            let resolved_len = self
                .resolve(path)
                .map(|f| f.content().len())
                .unwrap_or(0);
            if variants > 1 {
                let _ = writeln!(
                    out,
                    "{} ({} bytes, {} variants)",
                    path, resolved_len, variants
                );
            } else {
                let _ = writeln!(out, "{} ({} bytes)", path, resolved_len);
            }
        }
        out
    }
}

impl PartialEq for Corpus {
    fn eq(&self, other: &Self) -> bool {
        // path_order and index are derived from the fixture list
        self.fixtures == other.fixtures
    }
}

impl Eq for Corpus {}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    fn sample_entries() -> Vec<(FilePath, FixtureContent)> {
        vec![
            (
                FilePath::from("include/base.h"),
                FixtureContent::from("// base v1\n"),
            ),
            (
                FilePath::from("include/derived.h"),
                FixtureContent::from("// derived\n"),
            ),
            (
                FilePath::from("include/base.h"),
                FixtureContent::from("// base v2\n"),
            ),
        ]
    }

    #[test]
    fn test_resolve_returns_content() {
        let corpus = Corpus::from_fixtures(sample_entries());

        let fixture = corpus.resolve(&FilePath::from("include/derived.h")).unwrap();
        assert_eq!(fixture.content().as_bytes(), b"// derived\n");
        assert_eq!(fixture.ordinal(), 1);
    }

    #[test]
    fn test_resolve_last_definition_wins() {
        let corpus = Corpus::from_fixtures(sample_entries());

        let fixture = corpus.resolve(&FilePath::from("include/base.h")).unwrap();
        assert_eq!(fixture.content().as_bytes(), b"// base v2\n");
        assert_eq!(fixture.ordinal(), 2);
    }

    #[test]
    fn test_resolve_missing_path_is_not_found() {
        let corpus = Corpus::from_fixtures(sample_entries());

        let err = corpus
            .resolve(&FilePath::from("include/missing.h"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_variants_preserve_corpus_order() {
        let corpus = Corpus::from_fixtures(sample_entries());

        let variants = corpus.variants(&FilePath::from("include/base.h")).unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].content().as_bytes(), b"// base v1\n");
        assert_eq!(variants[0].ordinal(), 0);
        assert_eq!(variants[1].content().as_bytes(), b"// base v2\n");
        assert_eq!(variants[1].ordinal(), 2);
    }

    #[test]
    fn test_variants_missing_path_is_not_found() {
        let corpus = Corpus::from_fixtures(sample_entries());

        let err = corpus
            .variants(&FilePath::from("include/missing.h"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_contains() {
        let corpus = Corpus::from_fixtures(sample_entries());

        assert!(corpus.contains(&FilePath::from("include/base.h")));
        assert!(!corpus.contains(&FilePath::from("include/missing.h")));
    }

    #[test]
    fn test_paths_first_seen_order() {
        let corpus = Corpus::from_fixtures(sample_entries());

        let paths: Vec<_> = corpus.paths().cloned().collect();
        assert_eq!(
            paths,
            vec![
                FilePath::from("include/base.h"),
                FilePath::from("include/derived.h"),
            ]
        );
    }

    #[test]
    fn test_counts() {
        let corpus = Corpus::from_fixtures(sample_entries());

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.fixture_count(), 3);
        assert!(!corpus.is_empty());
        assert!(Corpus::default().is_empty());
    }

    #[test]
    fn test_construction_is_deterministic() {
        let first = Corpus::from_fixtures(sample_entries());
        let second = Corpus::from_fixtures(sample_entries());

        assert_eq!(first, second);
        let resolved_first = first.resolve(&FilePath::from("include/base.h")).unwrap();
        let resolved_second = second.resolve(&FilePath::from("include/base.h")).unwrap();
        assert_eq!(resolved_first, resolved_second);
    }

    #[test]
    fn test_order_matters_for_equality() {
        let reversed: Vec<_> = sample_entries().into_iter().rev().collect();
        let forward = Corpus::from_fixtures(sample_entries());
        let backward = Corpus::from_fixtures(reversed);

        assert_ne!(forward, backward);
        // Reversed input also flips which definition wins
        let fixture = backward.resolve(&FilePath::from("include/base.h")).unwrap();
        assert_eq!(fixture.content().as_bytes(), b"// base v1\n");
    }

    #[test]
    fn test_describe_summary() {
        let corpus = Corpus::from_fixtures(sample_entries());

        expect![[r#"
            include/base.h (11 bytes, 2 variants)
            include/derived.h (11 bytes)
        "#]]
        .assert_eq(&corpus.describe());
    }
}
