//! The corpus shipped with this repository, embedded at compile time.
//!
//! These are the cmantic editor-tooling test headers. They are embedded
//! with `include_str!` straight from `corpus/`, so the served bytes are
//! the committed bytes and library consumers need no filesystem access.
//! The C++ declarations inside are inert data, preserved exactly.

use fixpack_base::FilePath;

use crate::corpus::Corpus;
use crate::fixture::FixtureContent;

/// Logical paths and contents of the shipped headers, in corpus order.
const BUILTIN_FIXTURES: &[(&str, &str)] = &[
    (
        "test/workspace/include/base.h",
        include_str!("../../../corpus/test/workspace/include/base.h"),
    ),
    (
        "test/workspace/include/derived.h",
        include_str!("../../../corpus/test/workspace/include/derived.h"),
    ),
    (
        "test/workspace/include/some_header.h",
        include_str!("../../../corpus/test/workspace/include/some_header.h"),
    ),
    (
        "test_workspace/include/derived.h",
        include_str!("../../../corpus/test_workspace/include/derived.h"),
    ),
    (
        "test_workspace/include/some_header.h",
        include_str!("../../../corpus/test_workspace/include/some_header.h"),
    ),
];

/// Build the shipped corpus.
///
/// The two workspace trees define `derived.h` and `some_header.h` with
/// different bodies at different paths, so all five entries are distinct
/// paths and resolution never falls back to overwrite semantics here.
pub fn builtin_corpus() -> Corpus {
    Corpus::from_fixtures(
        BUILTIN_FIXTURES
            .iter()
            .map(|(path, content)| (FilePath::from(*path), FixtureContent::from(*content)))
            .collect(),
    )
}
