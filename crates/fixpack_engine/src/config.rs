use serde::Deserialize;

use fixpack_base::{FilePath, FixpackResult, PalHandle, ResultExt, err};

/// Configuration for a fixture corpus.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Human-readable name of the corpus.
    pub title: String,
    /// Directories scanned for fixture files.
    #[serde(default)]
    pub directory: Vec<DirectoryConfig>,
    /// Explicit corpus entries, appended after scanned files.
    #[serde(default)]
    pub fixture: Vec<FixtureEntry>,
}

/// A set of directories scanned with shared glob patterns.
///
/// The logical path of each scanned fixture is its path relative to the
/// scanned root, so files under `corpus/test/workspace/` are served as
/// `test/workspace/...`.
#[derive(Debug, Deserialize)]
pub struct DirectoryConfig {
    /// Roots to scan.
    pub paths: Vec<String>,
    /// Glob patterns for files under each root (e.g. `"**/*.h"`).
    pub globs: Vec<String>,
}

/// An explicit corpus entry mapping a logical path to a source file.
///
/// Entries are appended in declaration order after all scanned files,
/// which is how a duplicate logical path enters a corpus deliberately.
#[derive(Debug, Deserialize)]
pub struct FixtureEntry {
    /// Logical fixture path the content is served under.
    pub path: String,
    /// File the content is read from.
    pub file: String,
}

/// Load and parse a TOML configuration file through the PAL.
pub fn load_config(pal: &PalHandle, path: &FilePath) -> FixpackResult<Config> {
    let raw = pal
        .read_file_to_string(path)
        .with_context(|| format!("failed to read config {}", path))?;
    toml::from_str(&raw).map_err(|e| err!("Invalid config {}: {}", path, e))
}
