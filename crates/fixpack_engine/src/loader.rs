//! Corpus loading: turning discovered files into an in-memory corpus.
//!
//! The loader reads raw bytes through the PAL and never inspects them;
//! whatever is on disk is what `get` must later return. Loading is
//! fail-tolerant per file, and the resulting corpus order is fully
//! determined by the (sorted) scan result followed by the explicit
//! config entries, so loading the same tree twice yields equal corpora.

use tracing::{debug, instrument, warn};

use fixpack_base::{FilePath, FixpackError, FixpackResult, PalHandle};

use crate::config::Config;
use crate::corpus::Corpus;
use crate::fixture::FixtureContent;
use crate::scanner::ScanResult;

/// Results from loading fixture contents.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded corpus.
    pub corpus: Corpus,
    /// Errors encountered while reading individual files (non-fatal).
    pub errors: Vec<LoadError>,
}

/// Error encountered while reading a specific fixture file.
#[derive(Debug)]
pub struct LoadError {
    /// Source file that failed to load.
    pub path: FilePath,
    /// The error that occurred.
    pub error: Box<FixpackError>,
}

/// Read every scanned file and every explicit `[[fixture]]` entry into a
/// corpus.
///
/// Scanned files come first, then explicit entries in declaration order;
/// a later entry for an already-defined logical path becomes the winning
/// definition. A file that fails to read is collected into
/// `LoadResult::errors` and loading continues.
#[instrument(skip(pal, scan, config), fields(file_count = scan.files.len()))]
pub fn load_fixtures(
    pal: &PalHandle,
    scan: &ScanResult,
    config: &Config,
) -> FixpackResult<LoadResult> {
    let mut entries: Vec<(FilePath, FixtureContent)> = Vec::new();
    let mut errors = Vec::new();

    for file in &scan.files {
        match pal.read_file_to_bytes(&file.source) {
            Ok(bytes) => {
                entries.push((file.logical.clone(), FixtureContent::from(bytes)));
            }
            Err(e) => {
                warn!("failed to read {}: {}", file.source, e);
                errors.push(LoadError {
                    path: file.source.clone(),
                    error: e,
                });
            }
        }
    }

    for entry in &config.fixture {
        let source = FilePath::from(entry.file.as_str());
        match pal.read_file_to_bytes(&source) {
            Ok(bytes) => {
                entries.push((
                    FilePath::from(entry.path.as_str()),
                    FixtureContent::from(bytes),
                ));
            }
            Err(e) => {
                warn!("failed to read fixture entry {}: {}", source, e);
                errors.push(LoadError {
                    path: source,
                    error: e,
                });
            }
        }
    }

    let corpus = Corpus::from_fixtures(entries);

    debug!(
        paths = corpus.len(),
        fixtures = corpus.fixture_count(),
        errors_count = errors.len(),
        "corpus load complete"
    );

    Ok(LoadResult { corpus, errors })
}
