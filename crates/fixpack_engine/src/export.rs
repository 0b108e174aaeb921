//! Corpus export: materializing fixtures onto a filesystem.
//!
//! The external test harness reads fixtures from disk by path, so export
//! writes the resolved view of the corpus (one file per distinct path,
//! last definition wins) under a target directory. Written bytes are the
//! fixture bytes, untouched.

use std::io::Write as _;

use tracing::{debug, instrument, warn};

use fixpack_base::{FilePath, FixpackError, FixpackResult, PalHandle};

use crate::corpus::Corpus;

/// Results from exporting a corpus.
#[derive(Debug)]
pub struct ExportResult {
    /// Logical paths successfully written, in first-seen corpus order.
    pub written: Vec<FilePath>,
    /// Errors encountered while writing individual files (non-fatal).
    pub errors: Vec<ExportError>,
}

/// Error encountered while writing a specific fixture.
#[derive(Debug)]
pub struct ExportError {
    /// Logical path that failed to export.
    pub path: FilePath,
    /// The error that occurred.
    pub error: Box<FixpackError>,
}

/// Materialize the resolved corpus under `target`.
///
/// A pre-existing target directory is removed first, so afterwards the
/// tree under `target` is exactly the corpus: every distinct path, with
/// the bytes of its winning definition. Failures on individual files are
/// collected and the remaining files are still written.
#[instrument(skip(pal, corpus), fields(target = %target, paths = corpus.len()))]
pub fn export_corpus(
    pal: &PalHandle,
    corpus: &Corpus,
    target: &FilePath,
) -> FixpackResult<ExportResult> {
    if pal.file_exists(target)? {
        debug!("removing existing export target");
        pal.remove_directory_all(target)?;
    }
    pal.create_directory_all(target)?;

    let mut written = Vec::new();
    let mut errors = Vec::new();

    for path in corpus.paths() {
        match write_fixture(pal, corpus, target, path) {
            Ok(()) => written.push(path.clone()),
            Err(e) => {
                warn!("failed to export {}: {}", path, e);
                errors.push(ExportError {
                    path: path.clone(),
                    error: e,
                });
            }
        }
    }

    debug!(
        written = written.len(),
        errors_count = errors.len(),
        "corpus export complete"
    );

    Ok(ExportResult { written, errors })
}

fn write_fixture(
    pal: &PalHandle,
    corpus: &Corpus,
    target: &FilePath,
    path: &FilePath,
) -> FixpackResult<()> {
    let fixture = corpus.resolve(path)?;
    let destination = target.join(path);

    if let Some(parent) = destination.parent() {
        pal.create_directory_all(&parent)?;
    }

    let mut writer = pal.create_file(&destination)?;
    writer
        .write_all(fixture.content().as_bytes())
        .map_err(|e| {
            Box::new(FixpackError::new(fixpack_base::ErrorKind::FileError {
                path: destination.as_path().to_path_buf(),
                source: e,
            }))
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureContent;
    use fixpack_base::{MockPal, Pal};

    fn sample_corpus() -> Corpus {
        Corpus::from_fixtures(vec![
            (
                FilePath::from("test/workspace/include/base.h"),
                FixtureContent::from("// base v1\n"),
            ),
            (
                FilePath::from("test_workspace/include/derived.h"),
                FixtureContent::from("// derived\n"),
            ),
            (
                FilePath::from("test/workspace/include/base.h"),
                FixtureContent::from("// base v2\n"),
            ),
        ])
    }

    #[test]
    fn test_export_writes_resolved_corpus() {
        let mock = MockPal::new();
        let pal = PalHandle::new(mock.clone());
        let corpus = sample_corpus();

        let result = export_corpus(&pal, &corpus, &FilePath::from("out")).unwrap();

        assert!(result.errors.is_empty());
        assert_eq!(
            result.written,
            vec![
                FilePath::from("test/workspace/include/base.h"),
                FilePath::from("test_workspace/include/derived.h"),
            ]
        );

        // Duplicate path materializes as the last definition only
        let base = mock
            .read_file_to_bytes(&FilePath::from("out/test/workspace/include/base.h"))
            .unwrap();
        assert_eq!(base, b"// base v2\n");

        let derived = mock
            .read_file_to_bytes(&FilePath::from("out/test_workspace/include/derived.h"))
            .unwrap();
        assert_eq!(derived, b"// derived\n");
    }

    #[test]
    fn test_export_round_trip_byte_identical() {
        let mock = MockPal::new();
        let pal = PalHandle::new(mock.clone());
        let corpus = sample_corpus();

        export_corpus(&pal, &corpus, &FilePath::from("out")).unwrap();

        for path in corpus.paths() {
            let expected = corpus.resolve(path).unwrap().content().as_bytes().to_vec();
            let actual = mock
                .read_file_to_bytes(&FilePath::from("out").join(path))
                .unwrap();
            assert_eq!(actual, expected, "bytes differ for {}", path);
        }
    }

    #[test]
    fn test_export_replaces_existing_target() {
        let mock = MockPal::new();
        mock.add_file(FilePath::from("out/stale.h"), b"stale".to_vec());
        let pal = PalHandle::new(mock.clone());
        let corpus = sample_corpus();

        export_corpus(&pal, &corpus, &FilePath::from("out")).unwrap();

        // The stale file from the previous export is gone
        assert!(!mock.file_exists(&FilePath::from("out/stale.h")).unwrap());
        assert_eq!(
            mock.file_paths(),
            vec![
                FilePath::from("out/test/workspace/include/base.h"),
                FilePath::from("out/test_workspace/include/derived.h"),
            ]
        );
    }

    #[test]
    fn test_export_empty_corpus() {
        let mock = MockPal::new();
        let pal = PalHandle::new(mock);
        let corpus = Corpus::default();

        let result = export_corpus(&pal, &corpus, &FilePath::from("out")).unwrap();

        assert!(result.written.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_export_is_idempotent() {
        let mock = MockPal::new();
        let pal = PalHandle::new(mock.clone());
        let corpus = sample_corpus();

        let first = export_corpus(&pal, &corpus, &FilePath::from("out")).unwrap();
        let second = export_corpus(&pal, &corpus, &FilePath::from("out")).unwrap();

        assert_eq!(first.written, second.written);
        let base = mock
            .read_file_to_bytes(&FilePath::from("out/test/workspace/include/base.h"))
            .unwrap();
        assert_eq!(base, b"// base v2\n");
    }
}
