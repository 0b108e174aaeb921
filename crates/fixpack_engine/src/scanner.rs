//! File discovery for the corpus pipeline.
//!
//! The scanner only finds fixture files; reading their bytes is the
//! loader's job. Scanning is fail-tolerant: a misconfigured directory
//! does not block scanning of the others, and its error is reported
//! alongside the results.

use tracing::{debug, instrument, warn};

use fixpack_base::{FilePath, FixpackError, FixpackResult, PalHandle};

use super::Config;

/// A discovered fixture file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Path the fixture is served under: the source path relative to its
    /// scanned root.
    pub logical: FilePath,
    /// Path the content will be read from, including the root prefix.
    pub source: FilePath,
}

/// Results from scanning directories, including matched files and any
/// errors encountered.
///
/// Files are sorted by source path so corpus order is stable across
/// platforms and repeated runs.
#[derive(Debug)]
pub struct ScanResult {
    /// Files found during the scan.
    pub files: Vec<ScannedFile>,
    /// Errors encountered during the scan (non-fatal).
    pub errors: Vec<ScanError>,
}

/// Error encountered while scanning a specific directory.
#[derive(Debug)]
pub struct ScanError {
    /// The directory path that was being scanned when the error occurred.
    pub directory_path: String,
    /// The error that occurred.
    pub error: Box<FixpackError>,
}

/// Scan for fixture files matching the configured glob patterns.
///
/// Walks each directory in the configuration through the PAL and returns
/// all matching files with their logical (root-relative) paths. If
/// scanning a directory fails, the error is collected and scanning
/// continues with the remaining directories.
///
/// # Examples
/// ```no_run
/// use fixpack_base::{RealPal, PalHandle, FilePath};
/// use fixpack_engine::{load_config, scan_files};
///
/// let pal = PalHandle::new(RealPal::new(".".into()));
/// let config = load_config(&pal, &FilePath::from("fixpack.toml")).unwrap();
/// let result = scan_files(&pal, &config).unwrap();
///
/// println!("Found {} files", result.files.len());
/// if !result.errors.is_empty() {
///     println!("Encountered {} errors", result.errors.len());
/// }
/// ```
#[instrument(skip(pal, config), fields(directory_count = config.directory.len()))]
pub fn scan_files(pal: &PalHandle, config: &Config) -> FixpackResult<ScanResult> {
    debug!("starting fixture scan");

    let mut files = Vec::new();
    let mut errors = Vec::new();

    for dir_config in &config.directory {
        for path_str in &dir_config.paths {
            let root = FilePath::from(path_str.as_str());

            match pal.walk_directory(&root, &dir_config.globs) {
                Ok(iter) => {
                    for result in iter {
                        match result {
                            Ok(source) => {
                                // Serve the file under its root-relative path
                                let logical = source
                                    .strip_prefix(&root)
                                    .unwrap_or_else(|| source.clone());
                                files.push(ScannedFile { logical, source });
                            }
                            Err(e) => {
                                warn!("error walking file: {}", e);
                                errors.push(ScanError {
                                    directory_path: path_str.clone(),
                                    error: e,
                                });
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!("error walking directory '{}': {}", path_str, e);
                    errors.push(ScanError {
                        directory_path: path_str.clone(),
                        error: e,
                    });
                }
            }
        }
    }

    // Directory walk order is platform-dependent; sort so corpus order
    // is reproducible
    files.sort_by(|a, b| a.source.cmp(&b.source));

    debug!(
        files_found = files.len(),
        errors_count = errors.len(),
        "fixture scan complete"
    );

    Ok(ScanResult { files, errors })
}
