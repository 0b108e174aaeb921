use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::{FixpackError, FixpackResult, error::ErrorKind};

use super::FilePath;
use super::traits::Pal;

/// Concrete PAL implementation using the real filesystem via std::fs.
///
/// All file paths are resolved relative to a configured base directory,
/// ensuring operations stay within intended boundaries. Filesystem access
/// is synchronous; the corpus pipeline has no need for async IO.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    /// Create a new RealPal with the given base directory.
    ///
    /// # Arguments
    /// * `base_dir` - All paths will be resolved relative to this directory
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolve a FilePath to an absolute filesystem path.
    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        self.base_dir.join(path.as_path())
    }

    /// Build a GlobSet from the given glob patterns.
    #[instrument(skip(self))]
    fn build_glob_set(&self, globs: &[String]) -> FixpackResult<GlobSet> {
        debug!("compiling {} glob patterns", globs.len());
        let mut builder = GlobSetBuilder::new();
        for (idx, glob) in globs.iter().enumerate() {
            let compiled = GlobBuilder::new(glob).build().map_err(|e| {
                debug!(index = idx, pattern = %glob, error = %e, "failed to compile glob pattern");
                Box::new(FixpackError::message(format!(
                    "Invalid glob pattern '{}': {}",
                    glob, e
                )))
            })?;
            builder.add(compiled);
        }
        let glob_set = builder.build().map_err(|e| {
            debug!(error = %e, "failed to build glob set");
            Box::new(FixpackError::message(format!(
                "Failed to build glob set: {}",
                e
            )))
        })?;
        debug!("glob set compiled successfully");
        Ok(glob_set)
    }
}

impl Pal for RealPal {
    #[instrument(skip(self), fields(path = %path))]
    fn file_exists(&self, path: &FilePath) -> FixpackResult<bool> {
        let resolved = self.resolve_path(path);
        let exists = resolved.exists();
        debug!(exists, resolved = %resolved.display(), "checked file existence");
        Ok(exists)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_file(&self, path: &FilePath) -> FixpackResult<Box<dyn Read + 'static>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "opening file for reading");
        let file = fs::File::open(&resolved).map_err(|e| {
            debug!(error = %e, "failed to open file");
            Box::new(FixpackError::new(ErrorKind::FileError {
                path: resolved,
                source: e,
            }))
        })?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn create_file(&self, path: &FilePath) -> FixpackResult<Box<dyn Write>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "creating file");
        let file = fs::File::create(&resolved).map_err(|e| {
            debug!(error = %e, "failed to create file");
            Box::new(FixpackError::new(ErrorKind::FileError {
                path: resolved,
                source: e,
            }))
        })?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn create_directory_all(&self, path: &FilePath) -> FixpackResult<()> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "creating directory and parents");
        fs::create_dir_all(&resolved).map_err(|e| {
            debug!(error = %e, "failed to create directory");
            Box::new(FixpackError::new(ErrorKind::FileError {
                path: resolved,
                source: e,
            }))
        })?;
        Ok(())
    }

    #[instrument(skip(self), fields(path = %path))]
    fn remove_directory_all(&self, path: &FilePath) -> FixpackResult<()> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "removing directory and contents");
        fs::remove_dir_all(&resolved).map_err(|e| {
            debug!(error = %e, "failed to remove directory");
            Box::new(FixpackError::new(ErrorKind::FileError {
                path: resolved,
                source: e,
            }))
        })?;
        Ok(())
    }

    #[instrument(skip(self), fields(path = %path, globs = ?globs))]
    fn walk_directory(
        &self,
        path: &FilePath,
        globs: &[String],
    ) -> FixpackResult<Box<dyn Iterator<Item = FixpackResult<FilePath>> + '_>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "starting directory walk");

        if !resolved.exists() {
            debug!("directory not found");
            return Err(Box::new(FixpackError::new(ErrorKind::FileError {
                path: resolved,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "directory not found"),
            })));
        }

        let glob_set = self.build_glob_set(globs)?;

        // Iterator that yields glob matches as base-relative paths
        let base_path = path.clone();
        let iter = WalkDir::new(&resolved)
            .into_iter()
            .filter_map(move |entry| {
                match entry {
                    Ok(e) => {
                        if !e.file_type().is_file() {
                            return None;
                        }
                        // Convert to relative path for glob matching
                        if let Ok(relative) = e.path().strip_prefix(&resolved) {
                            if glob_set.is_match(relative) {
                                // Prepend the walk root to get the full relative path
                                let full_relative = base_path.as_path().join(relative);
                                Some(Ok(FilePath::from(full_relative.to_string_lossy().as_ref())))
                            } else {
                                None
                            }
                        } else {
                            None
                        }
                    }
                    Err(e) => {
                        debug!(error = %e, "error walking directory");
                        Some(Err(Box::new(FixpackError::new(ErrorKind::FileError {
                            path: e
                                .path()
                                .map(|p| p.to_path_buf())
                                .unwrap_or_else(|| PathBuf::from("unknown")),
                            source: std::io::Error::other(e.to_string()),
                        }))))
                    }
                }
            });

        Ok(Box::new(iter))
    }
}
