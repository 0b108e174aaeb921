use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read, Write};
use std::sync::Arc;
use std::sync::Mutex;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::FixpackError;
use crate::FixpackResult;
use crate::error::ErrorKind;

use super::FilePath;
use super::traits::Pal;

/// In-memory PAL implementation for testing.
///
/// Stores file contents in a HashMap and supports all Pal operations
/// without touching the real filesystem, so corpus pipeline tests stay
/// deterministic and side-effect free.
///
/// # Examples
///
/// ```
/// use fixpack_base::{MockPal, Pal, FilePath};
///
/// let mock = MockPal::new();
/// mock.add_file(FilePath::from("include/base.h"), b"#pragma once".to_vec());
/// let content = mock.read_file_to_bytes(&FilePath::from("include/base.h")).unwrap();
/// assert_eq!(content, b"#pragma once");
/// ```
#[derive(Debug, Clone)]
pub struct MockPal {
    files: Arc<Mutex<HashMap<FilePath, Vec<u8>>>>,
    directories: Arc<Mutex<HashSet<FilePath>>>,
}

impl MockPal {
    /// Create a new empty MockPal.
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            directories: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Add a file to the mock storage.
    pub fn add_file(&self, path: FilePath, content: Vec<u8>) {
        self.files.lock().unwrap().insert(path, content);
    }

    /// Add a directory to the mock storage.
    pub fn add_directory(&self, path: FilePath) {
        self.directories.lock().unwrap().insert(path);
    }

    /// List the paths of all stored files, sorted.
    pub fn file_paths(&self) -> Vec<FilePath> {
        let mut paths: Vec<FilePath> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }

    fn build_glob_set(globs: &[String]) -> FixpackResult<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for glob in globs {
            let compiled = GlobBuilder::new(glob).build().map_err(|e| {
                Box::new(FixpackError::message(format!(
                    "Invalid glob pattern '{}': {}",
                    glob, e
                )))
            })?;
            builder.add(compiled);
        }
        builder.build().map_err(|e| {
            Box::new(FixpackError::message(format!(
                "Failed to build glob set: {}",
                e
            )))
        })
    }

    /// Get all files under `root` whose root-relative path matches the globs.
    fn get_matching_files(&self, root: &FilePath, globs: &[String]) -> FixpackResult<Vec<FilePath>> {
        let glob_set = Self::build_glob_set(globs)?;

        let files = self.files.lock().unwrap();
        let walk_all = root.as_relative().as_str() == "." || root.as_relative().as_str().is_empty();
        let mut matches: Vec<FilePath> = files
            .keys()
            .filter(|path| {
                let relative = if walk_all {
                    Some((*path).clone())
                } else {
                    path.strip_prefix(root)
                };
                match relative {
                    Some(rel) => glob_set.is_match(rel.as_path()),
                    None => false,
                }
            })
            .cloned()
            .collect();
        matches.sort();
        Ok(matches)
    }
}

impl Default for MockPal {
    fn default() -> Self {
        Self::new()
    }
}

impl Pal for MockPal {
    fn file_exists(&self, path: &FilePath) -> FixpackResult<bool> {
        let files = self.files.lock().unwrap();
        if files.contains_key(path) {
            return Ok(true);
        }
        let directories = self.directories.lock().unwrap();
        Ok(directories.contains(path) || files.keys().any(|f| f.starts_with(path)))
    }

    fn read_file(&self, path: &FilePath) -> FixpackResult<Box<dyn Read + 'static>> {
        let files = self.files.lock().unwrap();
        let content = files
            .get(path)
            .ok_or_else(|| {
                Box::new(FixpackError::new(ErrorKind::FileError {
                    path: path.as_path().to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("File not found: {}", path),
                    ),
                }))
            })?
            .clone();
        Ok(Box::new(Cursor::new(content)))
    }

    fn create_file(&self, path: &FilePath) -> FixpackResult<Box<dyn Write>> {
        // Return a writer that stores into the mock storage when dropped
        Ok(Box::new(MockFileWriter {
            path: path.clone(),
            files: Arc::clone(&self.files),
            buffer: Vec::new(),
        }))
    }

    fn create_directory_all(&self, path: &FilePath) -> FixpackResult<()> {
        self.directories.lock().unwrap().insert(path.clone());
        Ok(())
    }

    fn remove_directory_all(&self, path: &FilePath) -> FixpackResult<()> {
        let mut directories = self.directories.lock().unwrap();
        directories.remove(path);
        directories.retain(|dir| !dir.starts_with(path));
        let mut files = self.files.lock().unwrap();
        files.retain(|file, _| !file.starts_with(path));
        Ok(())
    }

    fn walk_directory(
        &self,
        path: &FilePath,
        globs: &[String],
    ) -> FixpackResult<Box<dyn Iterator<Item = FixpackResult<FilePath>> + '_>> {
        let matching_files = self.get_matching_files(path, globs)?;
        let iter = matching_files.into_iter().map(Ok);
        Ok(Box::new(iter))
    }
}

/// Helper struct for writing files to MockPal.
struct MockFileWriter {
    path: FilePath,
    files: Arc<Mutex<HashMap<FilePath, Vec<u8>>>>,
    buffer: Vec<u8>,
}

impl Write for MockFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Drop for MockFileWriter {
    fn drop(&mut self) {
        self.files
            .lock()
            .unwrap()
            .insert(self.path.clone(), self.buffer.clone());
    }
}
