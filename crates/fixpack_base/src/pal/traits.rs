use std::io::{Read, Write};
use std::sync::Arc;

use crate::FixpackResult;

use super::file_path::FilePath;

/// Platform Abstraction Layer (PAL) trait providing filesystem operations.
///
/// Implement this trait to provide custom filesystem behavior. Two
/// implementations are provided:
/// - `RealPal`: Uses the real filesystem via `std::fs`
/// - `MockPal`: In-memory implementation for testing
pub trait Pal: std::fmt::Debug + Send + Sync + 'static {
    /// Check if a file or directory exists at the given path.
    fn file_exists(&self, path: &FilePath) -> FixpackResult<bool>;

    /// Open a file for reading.
    fn read_file(&self, path: &FilePath) -> FixpackResult<Box<dyn Read + 'static>>;

    /// Read entire file contents as raw bytes.
    ///
    /// Convenience method with a default implementation. Fixture contents
    /// are opaque bytes, so this is the primary read path for corpus data.
    fn read_file_to_bytes(&self, path: &FilePath) -> FixpackResult<Vec<u8>> {
        let mut reader = self.read_file(path)?;
        let mut contents = Vec::new();
        reader.read_to_end(&mut contents).map_err(|e| {
            Box::new(crate::FixpackError::new(crate::error::ErrorKind::FileError {
                path: path.as_path().to_path_buf(),
                source: e,
            }))
        })?;
        Ok(contents)
    }

    /// Read entire file contents as a UTF-8 string.
    ///
    /// Used for configuration files; corpus contents go through
    /// [`Pal::read_file_to_bytes`] instead since they are not required to
    /// be valid UTF-8.
    fn read_file_to_string(&self, path: &FilePath) -> FixpackResult<String> {
        let contents = self.read_file_to_bytes(path)?;
        String::from_utf8(contents).map_err(|_e| crate::err!("File is not valid UTF-8: {}", path))
    }

    /// Create a new file, overwriting if it exists.
    fn create_file(&self, path: &FilePath) -> FixpackResult<Box<dyn Write>>;

    /// Create a directory and all parent directories.
    fn create_directory_all(&self, path: &FilePath) -> FixpackResult<()>;

    /// Remove a directory and all its contents.
    fn remove_directory_all(&self, path: &FilePath) -> FixpackResult<()>;

    /// Walk a directory tree, yielding paths matching the given glob patterns.
    ///
    /// # Arguments
    /// * `path` - Directory to walk
    /// * `globs` - Glob patterns matched against paths relative to `path`
    ///   (e.g., `["**/*.h"]`)
    ///
    /// Returns an iterator of FilePath results, each including the `path`
    /// prefix, that match any of the patterns.
    fn walk_directory(
        &self,
        path: &FilePath,
        globs: &[String],
    ) -> FixpackResult<Box<dyn Iterator<Item = FixpackResult<FilePath>> + '_>>;
}

/// Handle to a PAL implementation, enabling shared ownership.
///
/// Internally wraps `Arc<dyn Pal>` for cheap cloning and thread-safe
/// sharing. Can be cloned and passed around freely without lifetime
/// concerns.
///
/// # Examples
///
/// ```no_run
/// use fixpack_base::{RealPal, PalHandle};
///
/// let pal = PalHandle::new(RealPal::new(".".into()));
/// let pal_clone = pal.clone(); // Cheap clone, shares the same implementation
/// ```
#[derive(Debug, Clone)]
pub struct PalHandle(Arc<dyn Pal>);

impl PalHandle {
    /// Create a new PalHandle from a Pal implementation.
    pub fn new(pal: impl Pal + 'static) -> Self {
        Self(Arc::new(pal))
    }
}

impl std::ops::Deref for PalHandle {
    type Target = dyn Pal;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
