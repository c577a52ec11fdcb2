//! File-manager error type.
//!
//! One error type covers every fallible file-manager operation. The memory
//! decorator itself raises none of these: they originate in the wrapped real
//! manager and travel through [`MemoryFileManager`](crate::MemoryFileManager)
//! unchanged.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for file-manager operations.
pub type FileResult<T> = Result<T, FileError>;

/// Error type for file-manager operations.
///
/// # Example
///
/// ```ignore
/// match manager.read(Scope::SourcePath, "Missing.java") {
///     Err(FileError::NotFound(path)) => eprintln!("no such unit: {}", path.display()),
///     Err(e) => eprintln!("{e}"),
///     Ok(bytes) => { /* ... */ }
/// }
/// ```
#[derive(Debug, Error)]
pub enum FileError {
    /// A file was not found at this path.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A file could not be accessed.
    #[error("access denied: {}", .0.display())]
    AccessDenied(PathBuf),

    /// A directory was found when a file was expected.
    #[error("is a directory: {}", .0.display())]
    IsDirectory(PathBuf),

    /// The file contents are not valid UTF-8.
    #[error("file is not valid UTF-8")]
    InvalidUtf8,

    /// Another I/O error.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// The path the operation failed on.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl FileError {
    /// Map an [`io::Error`] to the matching variant for `path`.
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::AccessDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_not_found() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            FileError::from_io(err, Path::new("/x")),
            FileError::NotFound(_)
        ));
    }

    #[test]
    fn test_from_io_permission_denied() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(
            FileError::from_io(err, Path::new("/x")),
            FileError::AccessDenied(_)
        ));
    }

    #[test]
    fn test_from_io_other() {
        let err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe");
        let mapped = FileError::from_io(err, Path::new("/x"));
        assert!(matches!(mapped, FileError::Io { .. }));
    }
}
