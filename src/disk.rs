//! A real file manager rooted at a directory.
//!
//! [`DiskManager`] is the delegation target a [`MemoryFileManager`] wraps
//! when the compiler also needs genuinely on-disk inputs: classpath entries,
//! resources, platform units. All resolution is confined to the root
//! directory; names that would escape it are refused.
//!
//! [`MemoryFileManager`]: crate::MemoryFileManager

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use crate::error::{FileError, FileResult};
use crate::manager::{FileKind, FileManager, Scope};
use crate::output::OutputFile;
use crate::uri::{UnitUri, synthesize};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`). Falls back
/// to the path as-is if absolute, or joined with the current directory if
/// relative.
#[inline]
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Decode bytes as UTF-8 source text, stripping a BOM if present.
pub fn decode_utf8(buf: &[u8]) -> FileResult<&str> {
    let buf = buf.strip_prefix(b"\xef\xbb\xbf").unwrap_or(buf);
    std::str::from_utf8(buf).map_err(|_| FileError::InvalidUtf8)
}

// =============================================================================
// DiskManager
// =============================================================================

/// A file manager backed by a real directory tree.
///
/// Unit names resolve root-relatively: dotted logical names map to nested
/// directories (`"com.example.Hello"` + artifact kind →
/// `root/com/example/Hello.class`), names already carrying a recognized
/// suffix are taken as paths.
#[derive(Debug, Clone)]
pub struct DiskManager {
    root: PathBuf,
}

impl DiskManager {
    /// Create a manager rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: normalize_path(root.as_ref()),
        }
    }

    /// The root directory all names resolve under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a name to a path under the root.
    ///
    /// Absolute names and names traversing out of the root are refused.
    fn resolve(&self, name: &str) -> FileResult<PathBuf> {
        let rel = Path::new(name);
        let escapes = rel.is_absolute()
            || rel
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
        if escapes {
            return Err(FileError::AccessDenied(rel.to_path_buf()));
        }
        Ok(self.root.join(rel))
    }

    /// Map a unit name and kind to a root-relative file path.
    ///
    /// A name already carrying the kind's suffix (or any `/`) is used as a
    /// path; a dotted logical name becomes nested directories plus the
    /// kind's suffix.
    fn unit_path(name: &str, kind: FileKind) -> String {
        if name.contains('/') {
            return name.to_string();
        }
        match kind.ext() {
            Some(ext) if name.ends_with(ext) => name.to_string(),
            Some(ext) => format!("{}{ext}", name.replace('.', "/")),
            None => name.to_string(),
        }
    }
}

impl FileManager for DiskManager {
    fn file_for_output(
        &mut self,
        _scope: Scope,
        name: &str,
        kind: FileKind,
        _sibling: Option<&UnitUri>,
    ) -> FileResult<Box<dyn OutputFile>> {
        let path = self.resolve(&Self::unit_path(name, kind))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| FileError::from_io(e, parent))?;
        }
        let file = File::create(&path).map_err(|e| FileError::from_io(e, &path))?;
        Ok(Box::new(DiskFile {
            name: name.to_string(),
            uri: synthesize(path.to_str().unwrap_or(name)),
            path,
            file,
        }))
    }

    fn read(&self, _scope: Scope, name: &str) -> FileResult<Vec<u8>> {
        let path = self.resolve(name)?;
        let map_err = |e| FileError::from_io(e, &path);
        let meta = fs::metadata(&path).map_err(map_err)?;
        if meta.is_dir() {
            return Err(FileError::IsDirectory(path));
        }
        fs::read(&path).map_err(map_err)
    }

    fn exists(&self, _scope: Scope, name: &str) -> bool {
        self.resolve(name).is_ok_and(|path| path.exists())
    }

    fn list(&self, _scope: Scope, prefix: &str) -> FileResult<Vec<String>> {
        let dir = self.resolve(prefix)?;
        let entries = fs::read_dir(&dir).map_err(|e| FileError::from_io(e, &dir))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FileError::from_io(e, &dir))?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn flush(&mut self) -> FileResult<()> {
        Ok(())
    }

    fn close(&mut self) -> FileResult<()> {
        Ok(())
    }
}

// =============================================================================
// DiskFile
// =============================================================================

/// An output handle backed by a real file.
#[derive(Debug)]
struct DiskFile {
    name: String,
    uri: UnitUri,
    path: PathBuf,
    file: File,
}

impl Write for DiskFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl OutputFile for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn uri(&self) -> &UnitUri {
        &self.uri
    }

    fn close(mut self: Box<Self>) -> FileResult<()> {
        self.file
            .flush()
            .map_err(|e| FileError::from_io(e, &self.path))
    }
}
