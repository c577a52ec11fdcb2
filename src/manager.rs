//! The file-manager capability and its in-memory decorator.
//!
//! [`FileManager`] is the seam between this crate and the compiler
//! toolchain: the compiler asks a file manager for output handles and input
//! lookups, never touching paths directly. [`MemoryFileManager`] implements
//! the capability as a decorator around a real manager:
//!
//! ```text
//! MemoryFileManager<M>
//! ├── file_for_output(.., Artifact, ..) → ArtifactSink   (never consults M)
//! ├── file_for_output(.., other, ..)    → M              (verbatim)
//! ├── read / exists / list / infer_kind → M              (verbatim)
//! ├── flush()                           → no-op          (commits happen at sink close)
//! └── close()                           → clear store, then M::close()
//! ```
//!
//! One instance serves one compilation pass over one batch of units. Create
//! a fresh instance per pass rather than sharing one across concurrent
//! passes; creation is cheap.

use rustc_hash::FxHashMap;

use crate::error::{FileError, FileResult};
use crate::output::{ArtifactSink, OutputFile};
use crate::source::SourceFile;
use crate::store::{ArtifactBytes, ArtifactStore};
use crate::uri::{ARTIFACT_EXT, SOURCE_EXT, UnitUri};

// =============================================================================
// Scope and FileKind
// =============================================================================

/// The location scope a file-manager request addresses.
///
/// This core never interprets the scope; it forwards it verbatim to the
/// wrapped manager for every non-artifact request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Compiled-output location.
    Output,
    /// Source units under compilation.
    SourcePath,
    /// Previously compiled dependencies.
    ClassPath,
    /// Toolchain-provided platform units.
    Platform,
}

/// What kind of file a request refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Source text of a compilation unit.
    Source,
    /// Compiled output bytes for a unit.
    Artifact,
    /// Anything else (resources, metadata).
    Other,
}

impl FileKind {
    /// The file suffix conventionally carrying this kind, if any.
    pub fn ext(self) -> Option<&'static str> {
        match self {
            Self::Source => Some(SOURCE_EXT),
            Self::Artifact => Some(ARTIFACT_EXT),
            Self::Other => None,
        }
    }

    /// Infer the kind of a unit name from its suffix.
    pub fn infer(name: &str) -> Self {
        if name.ends_with(SOURCE_EXT) {
            Self::Source
        } else if name.ends_with(ARTIFACT_EXT) {
            Self::Artifact
        } else {
            Self::Other
        }
    }
}

// =============================================================================
// FileManager capability
// =============================================================================

/// The file-manager capability a compiler toolchain programs against.
///
/// A real implementation resolves these operations on disk (see
/// [`DiskManager`](crate::DiskManager)); [`MemoryFileManager`] wraps any
/// implementation and intercepts artifact output. Errors an implementation
/// raises pass through decorators unchanged.
pub trait FileManager {
    /// Open a file for output.
    ///
    /// `sibling` is the unit this output relates to (its source, typically),
    /// for managers that co-locate outputs; implementations may ignore it.
    fn file_for_output(
        &mut self,
        scope: Scope,
        name: &str,
        kind: FileKind,
        sibling: Option<&UnitUri>,
    ) -> FileResult<Box<dyn OutputFile>>;

    /// Read a unit's bytes for input.
    fn read(&self, scope: Scope, name: &str) -> FileResult<Vec<u8>>;

    /// Whether a unit exists under `scope`.
    fn exists(&self, scope: Scope, name: &str) -> bool;

    /// List the unit names directly under `prefix`.
    fn list(&self, scope: Scope, prefix: &str) -> FileResult<Vec<String>>;

    /// Infer the kind of a unit name.
    fn infer_kind(&self, name: &str) -> FileKind {
        FileKind::infer(name)
    }

    /// Persist any buffered state.
    fn flush(&mut self) -> FileResult<()>;

    /// Release resources held by this manager.
    fn close(&mut self) -> FileResult<()>;
}

// =============================================================================
// MemoryFileManager
// =============================================================================

/// A file manager that keeps compiled artifacts in memory.
///
/// Wraps a real manager `M` and overrides exactly one behavior: requests to
/// open compiled output return in-memory sinks whose bytes land in this
/// instance's [`ArtifactStore`] when the compiler closes them. Everything
/// else (locating platform units, classpath entries, resources) delegates
/// to `M` unchanged.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use memfm::{FileKind, FileManager, MemoryFileManager, NoopManager, OutputFile, Scope};
///
/// let mut fm = MemoryFileManager::new(NoopManager);
/// let unit = fm.make_source_unit("Hello.java", "class Hello {}");
///
/// // ... hand `unit` and `fm` to the compiler; it emits output like so:
/// let mut out = fm
///     .file_for_output(Scope::Output, "Hello", FileKind::Artifact, Some(unit.uri()))
///     .unwrap();
/// out.write_all(&[0xCA, 0xFE, 0xBA, 0xBE]).unwrap();
/// out.close().unwrap();
///
/// assert_eq!(fm.artifacts()["Hello"].as_ref(), &[0xCA, 0xFE, 0xBA, 0xBE]);
/// ```
#[derive(Debug)]
pub struct MemoryFileManager<M> {
    inner: M,
    store: ArtifactStore,
}

impl<M: FileManager> MemoryFileManager<M> {
    /// Wrap a real file manager.
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            store: ArtifactStore::new(),
        }
    }

    /// Create a source unit to hand to the compiler.
    ///
    /// Entry point for the invocation layer: pair each unit name with its
    /// text before invoking the compiler with this manager.
    pub fn make_source_unit(
        &self,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> SourceFile {
        SourceFile::new(name, text)
    }

    /// Snapshot of the compiled artifacts committed so far.
    pub fn artifacts(&self) -> FxHashMap<String, ArtifactBytes> {
        self.store.snapshot()
    }

    /// The artifact store this manager owns.
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// The wrapped real manager.
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Unwrap, discarding the artifact store.
    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: FileManager> FileManager for MemoryFileManager<M> {
    fn file_for_output(
        &mut self,
        scope: Scope,
        name: &str,
        kind: FileKind,
        sibling: Option<&UnitUri>,
    ) -> FileResult<Box<dyn OutputFile>> {
        if kind == FileKind::Artifact {
            return Ok(Box::new(ArtifactSink::open(name, self.store.clone())));
        }
        self.inner.file_for_output(scope, name, kind, sibling)
    }

    fn read(&self, scope: Scope, name: &str) -> FileResult<Vec<u8>> {
        self.inner.read(scope, name)
    }

    fn exists(&self, scope: Scope, name: &str) -> bool {
        self.inner.exists(scope, name)
    }

    fn list(&self, scope: Scope, prefix: &str) -> FileResult<Vec<String>> {
        self.inner.list(scope, prefix)
    }

    fn infer_kind(&self, name: &str) -> FileKind {
        self.inner.infer_kind(name)
    }

    // Nothing pending: sinks commit on their own close.
    fn flush(&mut self) -> FileResult<()> {
        Ok(())
    }

    fn close(&mut self) -> FileResult<()> {
        self.store.clear();
        self.inner.close()
    }
}

// =============================================================================
// NoopManager
// =============================================================================

/// A real-manager stand-in with nothing behind it.
///
/// Useful when every unit the compiler needs is supplied in memory and no
/// delegated lookups are expected: reads report [`FileError::NotFound`],
/// listings are empty, non-artifact output is refused as
/// [`FileError::AccessDenied`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopManager;

impl FileManager for NoopManager {
    fn file_for_output(
        &mut self,
        _scope: Scope,
        name: &str,
        _kind: FileKind,
        _sibling: Option<&UnitUri>,
    ) -> FileResult<Box<dyn OutputFile>> {
        Err(FileError::AccessDenied(name.into()))
    }

    fn read(&self, _scope: Scope, name: &str) -> FileResult<Vec<u8>> {
        Err(FileError::NotFound(name.into()))
    }

    fn exists(&self, _scope: Scope, _name: &str) -> bool {
        false
    }

    fn list(&self, _scope: Scope, _prefix: &str) -> FileResult<Vec<String>> {
        Ok(Vec::new())
    }

    fn flush(&mut self) -> FileResult<()> {
        Ok(())
    }

    fn close(&mut self) -> FileResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Spy manager recording which delegated operations were invoked.
    #[derive(Debug, Default)]
    struct RecordingManager {
        output_calls: usize,
        closed: bool,
    }

    impl FileManager for RecordingManager {
        fn file_for_output(
            &mut self,
            _scope: Scope,
            name: &str,
            _kind: FileKind,
            _sibling: Option<&UnitUri>,
        ) -> FileResult<Box<dyn OutputFile>> {
            self.output_calls += 1;
            Err(FileError::AccessDenied(name.into()))
        }

        fn read(&self, _scope: Scope, name: &str) -> FileResult<Vec<u8>> {
            Err(FileError::NotFound(name.into()))
        }

        fn exists(&self, _scope: Scope, name: &str) -> bool {
            name == "Known"
        }

        fn list(&self, _scope: Scope, prefix: &str) -> FileResult<Vec<String>> {
            Ok(vec![format!("{prefix}/One"), format!("{prefix}/Two")])
        }

        fn flush(&mut self) -> FileResult<()> {
            Ok(())
        }

        fn close(&mut self) -> FileResult<()> {
            self.closed = true;
            Ok(())
        }
    }

    #[test]
    fn test_artifact_output_bypasses_inner() {
        let mut fm = MemoryFileManager::new(RecordingManager::default());
        let out = fm
            .file_for_output(Scope::Output, "Hello", FileKind::Artifact, None)
            .unwrap();
        assert!(out.uri().is_virtual());
        assert_eq!(fm.inner().output_calls, 0);
    }

    #[test]
    fn test_other_output_delegates_including_errors() {
        let mut fm = MemoryFileManager::new(RecordingManager::default());
        let err = fm
            .file_for_output(Scope::Output, "doc.html", FileKind::Other, None)
            .unwrap_err();
        assert!(matches!(err, FileError::AccessDenied(_)));
        assert_eq!(fm.inner().output_calls, 1);
    }

    #[test]
    fn test_read_error_propagates_unchanged() {
        let fm = MemoryFileManager::new(RecordingManager::default());
        let err = fm.read(Scope::ClassPath, "Missing").unwrap_err();
        assert!(matches!(err, FileError::NotFound(p) if p.to_str() == Some("Missing")));
    }

    #[test]
    fn test_exists_and_list_delegate() {
        let fm = MemoryFileManager::new(RecordingManager::default());
        assert!(fm.exists(Scope::ClassPath, "Known"));
        assert!(!fm.exists(Scope::ClassPath, "Unknown"));
        assert_eq!(
            fm.list(Scope::SourcePath, "pkg").unwrap(),
            vec!["pkg/One".to_string(), "pkg/Two".to_string()]
        );
    }

    #[test]
    fn test_close_clears_store_and_delegates() {
        let mut fm = MemoryFileManager::new(RecordingManager::default());
        let out = fm
            .file_for_output(Scope::Output, "Hello", FileKind::Artifact, None)
            .unwrap();
        out.close().unwrap();
        assert_eq!(fm.artifacts().len(), 1);

        fm.close().unwrap();
        assert!(fm.artifacts().is_empty());
        assert!(fm.inner().closed);
    }

    #[test]
    fn test_flush_is_noop() {
        let mut fm = MemoryFileManager::new(RecordingManager::default());
        let mut out = fm
            .file_for_output(Scope::Output, "Hello", FileKind::Artifact, None)
            .unwrap();
        out.write_all(&[1]).unwrap();
        fm.flush().unwrap();
        // Unclosed sink: flush publishes nothing.
        assert!(fm.artifacts().is_empty());
        out.close().unwrap();
        assert_eq!(fm.artifacts()["Hello"].as_ref(), &[1]);
    }

    #[test]
    fn test_unclosed_sink_never_appears() {
        let mut fm = MemoryFileManager::new(NoopManager);
        let mut out = fm
            .file_for_output(Scope::Output, "Aborted", FileKind::Artifact, None)
            .unwrap();
        out.write_all(b"half an artifact").unwrap();
        drop(out);
        assert!(fm.artifacts().is_empty());
    }

    #[test]
    fn test_successive_closes_last_writer_wins() {
        let mut fm = MemoryFileManager::new(NoopManager);
        for bytes in [&[0x01u8][..], &[0x02, 0x03][..]] {
            let mut out = fm
                .file_for_output(Scope::Output, "Hello", FileKind::Artifact, None)
                .unwrap();
            out.write_all(bytes).unwrap();
            out.close().unwrap();
        }
        let artifacts = fm.artifacts();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts["Hello"].as_ref(), &[0x02, 0x03]);
    }

    #[test]
    fn test_infer_kind() {
        let fm = MemoryFileManager::new(NoopManager);
        assert_eq!(fm.infer_kind("Hello.java"), FileKind::Source);
        assert_eq!(fm.infer_kind("Hello.class"), FileKind::Artifact);
        assert_eq!(fm.infer_kind("banner.png"), FileKind::Other);
    }

    #[test]
    fn test_kind_suffixes_match_consts() {
        assert_eq!(FileKind::Source.ext(), Some(SOURCE_EXT));
        assert_eq!(FileKind::Artifact.ext(), Some(ARTIFACT_EXT));
        assert_eq!(FileKind::Other.ext(), None);
        assert_eq!(FileKind::infer(&format!("Hello{ARTIFACT_EXT}")), FileKind::Artifact);
    }

    #[test]
    fn test_end_to_end_hello() {
        // The full flow: submit a source unit, let the "compiler" emit
        // bytecode for it, read the artifact snapshot back.
        let mut fm = MemoryFileManager::new(NoopManager);
        let unit = fm.make_source_unit("Hello.java", "public class Hello {}");
        assert_eq!(unit.uri().as_str(), "mfm:///Hello.java");

        let mut out = fm
            .file_for_output(Scope::Output, "Hello", FileKind::Artifact, Some(unit.uri()))
            .unwrap();
        out.write_all(&[0xCA, 0xFE]).unwrap();
        out.write_all(&[0xBA, 0xBE]).unwrap();
        out.close().unwrap();

        assert_eq!(fm.artifacts()["Hello"].as_ref(), &[0xCA, 0xFE, 0xBA, 0xBE]);
    }
}
