//! # memfm
//!
//! An in-memory file manager for embedding compilers.
//!
//! Hosts that compile snippets of source code at runtime need the resulting
//! artifacts (bytecode, typically) immediately available in memory, without
//! touching disk or leaking temp files, and without filename collisions
//! across repeated compilations. This crate provides the virtual
//! file-manager layer that makes that work:
//!
//! - **Identifier synthesis**: collision-free, deterministic `mfm:` location
//!   identifiers for units that have no on-disk existence
//! - **Source buffers**: immutable in-memory source units the compiler reads
//! - **Output sinks**: byte accumulators the compiler streams output into,
//!   published atomically when the compiler closes them
//! - **Artifact store**: the per-pass map of unit name → compiled bytes
//! - **Delegation**: every non-output concern forwards to a wrapped real
//!   manager (platform units, classpath entries, resources)
//!
//! Compilation itself belongs to an external compiler service; this crate
//! only mediates its file traffic.
//!
//! ## Quick Start
//!
//! ```
//! use std::io::Write;
//! use memfm::{FileKind, FileManager, MemoryFileManager, NoopManager, OutputFile, Scope};
//!
//! let mut fm = MemoryFileManager::new(NoopManager);
//! let unit = fm.make_source_unit("Hello.java", "public class Hello {}");
//!
//! // Hand `unit` and `fm` to the compiler. When it emits a compiled unit:
//! let mut out = fm
//!     .file_for_output(Scope::Output, "Hello", FileKind::Artifact, Some(unit.uri()))?;
//! out.write_all(&[0xCA, 0xFE, 0xBA, 0xBE])?;
//! out.close()?;
//!
//! // After the pass, read the artifacts back:
//! let artifacts = fm.artifacts();
//! assert_eq!(artifacts["Hello"].as_ref(), &[0xCA, 0xFE, 0xBA, 0xBE]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Lifecycle
//!
//! One [`MemoryFileManager`] instance serves one compilation pass. Output
//! sinks commit only at close, so a compiler abort leaves no partial
//! artifacts behind. [`FileManager::close`] resets the store for reuse;
//! concurrent passes should use separate instances.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod disk;
pub mod error;
pub mod manager;
pub mod output;
pub mod source;
pub mod store;
pub mod uri;

// =============================================================================
// Prelude - import commonly used items with a single `use`
// =============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use memfm::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ArtifactBytes, ArtifactStore, DiskManager, FileError, FileKind, FileManager,
        FileResult, MemoryFileManager, NoopManager, OutputFile, Scope, SourceFile, UnitUri,
        synthesize,
    };
}

// =============================================================================
// Re-exports
// =============================================================================

pub use disk::{DiskManager, decode_utf8};
pub use error::{FileError, FileResult};
pub use manager::{FileKind, FileManager, MemoryFileManager, NoopManager, Scope};
pub use output::{ArtifactSink, OutputFile};
pub use source::SourceFile;
pub use store::{ArtifactBytes, ArtifactStore};
pub use uri::{ARTIFACT_EXT, FALLBACK_URI, SCHEME, SOURCE_EXT, UnitUri, synthesize};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_mixed_real_and_virtual_outputs() {
        let dir = TempDir::new().unwrap();
        let mut fm = MemoryFileManager::new(DiskManager::new(dir.path()));

        // Artifact output stays in memory.
        let mut class = fm
            .file_for_output(Scope::Output, "Hello", FileKind::Artifact, None)
            .unwrap();
        class.write_all(&[0xCA, 0xFE]).unwrap();
        class.close().unwrap();

        // Any other kind goes through to the real manager.
        let mut doc = fm
            .file_for_output(Scope::Output, "Hello.html", FileKind::Other, None)
            .unwrap();
        doc.write_all(b"<html/>").unwrap();
        doc.close().unwrap();

        assert_eq!(fm.artifacts()["Hello"].as_ref(), &[0xCA, 0xFE]);
        assert!(!fm.artifacts().contains_key("Hello.html"));
        assert_eq!(fs::read(dir.path().join("Hello.html")).unwrap(), b"<html/>");
    }

    #[test]
    fn test_delegated_reads_see_disk() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Dep.class"), [0x01]).unwrap();

        let fm = MemoryFileManager::new(DiskManager::new(dir.path()));
        assert!(fm.exists(Scope::ClassPath, "Dep.class"));
        assert_eq!(fm.read(Scope::ClassPath, "Dep.class").unwrap(), vec![0x01]);
        assert_eq!(fm.infer_kind("Dep.class"), FileKind::Artifact);
    }

    #[test]
    fn test_reuse_after_close() {
        let mut fm = MemoryFileManager::new(NoopManager);

        for pass in 0..2u8 {
            let mut out = fm
                .file_for_output(Scope::Output, "Hello", FileKind::Artifact, None)
                .unwrap();
            out.write_all(&[pass]).unwrap();
            out.close().unwrap();

            assert_eq!(fm.artifacts()["Hello"].as_ref(), &[pass]);
            fm.close().unwrap();
            assert!(fm.artifacts().is_empty());
        }
    }
}
