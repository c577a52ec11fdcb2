//! Output sinks the compiler streams compiled bytes into.
//!
//! The lifecycle is `open → write* → close`. Accumulation is local to the
//! sink; publication into the [`ArtifactStore`] happens exactly once, at
//! close. A sink that is dropped without being closed (compiler abort)
//! leaves no trace in the store, which is what keeps partial artifacts out
//! of the result map. Close consumes the sink, so writing after close is
//! not representable.

use std::fmt;
use std::io::{self, Write};

use crate::error::FileResult;
use crate::store::ArtifactStore;
use crate::uri::{UnitUri, synthesize};

/// A file-like handle opened for compiled output.
///
/// Implementors accept raw bytes in arbitrary chunk sizes through
/// [`io::Write`] and publish the finished result when [`close`](Self::close)
/// is called. The memory manager hands out [`ArtifactSink`]s; a real manager
/// hands out handles backed by actual files.
pub trait OutputFile: Write + Send + fmt::Debug {
    /// The unit name this output was opened for.
    fn name(&self) -> &str;

    /// The location identifier of this output.
    fn uri(&self) -> &UnitUri;

    /// Finish writing and publish the result.
    ///
    /// Consumes the handle; there is no reopening a closed output.
    fn close(self: Box<Self>) -> FileResult<()>;
}

/// An in-memory output sink that commits to an [`ArtifactStore`] on close.
///
/// Holds its own byte accumulator plus a store handle taken at construction,
/// so commit needs no access to the manager that opened it.
#[derive(Debug)]
pub struct ArtifactSink {
    name: String,
    uri: UnitUri,
    pending: Vec<u8>,
    store: ArtifactStore,
}

impl ArtifactSink {
    /// Open a sink for `name`, committing into `store` at close.
    pub(crate) fn open(name: impl Into<String>, store: ArtifactStore) -> Self {
        let name = name.into();
        let uri = synthesize(&name);
        Self {
            name,
            uri,
            pending: Vec::new(),
            store,
        }
    }

    /// Bytes accumulated so far.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl Write for ArtifactSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    // Nothing to push anywhere before close; commit is close's job.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl OutputFile for ArtifactSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn uri(&self) -> &UnitUri {
        &self.uri
    }

    fn close(self: Box<Self>) -> FileResult<()> {
        self.store.put(self.name, self.pending);
        Ok(())
    }
}
