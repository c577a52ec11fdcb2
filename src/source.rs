//! In-memory source units.
//!
//! A [`SourceFile`] carries one compilation unit's text into the compiler
//! without any on-disk representation. It is created once per compilation
//! request and never mutated; the crate keeps no ownership of it after
//! handing it to the invocation layer.

use std::io::Cursor;

use crate::manager::FileKind;
use crate::uri::{UnitUri, synthesize};

/// An immutable, memory-resident source unit.
///
/// # Example
///
/// ```
/// use memfm::SourceFile;
///
/// let unit = SourceFile::new("Hello.java", "class Hello {}");
/// assert_eq!(unit.text(), "class Hello {}");
/// assert_eq!(unit.uri().as_str(), "mfm:///Hello.java");
/// ```
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    uri: UnitUri,
    text: String,
}

impl SourceFile {
    /// Create a source unit from a name and its text.
    ///
    /// The location identifier is synthesized from the name. Empty text is
    /// valid and produces an effectively empty unit.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        let uri = synthesize(&name);
        Self {
            name,
            uri,
            text: text.into(),
        }
    }

    /// The logical unit name this source was submitted under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The synthesized location identifier.
    pub fn uri(&self) -> &UnitUri {
        &self.uri
    }

    /// The source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text as a character sequence, for the compiler's reader.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.text.chars()
    }

    /// A textual reader view over the source bytes.
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.text.as_bytes())
    }

    /// Always [`FileKind::Source`].
    pub fn kind(&self) -> FileKind {
        FileKind::Source
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the unit has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
