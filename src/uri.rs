//! Location identifiers for compilation units.
//!
//! Compiler toolchains address every file-like resource through a location
//! identifier, even when the resource never exists on disk. This module maps
//! logical unit names to such identifiers:
//!
//! ```text
//! synthesize(name)
//! ├── name exists on disk      → file:///…       (canonical real path)
//! ├── dotted logical name      → mfm:///a/b/C    (private scheme)
//! ├── name with source suffix  → mfm:///a/b/C.java
//! └── malformed name           → mfm:///memfm/source  (constant fallback)
//! ```
//!
//! The `mfm` scheme is deliberately distinct from `file:` so that no virtual
//! unit is ever mistaken for an on-disk path by a collaborator inspecting the
//! identifier. Synthesis is deterministic: the same name always yields the
//! same identifier, so repeated compilations of one unit never trigger
//! duplicate-unit diagnostics in the toolchain.

use std::fmt;
use std::path::Path;

/// Private URI scheme for in-memory units.
pub const SCHEME: &str = "mfm";

/// Recognized source-file suffix.
pub const SOURCE_EXT: &str = ".java";

/// Recognized compiled-artifact suffix.
pub const ARTIFACT_EXT: &str = ".class";

/// Constant identifier returned when a name cannot be mapped at all.
pub const FALLBACK_URI: &str = "mfm:///memfm/source";

/// A location identifier for one compilation unit.
///
/// Either a canonical `file:` URI for a unit that genuinely exists on disk,
/// or a synthetic `mfm:` URI for a purely in-memory unit. Obtained via
/// [`synthesize`]; two distinct unit names never share an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitUri(String);

impl UnitUri {
    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier refers to a memory-resident unit
    /// (scheme `mfm`) rather than a real on-disk path (scheme `file`).
    pub fn is_virtual(&self) -> bool {
        self.0.starts_with(VIRTUAL_PREFIX)
    }
}

impl fmt::Display for UnitUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UnitUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Scheme plus fixed empty authority, as every virtual identifier begins.
const VIRTUAL_PREFIX: &str = "mfm:///";

/// Synthesize a location identifier for a unit name.
///
/// Total: every input produces an identifier, never an error.
///
/// 1. A name that resolves to an existing filesystem path yields that path's
///    canonical `file:` URI, so mixed real/virtual compilations can locate
///    genuine on-disk inputs.
/// 2. Otherwise every `.` in the logical name becomes a path separator under
///    the private `mfm:///` scheme. A name carrying the recognized source
///    suffix keeps exactly one instance of it at the end
///    (`"a.b.Hello.java"` → `mfm:///a/b/Hello.java`).
/// 3. A name that cannot form a valid URI path (empty, or containing
///    characters outside the URI path charset) degrades to [`FALLBACK_URI`].
///
/// # Example
///
/// ```
/// use memfm::synthesize;
///
/// let uri = synthesize("com.example.Hello");
/// assert_eq!(uri.as_str(), "mfm:///com/example/Hello");
/// ```
pub fn synthesize(name: &str) -> UnitUri {
    let path = Path::new(name);
    if path.exists()
        && let Ok(canonical) = path.canonicalize()
    {
        return UnitUri(format!("file://{}", canonical.display()));
    }

    virtual_uri(name).unwrap_or_else(|| UnitUri(FALLBACK_URI.to_string()))
}

/// Build the `mfm:` form, or `None` if the name cannot make a valid URI path.
fn virtual_uri(name: &str) -> Option<UnitUri> {
    if name.is_empty() {
        return None;
    }

    // Keep one trailing source suffix intact; dots in the remainder are
    // package separators.
    let (stem, suffix) = match name.strip_suffix(SOURCE_EXT) {
        Some(stem) if !stem.is_empty() => (stem, SOURCE_EXT),
        _ => (name, ""),
    };

    let segments = stem.replace('.', "/");
    if !segments.chars().all(is_uri_path_char) {
        return None;
    }

    Some(UnitUri(format!("{VIRTUAL_PREFIX}{segments}{suffix}")))
}

/// RFC 3986 path charset: unreserved, sub-delims, `:`, `@`, and `/`.
fn is_uri_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.' | '_' | '~' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ','
                | ';' | '=' | ':' | '@' | '/'
        )
}
