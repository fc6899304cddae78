//! Primary error enum for document patching flows.

use std::fmt;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Position inside a source document, one-based.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Location {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors that can occur while producing a patched document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatchError {
    /// A mandatory source does not exist.
    ///
    /// Orchestration recovers this locally for the optional patch file; it
    /// only reaches callers for the base document.
    #[error("document not found: '{path}'")]
    NotFound {
        /// Path that could not be found.
        path: Utf8PathBuf,
    },

    /// A source exists but could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The bytes of a source do not form an acceptable document.
    #[error("failed to parse '{path}'{}: {message}", describe_location(.location.as_ref()))]
    Parse {
        /// Identifier of the offending source.
        path: Utf8PathBuf,
        /// Human-readable description of the failure.
        message: String,
        /// Where in the source the failure was detected, when known.
        location: Option<Location>,
    },

    /// Layers cannot be combined into a result of the required shape.
    #[error("failed to merge documents: {message}")]
    Merge {
        /// Human-readable description of the failure.
        message: String,
    },

    /// The merged tree could not be serialised.
    #[error("failed to serialise merged document: {message}")]
    Emit {
        /// Message reported by the emitter.
        message: String,
    },
}

fn describe_location(location: Option<&Location>) -> String {
    location.map_or_else(String::new, |loc| format!(" at {loc}"))
}
