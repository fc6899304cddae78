//! Constructors and classification helpers for `PatchError`.

use camino::{Utf8Path, Utf8PathBuf};

use super::{Location, PatchError};

impl PatchError {
    /// Construct a parse error for `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use yaml_overlay::{Location, PatchError};
    ///
    /// let err = PatchError::parse(
    ///     "conf/app.yaml",
    ///     "unexpected end of stream",
    ///     Some(Location { line: 3, column: 1 }),
    /// );
    /// assert_eq!(
    ///     err.to_string(),
    ///     "failed to parse 'conf/app.yaml' at line 3, column 1: unexpected end of stream"
    /// );
    /// ```
    #[must_use]
    pub fn parse(
        path: impl Into<Utf8PathBuf>,
        message: impl Into<String>,
        location: Option<Location>,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
            location,
        }
    }

    /// Construct a merge error.
    #[must_use]
    pub fn merge(message: impl Into<String>) -> Self {
        Self::Merge {
            message: message.into(),
        }
    }

    /// Classify an I/O failure for `path`, separating missing files from
    /// other read errors.
    #[must_use]
    pub fn from_io(path: &Utf8Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Returns `true` when the error reports a missing source.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Path of the source the error refers to, when it refers to one.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } | Self::Parse { path, .. } => {
                Some(path)
            }
            Self::Merge { .. } | Self::Emit { .. } => None,
        }
    }
}
