//! Extensions for mapping foreign errors onto [`PatchResult`] concisely.
//!
//! These helpers replace repetitive `.map_err(|e| PatchError::…)` chains at
//! the filesystem and figment seams.
//!
//! - Use [`IoResultExt::for_path`] to classify an I/O failure against the
//!   file it concerns.
//! - Use [`IntoFigmentError::into_figment`] where figment expects its own
//!   error type.

use camino::Utf8Path;

use crate::error::{PatchError, PatchResult};

/// Attach a path to `std::io::Result` failures.
pub trait IoResultExt<T> {
    /// Convert the I/O error into a [`PatchError`] naming `path`.
    ///
    /// A not-found error becomes [`PatchError::NotFound`]; every other kind
    /// becomes [`PatchError::Io`].
    ///
    /// # Errors
    ///
    /// Propagates the original error after classification.
    fn for_path(self, path: &Utf8Path) -> PatchResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn for_path(self, path: &Utf8Path) -> PatchResult<T> {
        self.map_err(|err| PatchError::from_io(path, err))
    }
}

/// Convert patch errors into `figment::Error` for providers.
pub trait IntoFigmentError {
    /// Convert into a `figment::Error`, preserving the message text.
    fn into_figment(self) -> figment::Error;
}

impl IntoFigmentError for PatchError {
    fn into_figment(self) -> figment::Error {
        figment::Error::from(self.to_string())
    }
}
