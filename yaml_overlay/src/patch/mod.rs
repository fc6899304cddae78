//! Base-plus-patch orchestration.
//!
//! A base document at `path` may be accompanied by an optional patch at
//! `path.patch`. [`Patcher`] loads both, folds the patch over the base, and
//! serialises the result. The base is mandatory; a missing patch simply means
//! nothing is overridden.

mod fs;
mod observer;

use std::fmt;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::document::{LoadOptions, emit_bytes, load_document};
use crate::error::PatchResult;
use crate::merge::{LayerStack, MergeOptions};
use crate::node::Node;

pub use observer::{PatchObserver, SilentObserver, TracingObserver};

/// Suffix appended to a base path to locate its patch.
pub const PATCH_SUFFIX: &str = ".patch";

/// Return the patch path for `base`: the full base path with
/// [`PATCH_SUFFIX`] appended.
///
/// ```
/// use camino::Utf8Path;
/// use yaml_overlay::patch_path_for;
///
/// assert_eq!(patch_path_for(Utf8Path::new("conf/app.yaml")), "conf/app.yaml.patch");
/// ```
#[must_use]
pub fn patch_path_for(base: &Utf8Path) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{base}{PATCH_SUFFIX}"))
}

/// Loads a base document and its optional patch.
///
/// # Examples
///
/// ```rust,no_run
/// use yaml_overlay::Patcher;
///
/// # fn main() -> yaml_overlay::PatchResult<()> {
/// let bytes = Patcher::new("deploy/values.yaml").patched_content()?;
/// std::fs::write("deploy/values.rendered.yaml", bytes).ok();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Patcher {
    base_path: Utf8PathBuf,
    patch_path: Utf8PathBuf,
    observer: Arc<dyn PatchObserver>,
}

impl Patcher {
    /// Create a patcher for the document at `base_path`.
    ///
    /// Patch activity is reported through [`TracingObserver`] until another
    /// observer is supplied.
    #[must_use]
    pub fn new(base_path: impl Into<Utf8PathBuf>) -> Self {
        let base = base_path.into();
        let patch_path = patch_path_for(&base);
        Self {
            base_path: base,
            patch_path,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the observer notified about patch activity.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn PatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Path of the mandatory base document.
    #[must_use]
    pub fn base_path(&self) -> &Utf8Path {
        &self.base_path
    }

    /// Path of the optional patch document.
    #[must_use]
    pub fn patch_path(&self) -> &Utf8Path {
        &self.patch_path
    }

    /// Load the base and the patch and merge them into one tree.
    ///
    /// # Errors
    ///
    /// - [`crate::PatchError::NotFound`] when the base document is missing.
    /// - [`crate::PatchError::Parse`] naming the base or the patch when
    ///   either fails to parse or lacks a mapping root.
    /// - [`crate::PatchError::Io`] when either file exists but cannot be
    ///   read.
    pub fn patched_document(&self) -> PatchResult<Node> {
        let options = LoadOptions::mapping_root();
        let base = load_document(&fs::read_source(&self.base_path)?, &self.base_path, options)?;

        let mut stack = LayerStack::with_capacity(2);
        stack.push(base, Some(self.base_path.clone()));
        match fs::read_source(&self.patch_path) {
            Ok(bytes) => {
                let patch = load_document(&bytes, &self.patch_path, options)?;
                stack.push(patch, Some(self.patch_path.clone()));
                self.observer
                    .patch_applied(&self.base_path, &self.patch_path);
            }
            Err(err) if err.is_not_found() => {
                self.observer.patch_absent(&self.base_path, &self.patch_path);
            }
            Err(err) => return Err(err),
        }
        stack.merge(MergeOptions::mapping_root())
    }

    /// Load, merge, and serialise the patched document.
    ///
    /// An empty base without a patch (or with an empty patch) yields zero
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns every error [`Patcher::patched_document`] can, plus
    /// [`crate::PatchError::Emit`] if serialisation fails.
    pub fn patched_content(&self) -> PatchResult<Vec<u8>> {
        emit_bytes(&self.patched_document()?)
    }
}

impl fmt::Debug for Patcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Patcher")
            .field("base_path", &self.base_path)
            .field("patch_path", &self.patch_path)
            .finish_non_exhaustive()
    }
}

/// Return the patched content of the document at `base_path`.
///
/// Shorthand for `Patcher::new(base_path).patched_content()`.
///
/// # Errors
///
/// See [`Patcher::patched_content`].
pub fn patched_content(base_path: impl Into<Utf8PathBuf>) -> PatchResult<Vec<u8>> {
    Patcher::new(base_path).patched_content()
}
