//! Capability-scoped file reads.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};

use crate::error::PatchResult;
use crate::result_ext::IoResultExt;

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Read the whole file at `path` through a `cap-std` handle on its parent.
///
/// # Errors
///
/// Returns [`crate::PatchError::NotFound`] when the file or its parent
/// directory does not exist and [`crate::PatchError::Io`] for any other
/// failure.
pub(super) fn read_source(path: &Utf8Path) -> PatchResult<Vec<u8>> {
    let file_name = path.file_name().ok_or_else(|| {
        crate::PatchError::from_io(
            path,
            std::io::Error::other("cannot determine file name for document path"),
        )
    })?;
    let dir = Dir::open_ambient_dir(parent_or_dot(path), ambient_authority()).for_path(path)?;
    dir.read(file_name).for_path(path)
}
