//! Deep merge of document trees.
//!
//! The engine is pure: it never reads files and never logs beyond
//! `tracing` spans the caller can silence. Inputs are borrowed and left
//! untouched; results are freshly built trees.
//!
//! Precedence is "later wins". For two documents the overlay wins over the
//! base; for a [`LayerStack`] the highest-ranked layer wins.

mod engine;
mod layer;

use camino::Utf8Path;

use crate::document::{LoadOptions, emit_bytes, load_document};
use crate::error::PatchResult;
use crate::node::Node;

pub use engine::merge_nodes;
pub use layer::{Layer, LayerStack};

/// Options controlling a merge.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MergeOptions {
    /// Fail unless the merged root is a mapping or empty.
    pub require_mapping_root: bool,
}

impl MergeOptions {
    /// Options that only accept a mapping (or empty) result.
    #[must_use]
    pub const fn mapping_root() -> Self {
        Self {
            require_mapping_root: true,
        }
    }
}

/// Fold `layers` left to right into one tree.
///
/// Equivalent to pushing each root onto a [`LayerStack`] and calling
/// [`LayerStack::merge`]. An empty slice yields [`Node::Null`].
///
/// # Errors
///
/// Returns [`crate::PatchError::Merge`] when
/// [`MergeOptions::require_mapping_root`] is set and the result is neither a
/// mapping nor empty.
pub fn merge_layers<'a, I>(layers: I, options: MergeOptions) -> PatchResult<Node>
where
    I: IntoIterator<Item = &'a Node>,
{
    let mut stack = LayerStack::new();
    for root in layers {
        stack.push(root.clone(), None);
    }
    stack.merge(options)
}

/// Load, merge, and emit raw documents in priority order.
///
/// Each source is a `(name, bytes)` pair; the name only appears in
/// diagnostics. Every source must have a mapping root or be empty. Empty
/// sources contribute nothing. If no source has content the result is empty.
///
/// # Errors
///
/// Returns [`crate::PatchError::Parse`] naming the offending source when any
/// document fails to load, or [`crate::PatchError::Emit`] if serialisation
/// fails.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use yaml_overlay::{MergeOptions, load_str, merge_documents};
///
/// # fn main() -> yaml_overlay::PatchResult<()> {
/// let merged = merge_documents(
///     [
///         (Utf8Path::new("base.yaml"), b"debug: off\nname: api\n".as_slice()),
///         (Utf8Path::new("local.yaml"), b"debug: on\n".as_slice()),
///     ],
///     MergeOptions::mapping_root(),
/// )?;
/// let text = String::from_utf8_lossy(&merged);
/// assert_eq!(load_str(&text, "merged.yaml")?, load_str("{debug: true, name: api}", "x")?);
/// # Ok(())
/// # }
/// ```
pub fn merge_documents<'a, I>(sources: I, options: MergeOptions) -> PatchResult<Vec<u8>>
where
    I: IntoIterator<Item = (&'a Utf8Path, &'a [u8])>,
{
    let load_options = LoadOptions {
        require_mapping_root: options.require_mapping_root,
    };
    let mut stack = LayerStack::new();
    for (source, bytes) in sources {
        let root = load_document(bytes, source, load_options)?;
        if !root.is_null() {
            stack.push(root, Some(source.to_owned()));
        }
    }
    let merged = stack.merge(options)?;
    emit_bytes(&merged)
}
