//! Document loading and emission.
//!
//! Loading turns the raw bytes of one source into a [`Node`] tree, applying
//! scalar normalisation exactly once. Emission turns a tree back into YAML
//! text. Neither step touches the filesystem; callers supply bytes and an
//! identifier used in diagnostics.

mod builder;
mod emit;

use camino::Utf8Path;
use tracing::trace;
use yaml_rust2::parser::Parser;

use crate::error::{PatchError, PatchResult};
use crate::node::Node;

use builder::{TreeBuilder, location};

pub use emit::{emit, emit_bytes};

/// Options controlling how a source is loaded.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadOptions {
    /// Reject documents whose root is anything other than a mapping or empty.
    pub require_mapping_root: bool,
}

impl LoadOptions {
    /// Options that only accept mapping (or empty) documents.
    #[must_use]
    pub const fn mapping_root() -> Self {
        Self {
            require_mapping_root: true,
        }
    }
}

/// Load a document from raw bytes.
///
/// `source` identifies the bytes in error messages, typically the file path.
/// An empty or comment-only document loads as [`Node::Null`]. Only the first
/// document of a multi-document stream is read.
///
/// # Errors
///
/// Returns [`PatchError::Parse`] naming `source` when the bytes are not UTF-8,
/// are not valid YAML, repeat a mapping key, use a null or collection as a
/// mapping key, or (with [`LoadOptions::require_mapping_root`]) have a root
/// that is neither a mapping nor empty.
pub fn load_document(bytes: &[u8], source: &Utf8Path, options: LoadOptions) -> PatchResult<Node> {
    let text = std::str::from_utf8(bytes)
        .map_err(|err| PatchError::parse(source, format!("invalid UTF-8: {err}"), None))?;
    load_text(text, source, options)
}

/// Load a document from a string, accepting any root kind.
///
/// # Errors
///
/// Returns [`PatchError::Parse`] when `text` is not a valid document.
///
/// # Examples
///
/// ```
/// use yaml_overlay::{Node, load_str};
///
/// # fn main() -> yaml_overlay::PatchResult<()> {
/// let node = load_str("enabled: on", "inline.yaml")?;
/// assert_eq!(node.get("enabled"), Some(&Node::from(true)));
/// # Ok(())
/// # }
/// ```
pub fn load_str(text: &str, source: impl AsRef<Utf8Path>) -> PatchResult<Node> {
    load_text(text, source.as_ref(), LoadOptions::default())
}

fn load_text(raw: &str, source: &Utf8Path, options: LoadOptions) -> PatchResult<Node> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut builder = TreeBuilder::new(source);
    Parser::new_from_str(text)
        .load(&mut builder, false)
        .map_err(|err| {
            PatchError::parse(source, err.info(), Some(location(err.marker())))
        })?;
    let Some((root, start)) = builder.finish()? else {
        trace!(source = %source, "loaded empty YAML document");
        return Ok(Node::Null);
    };
    if options.require_mapping_root && !matches!(root, Node::Mapping(_) | Node::Null) {
        return Err(PatchError::parse(
            source,
            describe_root_mismatch(&root),
            Some(location(&start)),
        ));
    }
    trace!(source = %source, kind = root.kind(), "loaded YAML document");
    Ok(root)
}

fn describe_root_mismatch(root: &Node) -> String {
    match root {
        Node::Scalar(scalar) => format!(
            "expected a mapping at the document root, found {} `{scalar}`",
            scalar.kind()
        ),
        other => format!(
            "expected a mapping at the document root, found a {}",
            other.kind()
        ),
    }
}

#[cfg(test)]
mod tests;
