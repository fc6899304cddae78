//! Layer metadata and the stack that orders layers for folding.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::{PatchError, PatchResult};
use crate::node::Node;

use super::MergeOptions;
use super::engine::overlay_onto;

/// One source document together with its priority.
///
/// Later layers (higher rank) override earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    root: Node,
    source: Option<Utf8PathBuf>,
    rank: usize,
}

impl Layer {
    /// Root of the layer's document tree.
    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Identifier of the source the layer was loaded from, if any.
    #[must_use]
    pub fn source(&self) -> Option<&Utf8Path> {
        self.source.as_deref()
    }

    /// Position of the layer in the stack; zero is the lowest priority.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.rank
    }

    /// Returns `true` when the layer contributes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_null()
    }
}

/// Ordered collection of [`Layer`]s, lowest priority first.
///
/// # Examples
///
/// ```rust
/// use yaml_overlay::{LayerStack, MergeOptions, Node, load_str};
///
/// # fn main() -> yaml_overlay::PatchResult<()> {
/// let mut stack = LayerStack::new();
/// stack.push(load_str("port: 80\nhost: localhost", "defaults.yaml")?, None);
/// stack.push(load_str("port: 8080", "site.yaml")?, Some("site.yaml".into()));
///
/// let merged = stack.merge(MergeOptions::mapping_root())?;
/// assert_eq!(merged.get("port"), Some(&Node::from(8080_i64)));
/// assert_eq!(merged.get("host"), Some(&Node::from("localhost")));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl LayerStack {
    /// Create an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Create a stack with preallocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            layers: Vec::with_capacity(capacity),
        }
    }

    /// Push a layer above every layer already on the stack.
    pub fn push(&mut self, root: Node, source: Option<Utf8PathBuf>) {
        let rank = self.layers.len();
        self.layers.push(Layer { root, source, rank });
    }

    /// Layers in priority order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers on the stack.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` when no layer has been pushed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Fold every layer, left to right, into one tree.
    ///
    /// The accumulator starts as [`Node::Null`], so the first non-empty layer
    /// is taken as-is and each later layer is overlaid onto the result.
    /// Layers themselves are never modified.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::Merge`] when
    /// [`MergeOptions::require_mapping_root`] is set and the result is
    /// neither a mapping nor empty.
    pub fn merge(&self, options: MergeOptions) -> PatchResult<Node> {
        let mut merged = Node::Null;
        for layer in &self.layers {
            overlay_onto(&mut merged, &layer.root);
        }
        debug!(layers = self.layers.len(), kind = merged.kind(), "folded layers");
        if options.require_mapping_root && !matches!(merged, Node::Mapping(_) | Node::Null) {
            let origin = self
                .layers
                .iter()
                .rev()
                .find(|layer| !layer.is_empty())
                .and_then(Layer::source)
                .map_or_else(String::new, |source| format!(" (from '{source}')"));
            return Err(PatchError::merge(format!(
                "expected a mapping at the root, found a {}{origin}",
                merged.kind()
            )));
        }
        Ok(merged)
    }
}
