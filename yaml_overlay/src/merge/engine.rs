//! The deep-merge algorithm.

use crate::node::Node;

/// Overlay `layer` onto `target`, updating `target` in place.
///
/// Behaviour:
/// - A null overlay leaves `target` untouched.
/// - Two mappings merge key by key: keys only in `target` keep their value,
///   keys in `layer` merge recursively, and new keys are appended in
///   `layer`'s order.
/// - Any other pairing (sequences, scalars, mismatched kinds) replaces
///   `target` wholesale with a copy of `layer`. Sequences are never
///   concatenated or merged element by element.
pub(crate) fn overlay_onto(target: &mut Node, layer: &Node) {
    match (target, layer) {
        (_, Node::Null) => {}
        (Node::Mapping(target_map), Node::Mapping(layer_map)) => {
            for (key, value) in layer_map {
                match target_map.get_mut(key) {
                    Some(existing) => overlay_onto(existing, value),
                    None => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, _) => *slot = layer.clone(),
    }
}

/// Merge two trees, returning a new tree and leaving both inputs untouched.
///
/// `overlay` wins: recursively per key for mappings, wholesale for everything
/// else. A null `overlay` yields a copy of `base`.
///
/// # Examples
///
/// ```
/// use yaml_overlay::{load_str, merge_nodes};
///
/// # fn main() -> yaml_overlay::PatchResult<()> {
/// let base = load_str("{first: {one: 1, two: 2}, second: {three: 3}}", "base.yaml")?;
/// let overlay = load_str("{first: {one: 10, dos: 2}}", "overlay.yaml")?;
/// let expected = load_str(
///     "{first: {one: 10, two: 2, dos: 2}, second: {three: 3}}",
///     "expected.yaml",
/// )?;
/// assert_eq!(merge_nodes(&base, &overlay), expected);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn merge_nodes(base: &Node, overlay: &Node) -> Node {
    let mut merged = base.clone();
    overlay_onto(&mut merged, overlay);
    merged
}
