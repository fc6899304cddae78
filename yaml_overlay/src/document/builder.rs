//! Event receiver that assembles [`Node`] trees from `yaml-rust2` events.

use std::collections::HashMap;

use camino::Utf8Path;
use yaml_rust2::parser::{Event, MarkedEventReceiver};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use crate::error::{Location, PatchError};
use crate::node::{Mapping, Node, Scalar, is_null_spelling, parse_bool, parse_float, parse_int};

const CORE_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// Alias expansion is always allowed up to this many nodes.
const ALIAS_NODE_FLOOR: usize = 10_000;

/// Beyond the floor, alias expansion may produce at most this many nodes per
/// node written out in the source.
const ALIAS_NODE_RATIO: usize = 10;

/// Convert a scanner marker into a one-based [`Location`].
pub(super) fn location(marker: &Marker) -> Location {
    Location {
        line: marker.line(),
        column: marker.col() + 1,
    }
}

/// A collection still waiting for its end event.
enum Frame {
    Sequence {
        anchor: usize,
        start: Marker,
        items: Vec<Node>,
    },
    Mapping {
        anchor: usize,
        start: Marker,
        entries: Mapping,
        pending_key: Option<Scalar>,
    },
}

/// Builds the first document of a stream into a [`Node`].
///
/// `MarkedEventReceiver` cannot fail, so the first error is parked in
/// `error` and every later event is ignored.
///
/// Anchored nodes are stored with their expanded size. Every alias adds that
/// size to `aliased`; once it exceeds both `ALIAS_NODE_FLOOR` and
/// `ALIAS_NODE_RATIO` times the `written` node count the document is
/// rejected before the copy is made.
pub(super) struct TreeBuilder<'a> {
    source: &'a Utf8Path,
    stack: Vec<Frame>,
    anchors: HashMap<usize, (Node, usize)>,
    written: usize,
    aliased: usize,
    root: Option<(Node, Marker)>,
    error: Option<PatchError>,
}

impl<'a> TreeBuilder<'a> {
    pub(super) fn new(source: &'a Utf8Path) -> Self {
        Self {
            source,
            stack: Vec::new(),
            anchors: HashMap::new(),
            written: 0,
            aliased: 0,
            root: None,
            error: None,
        }
    }

    /// Finish building, returning the root and where it started.
    ///
    /// An empty stream yields `None`.
    pub(super) fn finish(self) -> Result<Option<(Node, Marker)>, PatchError> {
        self.error.map_or(Ok(self.root), Err)
    }

    fn fail(&mut self, message: impl Into<String>, marker: &Marker) {
        if self.error.is_none() {
            self.error = Some(PatchError::parse(
                self.source,
                message,
                Some(location(marker)),
            ));
        }
    }

    fn remember(&mut self, anchor: usize, node: &Node) {
        if anchor > 0 {
            self.anchors.insert(anchor, (node.clone(), node_count(node)));
        }
    }

    /// Expand an alias, failing when the document aliases excessively.
    fn alias(&mut self, anchor: usize, marker: Marker) {
        let Some(size) = self.anchors.get(&anchor).map(|(_, size)| *size) else {
            self.fail("alias refers to an unknown anchor", &marker);
            return;
        };
        self.aliased = self.aliased.saturating_add(size);
        let allowed = self
            .written
            .saturating_mul(ALIAS_NODE_RATIO)
            .max(ALIAS_NODE_FLOOR);
        if self.aliased > allowed {
            self.fail("document contains excessive aliasing", &marker);
            return;
        }
        let copy = self.anchors.get(&anchor).map(|(node, _)| node.clone());
        if let Some(node) = copy {
            self.complete(node, marker);
        }
    }

    /// Attach a finished node to its parent collection, or make it the root.
    fn complete(&mut self, node: Node, start: Marker) {
        let Some(frame) = self.stack.last_mut() else {
            self.root = Some((node, start));
            return;
        };
        let problem = match frame {
            Frame::Sequence { items, .. } => {
                items.push(node);
                None
            }
            Frame::Mapping {
                entries,
                pending_key,
                ..
            } => match (pending_key.take(), node) {
                (Some(key), value) => {
                    entries.insert(key, value);
                    None
                }
                (None, Node::Scalar(key)) if entries.contains_key(&key) => {
                    Some(format!("duplicate mapping key `{key}`"))
                }
                (None, Node::Scalar(key)) => {
                    *pending_key = Some(key);
                    None
                }
                (None, other) => Some(format!("{} mapping keys are not supported", other.kind())),
            },
        };
        if let Some(message) = problem {
            self.fail(message, &start);
        }
    }

    fn scalar(
        &mut self,
        value: String,
        style: TScalarStyle,
        core_tag: Option<&str>,
        marker: &Marker,
    ) -> Option<Node> {
        if let Some(suffix) = core_tag {
            match tagged_scalar(suffix, &value) {
                Ok(Some(node)) => return Some(node),
                Ok(None) => {}
                Err(message) => {
                    self.fail(message, marker);
                    return None;
                }
            }
        }
        if style != TScalarStyle::Plain {
            return Some(Node::Scalar(Scalar::Str(value)));
        }
        Some(Scalar::resolve_plain(&value).map_or(Node::Null, Node::Scalar))
    }
}

/// Resolve a scalar carrying an explicit core-schema tag.
///
/// Returns `Ok(None)` for tags that do not constrain scalars so normal
/// resolution applies.
fn tagged_scalar(suffix: &str, value: &str) -> Result<Option<Node>, String> {
    let node = match suffix {
        "str" => Node::Scalar(Scalar::Str(value.to_owned())),
        "bool" => parse_bool(value)
            .map(Node::from)
            .ok_or_else(|| format!("`{value}` is not a valid !!bool"))?,
        "int" => parse_int(value)
            .map(Node::from)
            .ok_or_else(|| format!("`{value}` is not a valid !!int"))?,
        "float" => parse_float(value)
            .map(Node::from)
            .ok_or_else(|| format!("`{value}` is not a valid !!float"))?,
        "null" if is_null_spelling(value) => Node::Null,
        "null" => return Err(format!("`{value}` is not a valid !!null")),
        _ => return Ok(None),
    };
    Ok(Some(node))
}

/// Number of nodes in `node`, counting each mapping key as one node.
fn node_count(node: &Node) -> usize {
    match node {
        Node::Null | Node::Scalar(_) => 1,
        Node::Sequence(items) => items
            .iter()
            .map(node_count)
            .fold(1, usize::saturating_add),
        Node::Mapping(map) => map
            .values()
            .map(node_count)
            .fold(map.len().saturating_add(1), usize::saturating_add),
    }
}

fn core_suffix<'t>(handle: &str, suffix: &'t str) -> Option<&'t str> {
    (handle == CORE_TAG_PREFIX || handle == "!!").then_some(suffix)
}

impl MarkedEventReceiver for TreeBuilder<'_> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        if self.error.is_some() {
            return;
        }
        match ev {
            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart
            | Event::DocumentEnd => {}

            Event::Scalar(value, style, anchor, tag) => {
                self.written = self.written.saturating_add(1);
                let core_tag = tag
                    .as_ref()
                    .and_then(|explicit| core_suffix(&explicit.handle, &explicit.suffix));
                if let Some(node) = self.scalar(value, style, core_tag, &marker) {
                    self.remember(anchor, &node);
                    self.complete(node, marker);
                }
            }

            Event::Alias(anchor) => self.alias(anchor, marker),

            Event::SequenceStart(anchor, _tag) => {
                self.written = self.written.saturating_add(1);
                self.stack.push(Frame::Sequence {
                    anchor,
                    start: marker,
                    items: Vec::new(),
                });
            }

            Event::MappingStart(anchor, _tag) => {
                self.written = self.written.saturating_add(1);
                self.stack.push(Frame::Mapping {
                    anchor,
                    start: marker,
                    entries: Mapping::new(),
                    pending_key: None,
                });
            }

            Event::SequenceEnd | Event::MappingEnd => match self.stack.pop() {
                Some(Frame::Sequence {
                    anchor,
                    start,
                    items,
                }) => {
                    let node = Node::Sequence(items);
                    self.remember(anchor, &node);
                    self.complete(node, start);
                }
                Some(Frame::Mapping {
                    anchor,
                    start,
                    entries,
                    ..
                }) => {
                    let node = Node::Mapping(entries);
                    self.remember(anchor, &node);
                    self.complete(node, start);
                }
                None => self.fail("collection end without a matching start", &marker),
            },
        }
    }
}
