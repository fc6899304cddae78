//! The document tree shared by the loader, the merge engine and the emitter.
//!
//! A [`Node`] is a closed tagged union. Every consumer matches on it
//! exhaustively, so adding a node kind is a compile-time event rather than a
//! silent runtime fallthrough.

mod scalar;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

pub use scalar::Scalar;

pub(crate) use scalar::{canonical_float, is_null_spelling, parse_bool, parse_float, parse_int};

/// Ordered mapping from scalar keys to child nodes.
///
/// Insertion order is preserved. Equality ignores order, mirroring how two
/// YAML mappings with the same entries are the same document.
pub type Mapping = IndexMap<Scalar, Node>;

/// A parsed unit of structured data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Node {
    /// An explicit null, or a document with no content.
    #[default]
    Null,
    /// A normalised scalar.
    Scalar(Scalar),
    /// An ordered list of nodes.
    Sequence(Vec<Node>),
    /// A mapping with unique scalar keys.
    Mapping(Mapping),
}

impl Node {
    /// Name of the node kind, used in diagnostics.
    ///
    /// Scalars report their scalar kind (`string`, `boolean`, ...).
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(scalar) => scalar.kind(),
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Returns `true` for [`Node::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for [`Node::Mapping`].
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// Borrow the mapping when this node is one.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the sequence items when this node is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the scalar when this node is one.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Look up a string key in a mapping node.
    ///
    /// Returns `None` when the node is not a mapping or the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use yaml_overlay::{Node, load_str};
    ///
    /// # fn main() -> yaml_overlay::PatchResult<()> {
    /// let node = load_str("server: {port: 8080}", "inline.yaml")?;
    /// let port = node.get("server").and_then(|server| server.get("port"));
    /// assert_eq!(port, Some(&Node::from(8080_i64)));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_mapping()
            .and_then(|map| map.get(&Scalar::Str(key.to_owned())))
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

impl FromIterator<(Scalar, Node)> for Node {
    fn from_iter<I: IntoIterator<Item = (Scalar, Node)>>(iter: I) -> Self {
        Self::Mapping(iter.into_iter().collect())
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Str(value) => serializer.serialize_str(value),
        }
    }
}

/// Mapping keys serialise as their canonical text so that map-keyed formats
/// which only accept string keys (JSON, figment dictionaries) can consume any
/// document.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key.canonical().as_ref(), value)?;
                }
                out.end()
            }
        }
    }
}
