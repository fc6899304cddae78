//! Serialise [`Node`] trees back to YAML text via `yaml-rust2`.

use yaml_rust2::{Yaml, YamlEmitter};

use crate::error::{PatchError, PatchResult};
use crate::node::{Node, Scalar, canonical_float};

/// Header `YamlEmitter::dump` writes before every document.
const DOCUMENT_START: &str = "---\n";

fn scalar_to_yaml(scalar: &Scalar) -> Yaml {
    match scalar {
        Scalar::Bool(value) => Yaml::Boolean(*value),
        Scalar::Int(value) => Yaml::Integer(*value),
        Scalar::Float(value) => Yaml::Real(canonical_float(*value)),
        Scalar::Str(value) if reloads_as_string(value) => Yaml::String(value.clone()),
        // `Yaml::Real` is written verbatim, which lets us supply the quotes.
        // Such strings are number or boolean spellings, so they never
        // contain a single quote.
        Scalar::Str(value) => Yaml::Real(format!("'{value}'")),
    }
}

/// Returns `true` when `value` written as a plain scalar loads back as the
/// same string.
///
/// The emitter already quotes most lookalikes; this catches the YAML 1.1
/// spellings it does not know, such as `0o17`, `1_000` or `+.inf`.
fn reloads_as_string(value: &str) -> bool {
    Scalar::resolve_plain(value).is_some_and(|scalar| scalar.as_str() == Some(value))
}

fn to_yaml(node: &Node) -> Yaml {
    match node {
        Node::Null => Yaml::Null,
        Node::Scalar(scalar) => scalar_to_yaml(scalar),
        Node::Sequence(items) => Yaml::Array(items.iter().map(to_yaml).collect()),
        Node::Mapping(map) => Yaml::Hash(
            map.iter()
                .map(|(key, value)| (scalar_to_yaml(key), to_yaml(value)))
                .collect(),
        ),
    }
}

/// Serialise `node` as a YAML document.
///
/// A [`Node::Null`] root means "no content" and serialises to an empty
/// string. Other roots produce a block-style document without a `---`
/// header, ending in a newline. Strings that would otherwise reload as
/// another type are quoted.
///
/// # Errors
///
/// Returns [`PatchError::Emit`] if the emitter fails.
///
/// # Examples
///
/// ```
/// use yaml_overlay::{emit, load_str};
///
/// # fn main() -> yaml_overlay::PatchResult<()> {
/// let node = load_str("flag: on\nname: 'off'", "inline.yaml")?;
/// let text = emit(&node)?;
/// assert_eq!(load_str(&text, "emitted.yaml")?, node);
/// assert!(text.contains("flag: true"));
/// # Ok(())
/// # }
/// ```
pub fn emit(node: &Node) -> PatchResult<String> {
    if node.is_null() {
        return Ok(String::new());
    }
    let mut out = String::new();
    let mut emitter = YamlEmitter::new(&mut out);
    emitter
        .dump(&to_yaml(node))
        .map_err(|err| PatchError::Emit {
            message: err.to_string(),
        })?;
    let mut body = out
        .strip_prefix(DOCUMENT_START)
        .map_or_else(|| out.clone(), str::to_owned);
    body.push('\n');
    Ok(body)
}

/// Serialise `node` as UTF-8 bytes; see [`emit`].
///
/// # Errors
///
/// Returns [`PatchError::Emit`] if the emitter fails.
pub fn emit_bytes(node: &Node) -> PatchResult<Vec<u8>> {
    emit(node).map(String::into_bytes)
}
