//! Loader and emitter coverage.
//! Ensures scalars normalise once at load time, structural errors name their
//! source, and emitted documents reload to the same tree.

use anyhow::{Result, anyhow, ensure};
use camino::Utf8Path;
use rstest::rstest;

use super::{LoadOptions, emit, load_document, load_str};
use crate::error::PatchError;
use crate::node::{Node, Scalar};

fn load(text: &str) -> Result<Node> {
    load_str(text, "test.yaml").map_err(|err| anyhow!(err.to_string()))
}

fn parse_failure(text: &str, options: LoadOptions) -> Result<String> {
    match load_document(text.as_bytes(), Utf8Path::new("conf/app.yaml"), options) {
        Ok(node) => Err(anyhow!("expected a parse failure, loaded {node:?}")),
        Err(err @ PatchError::Parse { .. }) => Ok(err.to_string()),
        Err(other) => Err(anyhow!("expected a parse failure, got {other}")),
    }
}

#[rstest]
#[case::empty("")]
#[case::comment_only("# nothing here\n")]
#[case::explicit_null("~")]
#[case::bare_marker("---\n")]
fn documents_without_content_load_as_null(#[case] text: &str) -> Result<()> {
    let node = load(text)?;
    ensure!(node.is_null(), "expected null root, got {node:?}");
    Ok(())
}

#[test]
fn quoted_scalars_stay_strings() -> Result<()> {
    let node = load("single: 'on'\ndouble: \"42\"\nplain: on\nblock: |\n  true\n")?;
    ensure!(node.get("single") == Some(&Node::from("on")), "single-quoted");
    ensure!(node.get("double") == Some(&Node::from("42")), "double-quoted");
    ensure!(node.get("plain") == Some(&Node::from(true)), "plain boolean");
    ensure!(node.get("block") == Some(&Node::from("true\n")), "literal block");
    Ok(())
}

#[test]
fn mapping_keys_keep_document_order() -> Result<()> {
    let node = load("zeta: 1\nalpha: 2\nmid: 3\n")?;
    let keys: Vec<String> = node
        .as_mapping()
        .ok_or_else(|| anyhow!("expected mapping root"))?
        .keys()
        .map(ToString::to_string)
        .collect();
    ensure!(keys == ["zeta", "alpha", "mid"], "unexpected order {keys:?}");
    Ok(())
}

#[test]
fn keys_are_normalised_like_values() -> Result<()> {
    let node = load("on: enabled\n1: one\n")?;
    let map = node
        .as_mapping()
        .ok_or_else(|| anyhow!("expected mapping root"))?;
    ensure!(map.contains_key(&Scalar::Bool(true)), "boolean key");
    ensure!(map.contains_key(&Scalar::Int(1)), "integer key");
    Ok(())
}

#[rstest]
#[case("value: !!str on", Node::from("on"))]
#[case("value: !!bool 'yes'", Node::from(true))]
#[case("value: !!int '12'", Node::from(12_i64))]
#[case("value: !!float 3", Node::from(3.0))]
#[case("value: !!null ''", Node::Null)]
#[case("value: !custom on", Node::from(true))]
fn explicit_core_tags_force_the_kind(#[case] text: &str, #[case] expected: Node) -> Result<()> {
    let node = load(text)?;
    ensure!(
        node.get("value") == Some(&expected),
        "expected {expected:?}, got {:?}",
        node.get("value")
    );
    Ok(())
}

#[test]
fn aliases_expand_to_the_anchored_tree() -> Result<()> {
    let node = load("defaults: &d {retries: 3}\nservice: *d\n")?;
    ensure!(
        node.get("defaults") == node.get("service"),
        "alias should copy the anchored mapping"
    );
    ensure!(
        node.get("service").and_then(|svc| svc.get("retries")) == Some(&Node::from(3_i64)),
        "alias content"
    );
    Ok(())
}

#[test]
fn only_the_first_document_is_read() -> Result<()> {
    let node = load("first: 1\n---\nsecond: 2\n")?;
    ensure!(node.get("first").is_some(), "first document missing");
    ensure!(node.get("second").is_none(), "second document leaked");
    Ok(())
}

#[rstest]
#[case::duplicate_key("port: 1\nport: 2\n", "duplicate mapping key `port`")]
#[case::syntax("key: [1, 2\n", "conf/app.yaml")]
#[case::bad_tag("port: !!int eighty\n", "is not a valid !!int")]
#[case::collection_key("? [a, b]\n: value\n", "sequence mapping keys are not supported")]
#[case::null_key("~: value\n", "null mapping keys are not supported")]
fn malformed_documents_fail_with_context(
    #[case] text: &str,
    #[case] expected: &str,
) -> Result<()> {
    let message = parse_failure(text, LoadOptions::default())?;
    ensure!(message.contains("conf/app.yaml"), "missing path: {message}");
    ensure!(message.contains(expected), "missing '{expected}': {message}");
    Ok(())
}

#[test]
fn duplicate_keys_report_their_position() -> Result<()> {
    let message = parse_failure("a: 1\nb: 2\na: 3\n", LoadOptions::default())?;
    ensure!(message.contains("line 3, column 1"), "position: {message}");
    Ok(())
}

#[rstest]
#[case::bare_word("notayaml", "found string `notayaml`")]
#[case::number("42", "found integer `42`")]
#[case::sequence("- a\n- b\n", "found a sequence")]
fn mapping_root_is_enforced_when_requested(
    #[case] text: &str,
    #[case] expected: &str,
) -> Result<()> {
    let message = parse_failure(text, LoadOptions::mapping_root())?;
    ensure!(message.contains("conf/app.yaml"), "missing path: {message}");
    ensure!(message.contains(expected), "missing '{expected}': {message}");
    Ok(())
}

#[test]
fn any_root_is_accepted_by_default() -> Result<()> {
    ensure!(load("notayaml")? == Node::from("notayaml"), "scalar root");
    Ok(())
}

#[test]
fn invalid_utf8_is_a_parse_error() {
    let err = load_document(&[0xff, 0xfe], Utf8Path::new("bin.yaml"), LoadOptions::default())
        .expect_err("invalid UTF-8 must fail");
    assert!(matches!(err, PatchError::Parse { .. }));
    assert!(err.to_string().contains("bin.yaml"));
}

#[test]
fn null_root_emits_nothing() -> Result<()> {
    ensure!(emit(&Node::Null).map_err(|err| anyhow!(err.to_string()))?.is_empty());
    Ok(())
}

#[rstest]
#[case::canonical_booleans("a: on\nb: OFF\n", &["a: true", "b: false"])]
#[case::lookalike_strings("a: 'true'\nb: '12'\nc: ''\n", &["a: 'true'", "b: '12'", "c: ''"])]
#[case::yaml11_lookalikes("a: '0o17'\nb: '1_000'\nc: 'y'\n", &["a: '0o17'", "b: '1_000'", "c: 'y'"])]
#[case::octal_written_in_decimal("mode: 0644\n", &["mode: 420"])]
#[case::floats("a: 1e3\nb: -.INF\n", &["a: 1000.0", "b: -.inf"])]
fn emission_uses_canonical_forms(#[case] text: &str, #[case] fragments: &[&str]) -> Result<()> {
    let node = load(text)?;
    let emitted = emit(&node).map_err(|err| anyhow!(err.to_string()))?;
    for fragment in fragments {
        ensure!(emitted.contains(fragment), "missing '{fragment}' in:\n{emitted}");
    }
    ensure!(load(&emitted)? == node, "emitted text did not reload:\n{emitted}");
    Ok(())
}

#[test]
fn nested_documents_round_trip() -> Result<()> {
    let text = concat!(
        "server:\n",
        "  host: example.org\n",
        "  ports: [80, 443]\n",
        "  tls: {enabled: yes, ciphers: []}\n",
        "features:\n",
        "  - name: beta\n",
        "    weight: 0.5\n",
        "  - ~\n",
        "empty: {}\n",
    );
    let node = load(text)?;
    let emitted = emit(&node).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(load(&emitted)? == node, "round trip changed tree:\n{emitted}");
    Ok(())
}

#[test]
fn documents_are_emitted_without_a_header() -> Result<()> {
    let emitted = emit(&load("name: api\n")?).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(emitted == "name: api\n", "unexpected output {emitted:?}");
    Ok(())
}

#[test]
fn quoted_signed_hex_survives_a_merge_and_reload() -> Result<()> {
    let document = load("k: '+0x1f'\n")?;
    let merged = crate::merge::merge_nodes(&document, &document);
    let emitted = emit(&merged).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(load(&emitted)? == document, "string became a number:\n{emitted}");
    Ok(())
}

#[test]
fn null_keys_are_rejected() -> Result<()> {
    let message = parse_failure("~: value\nnull: other\n", LoadOptions::default())?;
    ensure!(message.contains("null mapping keys are not supported"), "{message}");
    Ok(())
}

/// Seven nested levels of ten aliases each would expand to millions of nodes.
fn alias_bomb() -> String {
    let mut text = String::from("l0: &l0 [x, x, x, x, x, x, x, x, x, x]\n");
    for level in 1..=7 {
        let previous = level - 1;
        let aliases = vec![format!("*l{previous}"); 10].join(", ");
        text.push_str(&format!("l{level}: &l{level} [{aliases}]\n"));
    }
    text
}

#[test]
fn excessive_aliasing_is_rejected() -> Result<()> {
    let bomb = alias_bomb();
    ensure!(bomb.len() < 512, "fixture should stay small");
    let message = parse_failure(&bomb, LoadOptions::default())?;
    ensure!(message.contains("excessive aliasing"), "{message}");
    ensure!(message.contains("conf/app.yaml"), "missing path: {message}");
    Ok(())
}

#[test]
fn moderate_aliasing_is_accepted() -> Result<()> {
    let text = concat!(
        "base: &base {retries: 3, timeout: 10, hosts: [a, b, c]}\n",
        "one: *base\n",
        "two: *base\n",
        "three: *base\n",
    );
    let node = load(text)?;
    ensure!(node.get("three") == node.get("base"), "alias not expanded");
    Ok(())
}
