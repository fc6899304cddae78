//! Scalar values and the plain-scalar resolution rules.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A normalised scalar value.
///
/// Scalars are produced once, at load time, by [`Scalar::resolve_plain`] or
/// from an explicit tag. Every later comparison and emission works on the
/// normalised value, so spellings such as `on` and `TRUE` are
/// indistinguishable after loading.
///
/// Floats compare by their canonical text, which makes `.nan` equal to itself
/// and keeps `Eq` and `Hash` consistent for mapping keys.
#[derive(Clone, Debug)]
pub enum Scalar {
    /// A boolean, canonically `true` or `false`.
    Bool(bool),
    /// A signed 64-bit integer, canonically written in decimal.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string, preserved verbatim.
    Str(String),
}

const TRUE_SPELLINGS: &[&str] = &[
    "y", "Y", "yes", "Yes", "YES", "true", "True", "TRUE", "on", "On", "ON",
];
const FALSE_SPELLINGS: &[&str] = &[
    "n", "N", "no", "No", "NO", "false", "False", "FALSE", "off", "Off", "OFF",
];
const NULL_SPELLINGS: &[&str] = &["", "~", "null", "Null", "NULL"];

/// Returns `true` when a plain scalar spells null.
#[must_use]
pub(crate) fn is_null_spelling(text: &str) -> bool {
    NULL_SPELLINGS.contains(&text)
}

impl Scalar {
    /// Resolve an untagged plain scalar into its normalised value.
    ///
    /// Resolution follows the YAML 1.1 rules: single-letter and word
    /// booleans, integers in decimal, `0x`, `0o`, `0b` or leading-zero octal
    /// with optional `_` separators, and decimal or special floats.
    ///
    /// Returns `None` when `text` spells null; the caller represents that as
    /// [`crate::Node::Null`].
    ///
    /// # Examples
    ///
    /// ```
    /// use yaml_overlay::Scalar;
    ///
    /// assert_eq!(Scalar::resolve_plain("off"), Some(Scalar::Bool(false)));
    /// assert_eq!(Scalar::resolve_plain("0x1f"), Some(Scalar::Int(31)));
    /// assert_eq!(Scalar::resolve_plain("0644"), Some(Scalar::Int(420)));
    /// assert_eq!(Scalar::resolve_plain("v1"), Some(Scalar::Str("v1".into())));
    /// assert_eq!(Scalar::resolve_plain("~"), None);
    /// ```
    #[must_use]
    pub fn resolve_plain(text: &str) -> Option<Self> {
        if is_null_spelling(text) {
            return None;
        }
        let resolved = parse_bool(text)
            .map(Self::Bool)
            .or_else(|| parse_int(text).map(Self::Int))
            .or_else(|| parse_float(text).map(Self::Float))
            .unwrap_or_else(|| Self::Str(text.to_owned()));
        Some(resolved)
    }

    /// The canonical textual form of the value.
    ///
    /// ```
    /// use yaml_overlay::Scalar;
    ///
    /// assert_eq!(Scalar::Bool(true).canonical(), "true");
    /// assert_eq!(Scalar::Float(2.0).canonical(), "2.0");
    /// assert_eq!(Scalar::Float(f64::NEG_INFINITY).canonical(), "-.inf");
    /// ```
    #[must_use]
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            Self::Bool(true) => Cow::Borrowed("true"),
            Self::Bool(false) => Cow::Borrowed("false"),
            Self::Int(value) => Cow::Owned(value.to_string()),
            Self::Float(value) => Cow::Owned(canonical_float(*value)),
            Self::Str(value) => Cow::Borrowed(value),
        }
    }

    /// Name of the scalar kind, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }

    /// Borrow the string payload when this scalar is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Return the boolean payload when this scalar is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Return the integer payload when this scalar is an integer.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    const fn discriminant(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Int(_) => 1,
            Self::Float(_) => 2,
            Self::Str(_) => 3,
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => canonical_float(*a) == canonical_float(*b),
            (Self::Str(a), Self::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.discriminant().hash(state);
        self.canonical().hash(state);
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Canonical text for a float: `.inf`, `-.inf`, `.nan`, or the shortest
/// round-trip form with a decimal point or exponent.
pub(crate) fn canonical_float(value: f64) -> String {
    if value.is_nan() {
        return ".nan".to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() {
            "-.inf".to_owned()
        } else {
            ".inf".to_owned()
        };
    }
    format!("{value:?}")
}

pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    if TRUE_SPELLINGS.contains(&text) {
        Some(true)
    } else if FALSE_SPELLINGS.contains(&text) {
        Some(false)
    } else {
        None
    }
}

pub(crate) fn parse_int(text: &str) -> Option<i64> {
    let plain = numeric_plain(text)?;
    let (negative, unsigned) = split_sign(&plain);
    let (radix, digits) = split_radix(unsigned)?;
    if digits.is_empty() {
        // A lone `0` is octal zero.
        return (radix == 8).then_some(0);
    }
    if !digits.chars().all(|ch| ch.is_digit(radix)) {
        return None;
    }
    // Parse with the sign attached so `i64::MIN` stays representable.
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.to_owned()
    };
    i64::from_str_radix(&signed, radix).ok()
}

pub(crate) fn parse_float(text: &str) -> Option<f64> {
    match text {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => return Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => return Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => return Some(f64::NAN),
        _ => {}
    }
    let plain = numeric_plain(text).unwrap_or_else(|| text.to_owned());
    if !is_decimal_float(&plain) {
        return None;
    }
    plain.parse::<f64>().ok()
}

/// Strip `_` separators from text that starts like a number.
///
/// Returns `None` when the first character is neither a digit nor a sign,
/// so `_1` and `.5_0` are left alone.
fn numeric_plain(text: &str) -> Option<String> {
    text.starts_with(|ch: char| ch.is_ascii_digit() || ch == '+' || ch == '-')
        .then(|| text.replace('_', ""))
}

/// Split a radix prefix off an unsigned integer literal.
fn split_radix(unsigned: &str) -> Option<(u32, &str)> {
    let Some(rest) = unsigned.strip_prefix('0') else {
        return (!unsigned.is_empty()).then_some((10, unsigned));
    };
    let prefixed = |radix| {
        rest.get(1..)
            .filter(|digits| !digits.is_empty())
            .map(|digits| (radix, digits))
    };
    match rest.chars().next() {
        Some('x' | 'X') => prefixed(16),
        Some('o' | 'O') => prefixed(8),
        Some('b' | 'B') => prefixed(2),
        _ => Some((8, rest)),
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    }
}

/// Matches `[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?`.
fn is_decimal_float(text: &str) -> bool {
    let (_, unsigned) = split_sign(text);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(index) => unsigned.split_at(index),
        None => (unsigned, ""),
    };
    let (whole, fraction) = match mantissa.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (mantissa, None),
    };
    let all_digits = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());
    let mantissa_ok = match fraction {
        Some(fraction) if whole.is_empty() => !fraction.is_empty() && all_digits(fraction),
        Some(fraction) => all_digits(whole) && all_digits(fraction),
        None => !whole.is_empty() && all_digits(whole),
    };
    let exponent_ok = exponent.is_empty() || {
        let (_, digits) = split_sign(exponent.get(1..).unwrap_or_default());
        !digits.is_empty() && all_digits(digits)
    };
    mantissa_ok && !whole.starts_with(['+', '-']) && exponent_ok
}
