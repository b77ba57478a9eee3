//! Tolerant XML extraction helpers.
//!
//! The API emits namespace-prefixed, inconsistently cased SOAP-style XML.
//! These helpers look elements up by ASCII-case-insensitive *local* name so
//! decoders can ignore both concerns, and they implement the decoder
//! contract shared by every mapper in this crate:
//!
//! - an absent child element decodes to `None`, never an error,
//! - text is whitespace-trimmed,
//! - numeric coercion takes the leading numeric prefix of the text and
//!   falls back to zero for non-numeric content (the upstream contract the
//!   original service consumers relied on; see `DESIGN.md`).

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use roxmltree::{Document, Node};

use crate::error::{LinkshareError, Result};

/// Timestamp format used by product-search `createdon` fields.
const DATE_FORMAT: &str = "%Y-%m-%d/%H:%M:%S";

static INT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+").expect("int prefix pattern is valid"));

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("float prefix pattern is valid")
});

/// Parses a response body into an XML document.
///
/// # Errors
///
/// Returns [`LinkshareError::MalformedResponse`] if the body is not
/// well-formed XML. This is the one hard failure in the decoding layer;
/// everything below it degrades to `None` instead.
pub(crate) fn parse_document(body: &str) -> Result<Document<'_>> {
    Document::parse(body).map_err(|e| LinkshareError::MalformedResponse(e.to_string()))
}

/// Finds the first child element whose local name matches, ignoring case
/// and namespace prefixes.
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name().eq_ignore_ascii_case(name))
}

/// Iterates over all child elements with the given local name.
pub(crate) fn children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name().eq_ignore_ascii_case(name))
}

/// Returns the trimmed text of a child element, or `None` if the element
/// is absent.
///
/// A present but empty element yields `Some("")`, matching the upstream
/// distinction between "element missing" and "element empty".
pub(crate) fn text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name).map(|n| n.text().unwrap_or("").trim().to_owned())
}

/// Returns the trimmed value of an attribute, matched case-insensitively,
/// or `None` if the attribute is absent.
pub(crate) fn attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attributes()
        .find(|a| a.name().eq_ignore_ascii_case(name))
        .map(|a| a.value().trim().to_owned())
}

/// Decodes a child element as an integer.
///
/// Absent element → `None`; present element → `Some(coerced value)`,
/// where non-numeric content coerces to zero.
pub(crate) fn int(node: Node<'_, '_>, name: &str) -> Option<i64> {
    text(node, name).map(|t| coerce_int(&t))
}

/// Decodes a child element as a float, with the same coercion rule as
/// [`int`].
pub(crate) fn float(node: Node<'_, '_>, name: &str) -> Option<f64> {
    text(node, name).map(|t| coerce_float(&t))
}

/// Decodes a child element as a `YYYY-MM-DD/HH:MM:SS` timestamp.
///
/// Absent or empty elements yield `None`. A present but malformed
/// timestamp also yields `None`, keeping the decoder contract uniform.
pub(crate) fn datetime(node: Node<'_, '_>, name: &str) -> Option<NaiveDateTime> {
    let value = text(node, name)?;
    if value.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(&value, DATE_FORMAT).ok()
}

/// Integer coercion with leading-prefix semantics.
///
/// `"12"` → 12, `"12abc"` → 12, `"abc"` → 0, `""` → 0.
pub(crate) fn coerce_int(value: &str) -> i64 {
    let value = value.trim_start();
    INT_PREFIX
        .find(value)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Float coercion with leading-prefix semantics.
///
/// `"2.40"` → 2.40, `"1.5e3"` → 1500.0, `"abc"` → 0.0.
pub(crate) fn coerce_float(value: &str) -> f64 {
    let value = value.trim_start();
    FLOAT_PREFIX
        .find(value)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}
