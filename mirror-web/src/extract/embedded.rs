//! Link candidates from the page's embedded client-state JSON.
//!
//! Any object with non-empty string `url` and `title` fields is a candidate,
//! wherever it sits in the tree. Matching an object does not stop the walk:
//! its children are visited too, so nested candidates are found as well.
//!
//! `serde_json` is built with `preserve_order`, so object members are walked
//! in document order and the output order is deterministic.

use mirror_common::Link;
use scraper::{Html, Selector};
use serde_json::{Map, Value};

use super::EMBEDDED_DATA_SELECTOR;
use crate::error::EmbeddedDataError;

/// Callbacks for [`walk`]. Each node is reported before its children.
pub trait JsonVisitor {
    fn visit_object(&mut self, _object: &Map<String, Value>) {}
    fn visit_array(&mut self, _items: &[Value]) {}
    fn visit_scalar(&mut self, _value: &Value) {}
}

/// Depth-first, pre-order traversal of `value`.
///
/// Recursion depth is bounded by `serde_json`'s own nesting limit on parse.
pub fn walk<V: JsonVisitor + ?Sized>(value: &Value, visitor: &mut V) {
    match value {
        Value::Object(object) => {
            visitor.visit_object(object);
            for child in object.values() {
                walk(child, visitor);
            }
        }
        Value::Array(items) => {
            visitor.visit_array(items);
            for item in items {
                walk(item, visitor);
            }
        }
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {
            visitor.visit_scalar(value)
        }
    }
}

/// Collects `{ "url", "title" }` objects as links.
#[derive(Debug, Default)]
pub struct LinkCollector {
    links: Vec<Link>,
}

impl LinkCollector {
    pub fn into_links(self) -> Vec<Link> {
        self.links
    }
}

impl JsonVisitor for LinkCollector {
    fn visit_object(&mut self, object: &Map<String, Value>) {
        let url = object.get("url").and_then(Value::as_str).unwrap_or("");
        let title = object
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim();
        if !url.is_empty() && !title.is_empty() {
            self.links.push(Link::new(title, url));
        }
    }
}

/// Candidates from a raw JSON payload.
pub fn candidates_from_json(raw: &str) -> Result<Vec<Link>, EmbeddedDataError> {
    let value: Value = serde_json::from_str(raw)?;
    let mut collector = LinkCollector::default();
    walk(&value, &mut collector);
    Ok(collector.into_links())
}

/// Candidates from the document's embedded-data element.
///
/// A page without the element, or with an empty one, yields no candidates.
pub fn embedded_candidates(doc: &Html) -> Result<Vec<Link>, EmbeddedDataError> {
    let selector =
        Selector::parse(EMBEDDED_DATA_SELECTOR).map_err(|e| EmbeddedDataError::Selector {
            selector: EMBEDDED_DATA_SELECTOR,
            message: e.to_string(),
        })?;

    let raw: String = match doc.select(&selector).next() {
        Some(el) => el.text().collect(),
        None => return Ok(Vec::new()),
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    candidates_from_json(&raw)
}
