//! Request-side decoding of data sent by an [`Ajax`] descriptor.
//!
//! The `data` setting of a descriptor doubles as a template: every leaf is a
//! form field whose wire name is derived from its key path, the way jQuery
//! encodes nested objects (`user[name]`, `user[tags][]`). Decoding looks each
//! field up in a [`FormSource`] and rebuilds the template with the values.

use std::fmt;

use crate::ajax::Ajax;
use crate::literal::Literal;

/// Whether a leaf carries one value or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// A sequence leaf, sent as repeated `name[]` fields.
    Array,
    Scalar,
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafKind::Array => f.write_str("array"),
            LeafKind::Scalar => f.write_str("scalar"),
        }
    }
}

/// Path from the template root to one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    pub segments: Vec<String>,
    pub kind: LeafKind,
}

impl KeyPath {
    /// The field name on the wire.
    pub fn field_name(&self) -> String {
        let mut name = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i == 0 {
                name.push_str(segment);
            } else {
                name.push('[');
                name.push_str(segment);
                name.push(']');
            }
        }
        if self.kind == LeafKind::Array {
            name.push_str("[]");
        }
        name
    }
}

/// Every leaf of a template mapping, depth first in mapping order.
///
/// A non-mapping template has no leaves.
pub fn key_paths(template: &Literal) -> Vec<KeyPath> {
    let mut paths = Vec::new();
    collect_paths(template, &mut Vec::new(), &mut paths);
    paths
}

fn collect_paths(node: &Literal, parent: &mut Vec<String>, out: &mut Vec<KeyPath>) {
    let Some(entries) = node.as_mapping() else {
        return;
    };
    for (key, value) in entries {
        parent.push(key.clone());
        match value {
            Literal::Sequence(_) => out.push(KeyPath {
                segments: parent.clone(),
                kind: LeafKind::Array,
            }),
            Literal::Mapping(_) => collect_paths(value, parent, out),
            _ => out.push(KeyPath {
                segments: parent.clone(),
                kind: LeafKind::Scalar,
            }),
        }
        parent.pop();
    }
}

/// The HTTP method a descriptor's request is sent with.
///
/// Script requests are always `GET`; otherwise the `method` setting, or
/// `GET` when unset.
pub fn request_method(ajax: &Ajax) -> String {
    if ajax.setting("dataType").and_then(Literal::as_text) == Some("script") {
        return "GET".to_string();
    }
    ajax.setting("method")
        .and_then(Literal::as_text)
        .unwrap_or("GET")
        .to_string()
}

/// Submitted request fields.
pub trait FormSource {
    /// First value of a field.
    fn get(&self, method: &str, field: &str) -> Option<String>;

    /// All values of a repeated field.
    fn get_list(&self, method: &str, field: &str) -> Vec<String>;
}

/// In-memory request fields: query-string pairs and form-body pairs.
///
/// `GET` requests read the query, every other method reads the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    query: Vec<(String, String)>,
    body: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((field.into(), value.into()));
        self
    }

    pub fn with_body(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.body.push((field.into(), value.into()));
        self
    }

    fn pairs(&self, method: &str) -> &[(String, String)] {
        if method.eq_ignore_ascii_case("GET") {
            &self.query
        } else {
            &self.body
        }
    }
}

impl FormSource for FormData {
    fn get(&self, method: &str, field: &str) -> Option<String> {
        self.pairs(method)
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.clone())
    }

    fn get_list(&self, method: &str, field: &str) -> Vec<String> {
        self.pairs(method)
            .iter()
            .filter(|(k, _)| k == field)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

/// Rebuild `template` with each leaf replaced by its submitted value.
///
/// Scalar leaves become text, or null when the field is missing. Array
/// leaves become a sequence of text, empty when the field is missing.
pub fn decode(template: &Literal, method: &str, source: &impl FormSource) -> Literal {
    let mut data = template.clone();
    for path in key_paths(template) {
        let field = path.field_name();
        tracing::debug!(field = %field, kind = %path.kind, "form leaf lookup");
        let value = match path.kind {
            LeafKind::Array => Literal::sequence(source.get_list(method, &field)),
            LeafKind::Scalar => source
                .get(method, &field)
                .map_or(Literal::Null, Literal::Text),
        };
        set_path(&mut data, &path.segments, value);
    }
    data
}

/// Decode the descriptor's `data` setting with its own request method.
pub fn decode_ajax_data(ajax: &Ajax, source: &impl FormSource) -> Option<Literal> {
    let template = ajax.setting("data")?;
    Some(decode(template, &request_method(ajax), source))
}

fn set_path(node: &mut Literal, segments: &[String], value: Literal) {
    let Some((head, rest)) = segments.split_first() else {
        *node = value;
        return;
    };
    if !matches!(node, Literal::Mapping(_)) {
        *node = Literal::Mapping(Vec::new());
    }
    if let Literal::Mapping(entries) = node {
        match entries.iter_mut().find(|(k, _)| k == head) {
            Some((_, child)) => set_path(child, rest, value),
            None => {
                let mut child = Literal::Null;
                set_path(&mut child, rest, value);
                entries.push((head.clone(), child));
            }
        }
    }
}
