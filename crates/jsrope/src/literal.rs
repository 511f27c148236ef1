//! Literal serializer: host values to JavaScript literal text.
//!
//! A host value is one of the [`Literal`] variants. Serialization checks the
//! variants in a fixed order (mapping, node, text, sequence, everything else)
//! and never fails: anything without a dedicated rule falls back to its
//! default textual representation.
//!
//! Mapping keys are written with Rust's `Debug` representation of the key
//! string. That is valid JavaScript for ordinary keys but is not a general
//! object-key encoder.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::code::Code;

/// A host value that can be serialized into JavaScript source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    /// Ordered key/value pairs, rendered as an object literal.
    Mapping(Vec<(String, Literal)>),
    /// An already rendered node, used verbatim.
    Node(Code),
    /// A host string, rendered double-quoted.
    Text(String),
    /// An ordered sequence, rendered as an array literal.
    Sequence(Vec<Literal>),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Literal {
    /// Build a mapping from ordered pairs.
    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Literal>,
    {
        Literal::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a sequence from ordered items.
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Literal>,
    {
        Literal::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Serialize to literal source text. See [`escape`].
    pub fn to_source(&self) -> String {
        escape(self)
    }

    /// Render as the right-hand side of an operator.
    ///
    /// Nodes keep their own text and strings become single-quoted JavaScript
    /// strings; everything else serializes as a literal.
    pub fn to_operand(&self) -> String {
        match self {
            Literal::Node(code) => code.to_string(),
            Literal::Text(s) => quote_single(s),
            other => escape(other),
        }
    }

    /// Text as written: strings unquoted, nodes verbatim, everything else
    /// serialized as a literal.
    pub fn to_raw(&self) -> String {
        match self {
            Literal::Text(s) => s.clone(),
            other => escape(other),
        }
    }

    /// Truthiness of the host value, used where an absent/empty value must
    /// render differently from a present one.
    pub fn is_truthy(&self) -> bool {
        match self {
            Literal::Mapping(entries) => !entries.is_empty(),
            Literal::Node(_) => true,
            Literal::Text(s) => !s.is_empty(),
            Literal::Sequence(items) => !items.is_empty(),
            Literal::Int(i) => *i != 0,
            Literal::Float(f) => *f != 0.0 && !f.is_nan(),
            Literal::Bool(b) => *b,
            Literal::Null => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[(String, Literal)]> {
        match self {
            Literal::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a key in a mapping, first match in order.
    pub fn get(&self, key: &str) -> Option<&Literal> {
        self.as_mapping()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    fn default_repr(&self) -> String {
        match self {
            Literal::Int(i) => i.to_string(),
            Literal::Float(f) if f.is_nan() => "NaN".to_string(),
            Literal::Float(f) if f.is_infinite() => {
                if *f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
            }
            Literal::Float(f) => f.to_string(),
            Literal::Bool(b) => b.to_string(),
            Literal::Null => "null".to_string(),
            other => escape(other),
        }
    }
}

/// Serialize a host value to JavaScript literal text.
pub fn escape(value: &Literal) -> String {
    match value {
        Literal::Mapping(entries) => {
            let body: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{:?}: {}", k, escape(v)))
                .collect();
            format!("{{{}}}", body.join(", "))
        }
        Literal::Node(code) => code.to_string(),
        Literal::Text(s) => quote_double(s),
        Literal::Sequence(items) => {
            let body: Vec<String> = items.iter().map(escape).collect();
            format!("[{}]", body.join(", "))
        }
        other => other.default_repr(),
    }
}

/// Quote a string as a double-quoted literal, valid as both JavaScript and
/// JSON.
fn quote_double(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Quote a string as a single-quoted JavaScript string literal.
pub fn quote_single(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Implement `From<T>` and `From<&T>` into [`Literal::Node`] for node types.
macro_rules! impl_node_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for $crate::literal::Literal {
                fn from(node: $ty) -> Self {
                    $crate::literal::Literal::Node($crate::code::Render::to_code(&node))
                }
            }

            impl From<&$ty> for $crate::literal::Literal {
                fn from(node: &$ty) -> Self {
                    $crate::literal::Literal::Node($crate::code::Render::to_code(node))
                }
            }
        )*
    };
}
pub(crate) use impl_node_literal;

impl_node_literal!(Code);

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Text(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Text(s)
    }
}

impl From<&String> for Literal {
    fn from(s: &String) -> Self {
        Literal::Text(s.clone())
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

macro_rules! impl_int_literal {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Literal {
                fn from(i: $ty) -> Self {
                    Literal::Int(i64::from(i))
                }
            }
        )*
    };
}

impl_int_literal!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Literal {
    fn from(i: u64) -> Self {
        i64::try_from(i).map_or(Literal::Float(i as f64), Literal::Int)
    }
}

impl From<usize> for Literal {
    fn from(i: usize) -> Self {
        i64::try_from(i).map_or(Literal::Float(i as f64), Literal::Int)
    }
}

impl From<f32> for Literal {
    fn from(f: f32) -> Self {
        Literal::Float(f64::from(f))
    }
}

impl From<f64> for Literal {
    fn from(f: f64) -> Self {
        Literal::Float(f)
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map_or(Literal::Null, Into::into)
    }
}

impl<T: Into<Literal>> From<Vec<T>> for Literal {
    fn from(items: Vec<T>) -> Self {
        Literal::sequence(items)
    }
}

impl<T: Into<Literal>, const N: usize> From<[T; N]> for Literal {
    fn from(items: [T; N]) -> Self {
        Literal::sequence(items)
    }
}

/// Sets serialize in their sorted iteration order.
impl<T: Into<Literal>> From<BTreeSet<T>> for Literal {
    fn from(items: BTreeSet<T>) -> Self {
        Literal::sequence(items)
    }
}

impl From<serde_json::Value> for Literal {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Literal::Null,
            Value::Bool(b) => Literal::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Literal::Int(i),
                None => Literal::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Literal::Text(s),
            Value::Array(items) => Literal::sequence(items),
            Value::Object(map) => Literal::mapping(map),
        }
    }
}
