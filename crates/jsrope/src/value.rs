//! Typed expression nodes and their shared operator surface.
//!
//! Every value type wraps a [`BaseValue`]: a text fragment plus an
//! `explicit` flag. The [`Value`] trait supplies the operators. Operators do
//! not track precedence; `a.add(b)` is always `"{a} + {b}"` with single spaces,
//! and callers group sub-expressions themselves when nesting.
//!
//! Comparisons always yield a [`Bool`], and the three coercions yield an
//! explicit [`Int`], [`Str`] or [`Float`].

use serde::Serialize;

use crate::code::{Code, Render};
use crate::literal::{Literal, impl_node_literal, quote_single};

/// Text plus the explicit flag shared by all value types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BaseValue {
    text: Code,
    explicit: bool,
}

impl BaseValue {
    /// An implicit value: a literal or variable reference.
    pub fn new(text: impl Into<Code>) -> Self {
        Self {
            text: text.into(),
            explicit: false,
        }
    }

    /// A value whose text is already valid source and needs no quoting.
    pub fn explicit(text: impl Into<Code>) -> Self {
        Self {
            text: text.into(),
            explicit: true,
        }
    }

    pub fn text(&self) -> &Code {
        &self.text
    }

    pub fn is_explicit(&self) -> bool {
        self.explicit
    }
}

fn binary(left: &impl Render, op: &str, right: Literal) -> BaseValue {
    BaseValue::explicit(format!("{} {} {}", left.to_code(), op, right.to_operand()))
}

fn call(function: &str, arg: &impl Render) -> BaseValue {
    BaseValue::explicit(format!("{}({})", function, arg.to_code()))
}

/// Operators shared by every expression node.
pub trait Value: Render + Sized {
    fn base(&self) -> &BaseValue;

    fn from_base(base: BaseValue) -> Self;

    fn is_explicit(&self) -> bool {
        self.base().is_explicit()
    }

    fn add(&self, other: impl Into<Literal>) -> Self {
        Self::from_base(binary(self, "+", other.into()))
    }

    fn subtract(&self, other: impl Into<Literal>) -> Self {
        Self::from_base(binary(self, "-", other.into()))
    }

    fn multiply(&self, other: impl Into<Literal>) -> Self {
        Self::from_base(binary(self, "*", other.into()))
    }

    fn divide(&self, other: impl Into<Literal>) -> Self {
        Self::from_base(binary(self, "/", other.into()))
    }

    fn modulo(&self, other: impl Into<Literal>) -> Self {
        Self::from_base(binary(self, "%", other.into()))
    }

    fn pow(&self, power: impl Into<Literal>) -> Self {
        Self::from_base(binary(self, "**", power.into()))
    }

    /// `self ** power % modulo`
    fn pow_mod(&self, power: impl Into<Literal>, modulo: impl Into<Literal>) -> Self {
        self.pow(power).modulo(modulo)
    }

    /// `Math.floor(self / other)`
    fn floor_divide(&self, other: impl Into<Literal>) -> Self {
        Self::from_base(call("Math.floor", &self.divide(other)))
    }

    fn add_assign(&self, other: impl Into<Literal>) -> Self {
        Self::from_base(binary(self, "+=", other.into()))
    }

    fn subtract_assign(&self, other: impl Into<Literal>) -> Self {
        Self::from_base(binary(self, "-=", other.into()))
    }

    fn multiply_assign(&self, other: impl Into<Literal>) -> Self {
        Self::from_base(binary(self, "*=", other.into()))
    }

    fn divide_assign(&self, other: impl Into<Literal>) -> Self {
        Self::from_base(binary(self, "/=", other.into()))
    }

    fn pow_assign(&self, other: impl Into<Literal>) -> Self {
        Self::from_base(binary(self, "**=", other.into()))
    }

    /// `===`
    fn strict_eq(&self, other: impl Into<Literal>) -> Bool {
        Bool::new(binary(self, "===", other.into()).text)
    }

    /// `==`
    fn loose_eq(&self, other: impl Into<Literal>) -> Bool {
        Bool::new(binary(self, "==", other.into()).text)
    }

    fn greater_than(&self, other: impl Into<Literal>) -> Bool {
        Bool::new(binary(self, ">", other.into()).text)
    }

    fn less_than(&self, other: impl Into<Literal>) -> Bool {
        Bool::new(binary(self, "<", other.into()).text)
    }

    fn greater_eq(&self, other: impl Into<Literal>) -> Bool {
        Bool::new(binary(self, ">=", other.into()).text)
    }

    fn less_eq(&self, other: impl Into<Literal>) -> Bool {
        Bool::new(binary(self, "<=", other.into()).text)
    }

    fn negate(&self) -> Self {
        Self::from_base(BaseValue::explicit(format!("-{}", self.to_code())))
    }

    fn abs(&self) -> Self {
        Self::from_base(call("Math.abs", self))
    }

    /// `parseInt(self)`
    fn to_int(&self) -> Int {
        Int(call("parseInt", self))
    }

    /// `String(self)`
    fn to_str(&self) -> Str {
        Str(call("String", self))
    }

    /// `parseFloat(self)`
    fn to_float(&self) -> Float {
        Float(call("parseFloat", self))
    }
}

macro_rules! value_type {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
            pub struct $name(BaseValue);

            impl $name {
                /// Wrap explicit source text.
                pub fn explicit(text: impl Into<Code>) -> Self {
                    Self(BaseValue::explicit(text))
                }
            }

            impl_node_literal!($name);
        )*
    };
}

macro_rules! impl_value {
    ($($name:ident),*) => {
        $(
            impl Value for $name {
                fn base(&self) -> &BaseValue {
                    &self.0
                }

                fn from_base(base: BaseValue) -> Self {
                    Self(base)
                }
            }
        )*
    };
}

value_type! {
    /// A generic value: a variable, property, or call result.
    Object,
    /// A number expected to hold an integer.
    Int,
    /// A floating-point number.
    Float,
    /// A string. Implicit strings are quoted on render.
    Str,
    /// A boolean condition.
    Bool,
    /// An array literal or array-valued expression.
    Array,
}

macro_rules! verbatim_render {
    ($($name:ident),*) => {
        $(
            impl Render for $name {
                fn to_code(&self) -> Code {
                    self.0.text.clone()
                }
            }
        )*
    };
}

verbatim_render!(Object, Int, Float, Bool, Array);
impl_value!(Object, Int, Float, Str, Array);

impl Object {
    pub fn new(text: impl Into<Code>) -> Self {
        Self(BaseValue::new(text))
    }
}

impl Int {
    pub fn new(text: impl Into<Code>) -> Self {
        Self(BaseValue::new(text))
    }

    pub fn literal(value: i64) -> Self {
        Self(BaseValue::new(value.to_string()))
    }
}

impl Float {
    pub fn new(text: impl Into<Code>) -> Self {
        Self(BaseValue::new(text))
    }

    pub fn literal(value: f64) -> Self {
        Self(BaseValue::new(Literal::Float(value).to_source()))
    }
}

impl Str {
    /// A string literal holding `text`; rendered single-quoted.
    pub fn new(text: impl Into<Code>) -> Self {
        Self(BaseValue::new(text))
    }
}

impl Render for Str {
    fn to_code(&self) -> Code {
        if self.0.explicit {
            self.0.text.clone()
        } else {
            Code::new(quote_single(self.0.text.as_str()))
        }
    }
}

impl Array {
    /// An array literal; each item goes through the literal serializer.
    pub fn new<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Literal>,
    {
        Self(BaseValue::new(Literal::sequence(items).to_source()))
    }

    /// A reference to an array held elsewhere, e.g. a variable.
    pub fn reference(text: impl Into<Code>) -> Self {
        Self(BaseValue::new(text))
    }
}

impl Bool {
    /// A condition. The text is parenthesized unless it is `true`/`false`,
    /// a call chain, or already a single parenthesized group.
    pub fn new(text: impl Into<Code>) -> Self {
        let text = text.into();
        if needs_group(text.as_str()) {
            Self(BaseValue::new(format!("({})", text)))
        } else {
            Self(BaseValue::new(text))
        }
    }

    pub fn literal(value: bool) -> Self {
        Self(BaseValue::new(if value { "true" } else { "false" }))
    }

    /// A condition built from any other value.
    pub fn from_value(value: &impl Value) -> Self {
        Self::new(value.to_code())
    }

    /// `!(self)`
    pub fn not(&self) -> Bool {
        self.negate()
    }
}

impl Value for Bool {
    fn base(&self) -> &BaseValue {
        &self.0
    }

    fn from_base(base: BaseValue) -> Self {
        Self(base)
    }

    fn negate(&self) -> Self {
        Self::explicit(format!("!({})", self.0.text))
    }
}

fn needs_group(text: &str) -> bool {
    let text = text.trim();
    !(text.is_empty()
        || text == "true"
        || text == "false"
        || is_call_chain(text)
        || is_grouped(text))
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// Position of the `)` matching the `(` at `open`, skipping string literals.
fn closing_paren(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = open;
    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
        } else {
            match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'(' => depth += 1,
                b')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }
    None
}

fn is_grouped(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.first() == Some(&b'(') && closing_paren(bytes, 0) == Some(bytes.len() - 1)
}

/// `f(x)`, `a.b(x)`, `$('#id').val()`: a callee path followed by call
/// groups, with the last group closing the text.
fn is_call_chain(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    let mut called = false;
    loop {
        let start = i;
        while i < bytes.len() && (is_ident_byte(bytes[i]) || bytes[i] == b'.') {
            i += 1;
        }
        if (i == start && !called) || i == bytes.len() || bytes[i] != b'(' {
            return false;
        }
        match closing_paren(bytes, i) {
            Some(end) if end + 1 == bytes.len() => return true,
            Some(end) => {
                i = end + 1;
                called = true;
            }
            None => return false,
        }
    }
}
