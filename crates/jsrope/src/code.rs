//! Raw fragments of JavaScript source text.
//!
//! [`Code`] is the building block every other node renders through, and
//! [`Render`] is the single operation all nodes share.

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "beautify")]
use crate::beautify::Beautifier;
use crate::beautify::Beautify;

/// An immutable fragment of JavaScript source.
///
/// The text is used verbatim when substituted into a larger fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(String);

impl Code {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Code {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Code {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&String> for Code {
    fn from(text: &String) -> Self {
        Self(text.clone())
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

/// Anything that can render itself to JavaScript source.
///
/// Rendering is pure: calling [`Render::to_code`] twice on an unchanged node
/// yields the same text.
pub trait Render {
    /// Render this node to source text.
    fn to_code(&self) -> Code;

    /// Render and reformat with the default [`Beautifier`].
    #[cfg(feature = "beautify")]
    fn prettify(&self) -> Code {
        self.prettify_with(&Beautifier::default())
    }

    /// Render and reformat with a caller-chosen formatter.
    fn prettify_with(&self, formatter: &dyn Beautify) -> Code {
        Code::new(formatter.beautify(self.to_code().as_str()))
    }
}

impl Render for Code {
    fn to_code(&self) -> Code {
        self.clone()
    }
}

impl Render for str {
    fn to_code(&self) -> Code {
        Code::new(self)
    }
}

impl Render for String {
    fn to_code(&self) -> Code {
        Code::new(self.as_str())
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn to_code(&self) -> Code {
        (**self).to_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_renders_verbatim() {
        let code = Code::new("a + 1");
        assert_eq!(code.to_code(), code);
        assert_eq!(code.to_string(), "a + 1");
    }

    #[test]
    fn test_raw_text_renders() {
        assert_eq!("x = 1".to_code().as_str(), "x = 1");
        assert_eq!(String::from("y").to_code().as_str(), "y");
        assert!(Code::empty().is_empty());
    }

    #[test]
    fn test_render_is_idempotent() {
        let code = Code::from("f(1)");
        assert_eq!(code.to_code(), code.to_code());
    }
}
