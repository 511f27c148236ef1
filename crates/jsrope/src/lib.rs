//! Build JavaScript from Rust values.
//!
//! `jsrope` is a small algebra of expression and statement nodes that render
//! to JavaScript source text. Values are combined with operator methods,
//! grouped into control flow, and rendered once at the end.
//!
//! # Architecture
//!
//! ```text
//! Host values           Nodes                    Output
//! ────────────    ─────────────────────    ──────────────────
//! &str, i64, ─┐   Int / Str / Bool ...  ─┐
//! Vec, JSON   ─┼─> Literal ──> Flow / If ─┼─> Code ─> Beautify
//! Code        ─┘   Element / Ajax       ─┘   (to_code) (prettify)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use jsrope::{Element, Flow, If, Int, Render, Value};
//!
//! let input = Element::by_id("n");
//! let p = Element::by_tag("p");
//! let n = input.get_value().to_int();
//! let handler = input.on(
//!     "keyup",
//!     If::new(n.greater_than(10), Flow::new().then(p.change_inner_html("big"))),
//! );
//! assert_eq!(
//!     handler.to_code().as_str(),
//!     "$('#n').on('keyup',function(e){if ((parseInt($('#n').val()) > 10)){$('p').html('big')}})"
//! );
//! ```
//!
//! # Rendering Rules
//!
//! - Operators never add parentheses; `a.add(b)` is `a + b`.
//! - Comparisons return a [`Bool`], which groups its text in parentheses.
//! - Host strings passed to operators and calls become single-quoted
//!   JavaScript strings; strings inside literals are double-quoted.
//! - Mapping keys use Rust's `Debug` string form.

pub mod ajax;
pub mod beautify;
pub mod browser;
pub mod code;
pub mod control;
pub mod date;
pub mod element;
pub mod error;
pub mod function;
pub mod literal;
pub mod util;
pub mod value;

#[cfg(feature = "form")]
pub mod form;

// Re-exports: core
pub use code::{Code, Render};
pub use error::{Error, Result};
pub use literal::{Literal, escape, quote_single};

// Re-exports: values
pub use value::{Array, BaseValue, Bool, Float, Int, Object, Str, Value};

// Re-exports: statements
pub use control::{Condition, Flow, For, If, Return, Switch, While};
pub use function::{Function, Invocation, Params};

// Re-exports: DOM and requests
pub use ajax::{AJAX_SETTINGS, Ajax, SettingKind, setting_kind};
pub use element::{Element, EventHandler, Locator, TagSpec};

// Re-exports: helpers
pub use browser::{Console, Util};
pub use date::Date;
pub use util::{JQUERY3_SCRIPT, let_binding, negative, substitute};

pub use beautify::{Beautify, BeautifyOptions};
#[cfg(feature = "beautify")]
pub use beautify::Beautifier;

#[cfg(feature = "form")]
pub use form::{
    FormData, FormSource, KeyPath, LeafKind, decode, decode_ajax_data, key_paths, request_method,
};
