//! Small statement helpers.

use crate::code::{Code, Render};
use crate::literal::Literal;
use crate::value::{BaseValue, Value};

/// The `<script>` tag that loads jQuery 3 from the official CDN.
pub const JQUERY3_SCRIPT: &str = r#"<script src="https://code.jquery.com/jquery-3.3.1.min.js" integrity="sha256-FgpCb/KJQlLNfOu91ta32o/NMZxltwRo8QtmkMRdAu8=" crossorigin="anonymous"></script>"#;

/// `<define> <left> = <right>`. The right side is written raw: strings
/// unquoted, nodes verbatim.
pub fn substitute(left: impl Render, right: impl Into<Literal>, define: &str) -> Code {
    Code::new(format!("{} {} = {}", define, left.to_code(), right.into().to_raw()))
}

/// `let <left> = <right>`
pub fn let_binding(left: impl Render, right: impl Into<Literal>) -> Code {
    substitute(left, right, "let")
}

/// `!(<value>)`, keeping the value's own type.
pub fn negative<V: Value>(value: &V) -> V {
    V::from_base(BaseValue::explicit(format!("!({})", value.to_code())))
}
