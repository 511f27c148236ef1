//! Reformatting of rendered source text.
//!
//! [`Beautify`] is the seam to any external formatter. With the `beautify`
//! feature, [`Beautifier`] provides a small built-in re-indenter that only
//! ever changes whitespace.

use serde::{Deserialize, Serialize};

/// A formatter for rendered JavaScript.
pub trait Beautify {
    /// Formatter name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Reformat `source`. Must keep the same tokens in the same order.
    fn beautify(&self, source: &str) -> String;
}

/// Options for [`Beautifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeautifyOptions {
    /// Indent characters per nesting level.
    pub indent_size: usize,
    pub indent_char: char,
    /// Terminate the output with a newline.
    pub end_with_newline: bool,
}

impl Default for BeautifyOptions {
    fn default() -> Self {
        Self {
            indent_size: 4,
            indent_char: ' ',
            end_with_newline: false,
        }
    }
}

impl BeautifyOptions {
    /// Parse options from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    #[cfg(feature = "beautify")]
    fn indent_unit(&self) -> String {
        std::iter::repeat_n(self.indent_char, self.indent_size).collect()
    }
}

/// Brace-driven re-indenter.
///
/// Breaks lines after `{`, before `}` and after a `;` that is not inside
/// parentheses or brackets. String literals are copied verbatim.
#[cfg(feature = "beautify")]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Beautifier {
    options: BeautifyOptions,
}

#[cfg(feature = "beautify")]
impl Beautifier {
    pub fn new(options: BeautifyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BeautifyOptions {
        &self.options
    }
}

#[cfg(feature = "beautify")]
impl Beautify for Beautifier {
    fn name(&self) -> &'static str {
        "jsrope"
    }

    fn beautify(&self, source: &str) -> String {
        let mut printer = Printer::new(self.options.indent_unit());
        printer.run(source);
        let mut output = printer.output;
        let trimmed = output.trim_end().len();
        output.truncate(trimmed);
        if self.options.end_with_newline {
            output.push('\n');
        }
        tracing::trace!(lines = output.lines().count(), "beautified source");
        output
    }
}

#[cfg(feature = "beautify")]
struct Printer {
    output: String,
    unit: String,
    indent: usize,
    /// Open parens/brackets per brace level.
    depth: Vec<usize>,
    newline_pending: bool,
}

#[cfg(feature = "beautify")]
impl Printer {
    fn new(unit: String) -> Self {
        Self {
            output: String::new(),
            unit,
            indent: 0,
            depth: vec![0],
            newline_pending: false,
        }
    }

    fn newline(&mut self) {
        let trimmed = self.output.trim_end_matches([' ', '\t']).len();
        self.output.truncate(trimmed);
        self.output.push('\n');
        for _ in 0..self.indent {
            self.output.push_str(&self.unit);
        }
    }

    /// Flush a pending line break before visible output.
    fn begin_token(&mut self) {
        if self.newline_pending {
            self.newline_pending = false;
            self.newline();
        }
    }

    fn parens(&mut self) -> &mut usize {
        if self.depth.is_empty() {
            self.depth.push(0);
        }
        let last = self.depth.len() - 1;
        &mut self.depth[last]
    }

    fn run(&mut self, source: &str) {
        let chars: Vec<char> = source.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c.is_whitespace() {
                if !self.newline_pending && !self.output.ends_with(char::is_whitespace) {
                    self.output.push(' ');
                }
                i += 1;
                continue;
            }
            if c != '}' {
                self.begin_token();
            }
            match c {
                '\'' | '"' | '`' => {
                    i = self.copy_string(&chars, i);
                    continue;
                }
                '{' => {
                    self.output.push('{');
                    self.indent += 1;
                    self.depth.push(0);
                    self.newline_pending = true;
                }
                '}' => {
                    self.indent = self.indent.saturating_sub(1);
                    self.depth.pop();
                    let empty = self.newline_pending && self.output.ends_with('{');
                    self.newline_pending = false;
                    if !empty {
                        self.newline();
                    }
                    self.output.push('}');
                    i = self.after_close(&chars, i + 1);
                    continue;
                }
                '(' | '[' => {
                    *self.parens() += 1;
                    self.output.push(c);
                }
                ')' | ']' => {
                    let parens = self.parens();
                    *parens = parens.saturating_sub(1);
                    self.output.push(c);
                }
                ';' => {
                    self.output.push(';');
                    if *self.parens() == 0 {
                        self.newline_pending = true;
                    }
                }
                _ => self.output.push(c),
            }
            i += 1;
        }
    }

    /// Copy a quoted literal starting at `start`; returns the index after it.
    fn copy_string(&mut self, chars: &[char], start: usize) -> usize {
        let quote = chars[start];
        self.output.push(quote);
        let mut i = start + 1;
        while i < chars.len() {
            let c = chars[i];
            self.output.push(c);
            i += 1;
            if c == '\\' {
                if let Some(&escaped) = chars.get(i) {
                    self.output.push(escaped);
                    i += 1;
                }
            } else if c == quote {
                break;
            }
        }
        i
    }

    /// Decide whether the line continues after a `}` ending at `next`.
    fn after_close(&mut self, chars: &[char], next: usize) -> usize {
        let mut j = next;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        let Some(&c) = chars.get(j) else {
            return j;
        };
        if matches!(c, ')' | ',' | '.' | ';' | '(' | ']') {
            return j;
        }
        let rest: String = chars[j..chars.len().min(j + 5)].iter().collect();
        let is_else = rest.starts_with("else")
            && !chars
                .get(j + 4)
                .is_some_and(|c| c.is_alphanumeric() || *c == '_' || *c == '$');
        if is_else {
            self.output.push(' ');
        } else {
            self.newline_pending = true;
        }
        j
    }
}
