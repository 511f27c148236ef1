//! `$.ajax(...)` call descriptors.
//!
//! Settings are restricted to the jQuery option names in [`AJAX_SETTINGS`].
//! Each name has a fixed serialization strategy ([`SettingKind`]).

use crate::code::{Code, Render};
use crate::error::{Error, Result};
use crate::literal::{Literal, escape, impl_node_literal};

/// How a setting value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKind {
    /// `true`/`false` from the value's truthiness.
    Bool,
    /// Through the literal serializer.
    Literal,
    /// `converters`: mapping of quoted keys to verbatim values.
    Converters,
    /// `statusCode`: mapping of quoted keys to verbatim values.
    StatusCode,
}

/// Recognized settings, in jQuery's documentation order.
pub const AJAX_SETTINGS: [(&str, SettingKind); 29] = [
    ("accepts", SettingKind::Literal),
    ("async", SettingKind::Bool),
    ("beforeSend", SettingKind::Literal),
    ("cache", SettingKind::Bool),
    ("contents", SettingKind::Literal),
    ("contentType", SettingKind::Literal),
    ("context", SettingKind::Literal),
    ("converters", SettingKind::Converters),
    ("crossDomain", SettingKind::Bool),
    ("data", SettingKind::Literal),
    ("dataFilter", SettingKind::Literal),
    ("dataType", SettingKind::Literal),
    ("global", SettingKind::Bool),
    ("headers", SettingKind::Literal),
    ("ifModified", SettingKind::Bool),
    ("isLocal", SettingKind::Bool),
    ("jsonp", SettingKind::Literal),
    ("jsonpCallback", SettingKind::Literal),
    ("mimeType", SettingKind::Literal),
    ("password", SettingKind::Literal),
    ("processData", SettingKind::Bool),
    ("scriptCharset", SettingKind::Literal),
    ("statusCode", SettingKind::StatusCode),
    ("timeout", SettingKind::Literal),
    ("traditional", SettingKind::Bool),
    ("username", SettingKind::Literal),
    ("xhr", SettingKind::Literal),
    ("xhrFields", SettingKind::Literal),
    ("method", SettingKind::Literal),
];

/// Strategy for a setting name, `None` when it is not recognized.
pub fn setting_kind(key: &str) -> Option<SettingKind> {
    AJAX_SETTINGS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, kind)| *kind)
}

/// An Ajax request with optional `done`/`fail`/`always` continuations.
#[derive(Debug, Clone, PartialEq)]
pub struct Ajax {
    url: String,
    settings: Vec<(String, Literal, SettingKind)>,
    done: Option<Code>,
    fail: Option<Code>,
    always: Option<Code>,
}

impl Ajax {
    /// Validate settings against [`AJAX_SETTINGS`].
    ///
    /// An unrecognized key is an error unless `ignore_error` is set, in which
    /// case it is dropped. `converters` and `statusCode` must be mappings.
    pub fn new<I, K>(url: impl Into<String>, settings: I, ignore_error: bool) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Literal)>,
        K: Into<String>,
    {
        let mut accepted = Vec::new();
        for (key, value) in settings {
            let key = key.into();
            let Some(kind) = setting_kind(&key) else {
                if ignore_error {
                    tracing::debug!(key = %key, "skipping unrecognized ajax setting");
                    continue;
                }
                return Err(Error::invalid(format!(
                    "'{}' for the key of Ajax settings is not allowed",
                    key
                )));
            };
            if matches!(kind, SettingKind::Converters | SettingKind::StatusCode)
                && value.as_mapping().is_none()
            {
                return Err(Error::invalid(format!(
                    "Ajax setting '{}' has to be a mapping",
                    key
                )));
            }
            accepted.push((key, value, kind));
        }
        Ok(Self {
            url: url.into(),
            settings: accepted,
            done: None,
            fail: None,
            always: None,
        })
    }

    /// Build from a [`Literal::Mapping`] of settings.
    pub fn from_mapping(
        url: impl Into<String>,
        settings: Literal,
        ignore_error: bool,
    ) -> Result<Self> {
        match settings {
            Literal::Mapping(entries) => Self::new(url, entries, ignore_error),
            other => Err(Error::invalid(format!(
                "Ajax settings have to be a mapping, got {}",
                other.to_source()
            ))),
        }
    }

    pub fn done(mut self, continuation: impl Render) -> Self {
        self.done = Some(continuation.to_code());
        self
    }

    pub fn fail(mut self, continuation: impl Render) -> Self {
        self.fail = Some(continuation.to_code());
        self
    }

    pub fn always(mut self, continuation: impl Render) -> Self {
        self.always = Some(continuation.to_code());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// A retained setting value.
    pub fn setting(&self, key: &str) -> Option<&Literal> {
        self.settings
            .iter()
            .find(|(k, _, _)| k == key)
            .map(|(_, v, _)| v)
    }

    pub fn setting_keys(&self) -> impl Iterator<Item = &str> {
        self.settings.iter().map(|(k, _, _)| k.as_str())
    }
}

fn nested_mapping(entries: &[(String, Literal)]) -> String {
    let body: Vec<String> = entries
        .iter()
        .map(|(k, v)| format!("{:?}: {}", k, v.to_raw()))
        .collect();
    format!("{{{}}}", body.join(", "))
}

fn render_setting(key: &str, value: &Literal, kind: SettingKind) -> String {
    let value = match kind {
        SettingKind::Bool => value.is_truthy().to_string(),
        SettingKind::Literal => escape(value),
        SettingKind::Converters | SettingKind::StatusCode => {
            nested_mapping(value.as_mapping().unwrap_or_default())
        }
    };
    format!("{}: {}", key, value)
}

impl Render for Ajax {
    fn to_code(&self) -> Code {
        let mut entries = vec![format!("url: {}", escape(&Literal::Text(self.url.clone())))];
        entries.extend(
            self.settings
                .iter()
                .map(|(k, v, kind)| render_setting(k, v, *kind)),
        );
        let mut code = format!("$.ajax({{{}}})", entries.join(", "));
        if let Some(done) = &self.done {
            code.push_str(&format!(".done({})", done));
        }
        if let Some(fail) = &self.fail {
            code.push_str(&format!(".fail({})", fail));
        }
        if let Some(always) = &self.always {
            code.push_str(&format!(".always({})", always));
        }
        Code::new(code)
    }
}

impl_node_literal!(Ajax);
