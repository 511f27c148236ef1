//! jQuery element references, element construction and event handlers.

use std::fmt;
use std::str::FromStr;

use crate::code::{Code, Render};
use crate::error::{Error, Result};
use crate::literal::{Literal, impl_node_literal, quote_single};
use crate::value::{Object, Str};

/// How [`Element::by`] interprets its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locator {
    CssSelector,
    /// Prefixes the key with `#`.
    Id,
    Tag,
}

impl Locator {
    pub const ALL: [Locator; 3] = [Locator::CssSelector, Locator::Id, Locator::Tag];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locator::CssSelector => "css_selector",
            Locator::Id => "id",
            Locator::Tag => "tag",
        }
    }

    fn selector(&self, key: &str) -> String {
        match self {
            Locator::Id => format!("#{}", key),
            Locator::CssSelector | Locator::Tag => key.to_string(),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Locator::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| Error::invalid(format!("'{}' for 'method' of Element::by", s)))
    }
}

/// Description of an element to create: tag, content and attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct TagSpec {
    tag: String,
    content: Option<Literal>,
    class: Option<Literal>,
    id: Option<String>,
    name: Option<String>,
    extra: Vec<(String, Literal)>,
}

impl TagSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            content: None,
            class: None,
            id: None,
            name: None,
            extra: Vec::new(),
        }
    }

    /// Inner content: text is quoted, nodes are evaluated at runtime.
    pub fn content(mut self, content: impl Into<Literal>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// A class string, or a sequence of class names. Null omits the
    /// attribute.
    pub fn class(mut self, class: impl Into<Literal>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Any other attribute. A null value omits the attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The opening and closing HTML tags.
    pub fn generate_tag(&self) -> (String, String) {
        let mut attrs = Vec::new();
        let class = self.class.as_ref().and_then(|class| match class {
            Literal::Null => None,
            Literal::Sequence(items) => Some(
                items
                    .iter()
                    .map(Literal::to_raw)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            other => Some(other.to_raw()),
        });
        push_attr(&mut attrs, "class", class);
        for (key, value) in &self.extra {
            if *value != Literal::Null {
                push_attr(&mut attrs, key, Some(value.to_raw()));
            }
        }
        push_attr(&mut attrs, "id", self.id.clone());
        push_attr(&mut attrs, "name", self.name.clone());

        let open = if attrs.is_empty() {
            format!("<{}>", self.tag)
        } else {
            format!("<{} {}>", self.tag, attrs.join(" "))
        };
        (open, format!("</{}>", self.tag))
    }

    /// An expression evaluating to the element's outer HTML.
    pub fn create_element(&self) -> Str {
        let (open, close) = self.generate_tag();
        match &self.content {
            None => Str::explicit(quote_single(&format!("{}{}", open, close))),
            Some(content) => Str::explicit(format!(
                "{} + {} + {}",
                quote_single(&open),
                content.to_operand(),
                quote_single(&close)
            )),
        }
    }
}

fn push_attr(attrs: &mut Vec<String>, key: &str, value: Option<String>) {
    if let Some(value) = value {
        attrs.push(format!("{}=\"{}\"", key, value.replace('"', "&quot;")));
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Target {
    Selector(String),
    Construct(TagSpec),
}

/// A jQuery-wrapped element: either a selector lookup or a newly created
/// element. The mode is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    target: Target,
}

impl Element {
    /// `$('<selector>')`
    pub fn selector(selector: impl Into<String>) -> Self {
        Self {
            target: Target::Selector(selector.into()),
        }
    }

    /// Look up by a method name: `css_selector`, `id` or `tag`.
    pub fn by(method: &str, key: &str) -> Result<Self> {
        Ok(Self::by_locator(method.parse()?, key))
    }

    pub fn by_locator(locator: Locator, key: &str) -> Self {
        Self::selector(locator.selector(key))
    }

    pub fn by_id(key: &str) -> Self {
        Self::by_locator(Locator::Id, key)
    }

    pub fn by_css_selector(key: &str) -> Self {
        Self::by_locator(Locator::CssSelector, key)
    }

    pub fn by_tag(key: &str) -> Self {
        Self::by_locator(Locator::Tag, key)
    }

    /// Create a new element: `$(<outer html>)`.
    pub fn new(spec: TagSpec) -> Self {
        Self {
            target: Target::Construct(spec),
        }
    }

    /// The construction spec, for created elements.
    pub fn tag_spec(&self) -> Option<&TagSpec> {
        match &self.target {
            Target::Construct(spec) => Some(spec),
            Target::Selector(_) => None,
        }
    }

    /// Attach a handler: `<element>.on('<event>',function(e){<flow>})`.
    pub fn on(&self, event: impl Into<String>, flow: impl Render) -> EventHandler {
        EventHandler {
            element: self.to_code(),
            event: event.into(),
            handler: flow.to_code(),
        }
    }

    fn getter(&self, method: &str) -> Code {
        Code::new(format!("{}.{}()", self.to_code(), method))
    }

    fn setter(&self, method: &str, value: Literal) -> Object {
        Object::explicit(format!("{}.{}({})", self.to_code(), method, value.to_operand()))
    }

    /// `.val()`
    pub fn get_value(&self) -> Str {
        Str::explicit(self.getter("val"))
    }

    /// `.val(value)`
    pub fn change_value(&self, value: impl Into<Literal>) -> Object {
        self.setter("val", value.into())
    }

    /// `.html()`
    pub fn get_inner_html(&self) -> Str {
        Str::explicit(self.getter("html"))
    }

    /// `.html(html)`
    pub fn change_inner_html(&self, html: impl Into<Literal>) -> Object {
        self.setter("html", html.into())
    }

    /// `.serialize()`
    pub fn serialize(&self) -> Str {
        Str::explicit(self.getter("serialize"))
    }

    /// `.append(content)`
    pub fn append(&self, content: impl Into<Literal>) -> Object {
        self.setter("append", content.into())
    }
}

impl Render for Element {
    fn to_code(&self) -> Code {
        match &self.target {
            Target::Selector(selector) => Code::new(format!("$({})", quote_single(selector))),
            Target::Construct(spec) => Code::new(format!("$({})", spec.create_element().to_code())),
        }
    }
}

/// An event binding on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventHandler {
    element: Code,
    event: String,
    handler: Code,
}

impl EventHandler {
    pub fn event(&self) -> &str {
        &self.event
    }
}

impl Render for EventHandler {
    fn to_code(&self) -> Code {
        Code::new(format!(
            "{}.on({},function(e){{{}}})",
            self.element,
            quote_single(&self.event),
            self.handler
        ))
    }
}

impl_node_literal!(Element, EventHandler);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Flow;
    use crate::value::Value;

    #[test]
    fn test_lookup_methods() {
        assert_eq!(Element::by_id("x").to_code().as_str(), "$('#x')");
        assert_eq!(Element::by_tag("p").to_code().as_str(), "$('p')");
        assert_eq!(
            Element::by_css_selector("div > .item").to_code().as_str(),
            "$('div > .item')"
        );
        assert_eq!(Element::by("id", "y").unwrap(), Element::by_id("y"));
        assert_eq!(Element::by("tag", "a").unwrap(), Element::by_tag("a"));
    }

    #[test]
    fn test_unknown_lookup_method() {
        let err = Element::by("xpath", "//a").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("xpath"));
    }

    #[test]
    fn test_change_value() {
        assert_eq!(
            Element::by_id("x").change_value("hi").to_code().as_str(),
            "$('#x').val('hi')"
        );
        assert_eq!(
            Element::by_id("x").change_value("it's").to_code().as_str(),
            r"$('#x').val('it\'s')"
        );
    }

    #[test]
    fn test_accessors() {
        let input = Element::by_id("name");
        let p = Element::by_tag("p");
        assert_eq!(input.get_value().to_code().as_str(), "$('#name').val()");
        assert_eq!(p.get_inner_html().to_code().as_str(), "$('p').html()");
        assert_eq!(
            p.change_inner_html(input.get_value()).to_code().as_str(),
            "$('p').html($('#name').val())"
        );
        assert_eq!(
            Element::by_tag("form").serialize().to_code().as_str(),
            "$('form').serialize()"
        );
        assert_eq!(
            input.get_value().to_int().to_code().as_str(),
            "parseInt($('#name').val())"
        );
    }

    #[test]
    fn test_event_handler() {
        let handler = Element::by_id("btn").on("click", Flow::new().then("a()").then("b()"));
        assert_eq!(
            handler.to_code().as_str(),
            "$('#btn').on('click',function(e){a();b()})"
        );
    }

    #[test]
    fn test_generate_tag() {
        let spec = TagSpec::new("input")
            .class(vec!["big", "wide"])
            .attr("value", "say \"hi\"")
            .attr("size", 3)
            .attr("hidden", Literal::Null)
            .id("name")
            .name("user");
        let (open, close) = spec.generate_tag();
        assert_eq!(
            open,
            r#"<input class="big wide" value="say &quot;hi&quot;" size="3" id="name" name="user">"#
        );
        assert_eq!(close, "</input>");
    }

    #[test]
    fn test_null_class_is_omitted() {
        let (open, _) = TagSpec::new("p").class(None::<&str>).generate_tag();
        assert_eq!(open, "<p>");
        let (open, _) = TagSpec::new("p").class(Some("note")).id("a").generate_tag();
        assert_eq!(open, r#"<p class="note" id="a">"#);
    }

    #[test]
    fn test_create_element() {
        let plain = TagSpec::new("p").class("note");
        assert_eq!(
            plain.create_element().to_code().as_str(),
            r#"'<p class="note"></p>'"#
        );

        let with_text = TagSpec::new("p").content("it's");
        assert_eq!(
            with_text.create_element().to_code().as_str(),
            r"'<p>' + 'it\'s' + '</p>'"
        );

        let dynamic = TagSpec::new("li").content(Element::by_id("x").get_value());
        assert_eq!(
            Element::new(dynamic).to_code().as_str(),
            "$('<li>' + $('#x').val() + '</li>')"
        );
    }

    #[test]
    fn test_constructed_element_methods() {
        let list = Element::by_tag("ul");
        let item = Element::new(TagSpec::new("li").content("one"));
        assert!(item.tag_spec().is_some());
        assert!(list.tag_spec().is_none());
        assert_eq!(
            list.append(&item).to_code().as_str(),
            "$('ul').append($('<li>' + 'one' + '</li>'))"
        );
    }
}
