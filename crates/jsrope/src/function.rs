//! Function definitions and invocations.

use crate::code::{Code, Render};
use crate::error::{Error, Result};
use crate::literal::{Literal, impl_node_literal};
use crate::value::Object;

/// Ordered parameter list with optional default-value source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, Option<Code>)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter without a default.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.0.push((name.into(), None));
        self
    }

    /// Add a parameter whose default is the given source text.
    pub fn with_default(mut self, name: impl Into<String>, value: impl Render) -> Self {
        self.0.push((name.into(), Some(value.to_code())));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Code>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// A function definition. An empty name makes it anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    name: String,
    arguments: Params,
    body: Code,
}

impl Function {
    /// Define a function. The name must be empty or an identifier, and
    /// parameter names must be unique identifiers.
    pub fn new(name: impl Into<String>, arguments: Params, body: impl Render) -> Result<Self> {
        let name = name.into();
        if !name.is_empty() && !is_identifier(&name) {
            return Err(Error::invalid(format!(
                "function name '{}' is not an identifier",
                name
            )));
        }
        for (i, (param, _)) in arguments.0.iter().enumerate() {
            if !is_identifier(param) {
                return Err(Error::invalid(format!(
                    "parameter '{}' of function '{}' is not an identifier",
                    param, name
                )));
            }
            if arguments.0[..i].iter().any(|(p, _)| p == param) {
                return Err(Error::invalid(format!(
                    "parameter '{}' of function '{}' is declared twice",
                    param, name
                )));
            }
        }
        Ok(Self {
            name,
            arguments,
            body: body.to_code(),
        })
    }

    pub fn anonymous(arguments: Params, body: impl Render) -> Result<Self> {
        Self::new("", arguments, body)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &Params {
        &self.arguments
    }

    /// Replace the default of a declared parameter.
    pub fn set_default(&mut self, param: &str, value: Option<Code>) -> Result<()> {
        let slot = self
            .arguments
            .0
            .iter_mut()
            .find(|(p, _)| p == param)
            .ok_or_else(|| {
                Error::invalid(format!("function '{}' has no parameter '{}'", self.name, param))
            })?;
        slot.1 = value;
        Ok(())
    }

    /// Start an invocation of this function.
    pub fn call(&self) -> Invocation<'_> {
        Invocation {
            function: self,
            positional: Vec::new(),
            keyword: Vec::new(),
        }
    }

    fn params_source(&self) -> String {
        let params: Vec<String> = self
            .arguments
            .iter()
            .map(|(name, default)| match default {
                Some(value) => format!("{}={}", name, value),
                None => name.to_string(),
            })
            .collect();
        params.join(", ")
    }
}

impl Render for Function {
    fn to_code(&self) -> Code {
        if self.name.is_empty() {
            Code::new(format!("function({}) {{{}}}", self.params_source(), self.body))
        } else {
            Code::new(format!(
                "function {}({}) {{{}}}",
                self.name,
                self.params_source(),
                self.body
            ))
        }
    }
}

/// Arguments collected for a call to a [`Function`].
///
/// Positional arguments bind in declaration order, keyword arguments by
/// name. Unbound parameters render as their default text, or nothing.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    function: &'a Function,
    positional: Vec<Literal>,
    keyword: Vec<(String, Literal)>,
}

impl Invocation<'_> {
    /// Bind the next positional argument.
    ///
    /// Host strings are quoted as JavaScript strings. Pass raw source, such
    /// as a variable name, as [`Code`] or a value node.
    pub fn arg(mut self, value: impl Into<Literal>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Bind a parameter by name. Values render as for [`Invocation::arg`].
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.keyword.push((name.into(), value.into()));
        self
    }

    /// Bind the arguments and render the call expression.
    pub fn finish(self) -> Result<Object> {
        let function = self.function;
        let params = &function.arguments.0;
        if self.positional.len() > params.len() {
            return Err(Error::invalid(format!(
                "function '{}' takes {} arguments but {} were given",
                function.name,
                params.len(),
                self.positional.len()
            )));
        }

        let mut bound: Vec<Option<String>> = params
            .iter()
            .map(|(_, default)| default.as_ref().map(Code::to_string))
            .collect();
        let mut edited = vec![false; params.len()];

        for (i, value) in self.positional.iter().enumerate() {
            bound[i] = Some(value.to_operand());
            edited[i] = true;
        }
        for (name, value) in &self.keyword {
            let i = params.iter().position(|(p, _)| p == name).ok_or_else(|| {
                Error::invalid(format!(
                    "function '{}' has no parameter '{}'",
                    function.name, name
                ))
            })?;
            if edited[i] {
                return Err(Error::DuplicateBinding(name.clone()));
            }
            bound[i] = Some(value.to_operand());
            edited[i] = true;
        }

        tracing::debug!(
            function = %function.name,
            positional = self.positional.len(),
            keyword = self.keyword.len(),
            "bound function call"
        );

        let args: Vec<String> = bound.into_iter().map(Option::unwrap_or_default).collect();
        let args = args.join(", ");
        if function.name.is_empty() {
            Ok(Object::explicit(format!("({})({})", function.to_code(), args)))
        } else {
            Ok(Object::explicit(format!("{}({})", function.name, args)))
        }
    }
}

impl_node_literal!(Function);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Flow, Return};

    fn sample() -> Function {
        Function::new(
            "f",
            Params::new().required("a").with_default("b", "1"),
            Flow::new().then(Return::new(Object::new("a + b"))),
        )
        .unwrap()
    }

    #[test]
    fn test_definition() {
        assert_eq!(
            sample().to_code().as_str(),
            "function f(a, b=1) {return a + b}"
        );
    }

    #[test]
    fn test_positional_binding_uses_defaults() {
        let call = sample().call().arg(5).finish().unwrap();
        assert_eq!(call.to_code().as_str(), "f(5, 1)");
    }

    #[test]
    fn test_keyword_binding() {
        let call = sample().call().arg(5).kwarg("b", 9).finish().unwrap();
        assert_eq!(call.to_code().as_str(), "f(5, 9)");
    }

    #[test]
    fn test_duplicate_binding() {
        let err = sample().call().arg(5).kwarg("a", 9).finish().unwrap_err();
        assert_eq!(err, Error::DuplicateBinding("a".into()));
    }

    #[test]
    fn test_unbound_without_default_is_empty() {
        let call = sample().call().kwarg("b", 2).finish().unwrap();
        assert_eq!(call.to_code().as_str(), "f(, 2)");
    }

    #[test]
    fn test_bad_calls() {
        let f = sample();
        assert!(matches!(
            f.call().arg(1).arg(2).arg(3).finish(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            f.call().kwarg("c", 1).finish(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_anonymous_is_immediately_invoked() {
        let f = Function::anonymous(Params::new().required("x"), "console.log(x)").unwrap();
        assert_eq!(f.to_code().as_str(), "function(x) {console.log(x)}");
        let call = f.call().arg("hi").finish().unwrap();
        assert_eq!(
            call.to_code().as_str(),
            "(function(x) {console.log(x)})('hi')"
        );
    }

    #[test]
    fn test_strings_are_quoted_and_code_is_raw() {
        let f = sample();
        let call = f.call().arg("x").kwarg("b", Code::new("y")).finish().unwrap();
        assert_eq!(call.to_code().as_str(), "f('x', y)");
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            Function::new("not valid", Params::new(), ""),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Function::new("f", Params::new().required("a").required("a"), ""),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Function::new("f", Params::new().required("1a"), ""),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_set_default() {
        let mut f = sample();
        f.set_default("a", Some(Code::new("0"))).unwrap();
        assert_eq!(f.call().finish().unwrap().to_code().as_str(), "f(0, 1)");
        assert!(f.set_default("z", None).is_err());
    }
}
