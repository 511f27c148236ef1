//! Statement nodes: `return`, `if`, loops, flows and if/else chains.

use crate::code::{Code, Render};
use crate::error::{Error, Result};
use crate::literal::{Literal, impl_node_literal};

/// `return`, optionally with a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Return(Option<Literal>);

impl Return {
    pub fn new(value: impl Into<Literal>) -> Self {
        Self(Some(value.into()))
    }

    pub fn empty() -> Self {
        Self(None)
    }
}

impl Render for Return {
    fn to_code(&self) -> Code {
        match &self.0 {
            Some(Literal::Node(code)) => Code::new(format!("return {}", code)),
            Some(value) if value.is_truthy() => {
                Code::new(format!("return {}", value.to_operand()))
            }
            _ => Code::new("return"),
        }
    }
}

/// `if (condition){flow}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct If {
    condition: Code,
    flow: Code,
}

impl If {
    pub fn new(condition: impl Render, flow: impl Render) -> Self {
        Self {
            condition: condition.to_code(),
            flow: flow.to_code(),
        }
    }
}

impl Render for If {
    fn to_code(&self) -> Code {
        Code::new(format!("if ({}){{{}}}", self.condition, self.flow))
    }
}

/// `for(init;condition;after){flow}`; any part may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct For {
    init: Code,
    condition: Code,
    after: Code,
    flow: Code,
}

impl For {
    pub fn new(
        init: impl Render,
        condition: impl Render,
        after: impl Render,
        flow: impl Render,
    ) -> Self {
        Self {
            init: init.to_code(),
            condition: condition.to_code(),
            after: after.to_code(),
            flow: flow.to_code(),
        }
    }
}

impl Render for For {
    fn to_code(&self) -> Code {
        Code::new(format!(
            "for({};{};{}){{{}}}",
            self.init, self.condition, self.after, self.flow
        ))
    }
}

/// `while(condition){flow}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct While {
    condition: Code,
    flow: Code,
}

impl While {
    pub fn new(condition: impl Render, flow: impl Render) -> Self {
        Self {
            condition: condition.to_code(),
            flow: flow.to_code(),
        }
    }
}

impl Render for While {
    fn to_code(&self) -> Code {
        Code::new(format!("while({}){{{}}}", self.condition, self.flow))
    }
}

/// An ordered sequence of statements joined with `;`.
///
/// Nodes are immutable, so each action is rendered when it is added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flow {
    actions: Vec<Code>,
}

impl Flow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_actions<I, T>(actions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Render,
    {
        Self {
            actions: actions.into_iter().map(|a| a.to_code()).collect(),
        }
    }

    /// Append a statement. Host values go through [`Flow::try_add`]:
    ///
    /// ```compile_fail
    /// use jsrope::{Flow, Literal};
    /// Flow::new().add(Literal::from(3));
    /// ```
    pub fn add(&mut self, action: impl Render) -> &mut Self {
        self.actions.push(action.to_code());
        self
    }

    /// Append a statement, consuming and returning the flow.
    pub fn then(mut self, action: impl Render) -> Self {
        self.add(action);
        self
    }

    /// Append a dynamically typed action. Only nodes and raw text are
    /// statements; any other value is rejected.
    pub fn try_add(&mut self, action: Literal) -> Result<&mut Self> {
        match action {
            Literal::Node(code) => self.actions.push(code),
            Literal::Text(text) => self.actions.push(Code::new(text)),
            other => {
                return Err(Error::invalid(format!(
                    "flow action has to be a node or text, got {}",
                    other.to_source()
                )));
            }
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Render for Flow {
    fn to_code(&self) -> Code {
        let parts: Vec<&str> = self.actions.iter().map(Code::as_str).collect();
        Code::new(parts.join(";"))
    }
}

/// A branch condition in a [`Switch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    When(Code),
    /// The unconditional `else` branch.
    Else,
}

impl Condition {
    pub fn when(condition: impl Render) -> Self {
        Condition::When(condition.to_code())
    }
}

/// An if / else-if / else chain over ordered (condition, action) pairs.
///
/// Conditional branches render in insertion order. The `else` branch always
/// renders last wherever it was added; adding another replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Switch {
    branches: Vec<(Condition, Code)>,
}

impl Switch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, condition: Condition, action: impl Render) -> &mut Self {
        if condition == Condition::Else {
            self.branches.retain(|(c, _)| *c != Condition::Else);
        }
        self.branches.push((condition, action.to_code()));
        self
    }

    /// Add a conditional branch, consuming and returning the switch.
    pub fn case(mut self, condition: impl Render, action: impl Render) -> Self {
        self.add(Condition::when(condition), action);
        self
    }

    /// Set the `else` branch, consuming and returning the switch.
    pub fn otherwise(mut self, action: impl Render) -> Self {
        self.add(Condition::Else, action);
        self
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

impl Render for Switch {
    fn to_code(&self) -> Code {
        let mut code = String::new();
        let mut fallback = None;
        for (condition, action) in &self.branches {
            match condition {
                Condition::Else => fallback = Some(action),
                Condition::When(c) if code.is_empty() => {
                    code.push_str(&format!("if ({}){{{}}}", c, action));
                }
                Condition::When(c) => {
                    code.push_str(&format!("else if ({}){{{}}}", c, action));
                }
            }
        }
        if let Some(action) = fallback {
            if code.is_empty() {
                code.push_str(&format!("{{{}}}", action));
            } else {
                code.push_str(&format!("else {{{}}}", action));
            }
        }
        Code::new(code)
    }
}

impl_node_literal!(Return, If, For, While, Flow, Switch);
