//! The node model: every element of a stylesheet tree, from literals up to
//! rulesets, together with the evaluate/render contract.
//!
//! `evaluate` resolves a node against an environment and scope and returns a
//! new node in normal form; literals return themselves. `to_css` renders an
//! evaluated node. Rendering a node that still needs evaluation is an
//! internal error, never a user diagnostic. `Display` gives the source-like
//! text used in diagnostics.

use crate::color::Color;
use crate::env::{Env, UnknownFunctionPolicy};
use crate::error::{EvalError, EvalResult};
use crate::mixin::{Accessor, MixinCall};
use crate::number::Number;
use crate::operation::Operation;
use crate::ruleset::Ruleset;
use crate::scope::Scope;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Keyword or raw text, rendered as-is.
    Text(String),
    Quoted(Quoted),
    Number(Number),
    Color(Color),
    /// Space separated values (`1px solid black`).
    Expression(Vec<Node>),
    /// Comma separated values.
    List(Vec<Node>),
    Variable(Variable),
    Operation(Box<Operation>),
    Call(Call),
    Accessor(Accessor),
    Declaration(Box<Declaration>),
    Comment(String),
    Import(Import),
    Ruleset(Rc<Ruleset>),
    MixinCall(MixinCall),
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Text(_) => "text",
            Node::Quoted(_) => "string",
            Node::Number(_) => "number",
            Node::Color(_) => "color",
            Node::Expression(_) => "expression",
            Node::List(_) => "list",
            Node::Variable(_) => "variable",
            Node::Operation(_) => "operation",
            Node::Call(_) => "function call",
            Node::Accessor(_) => "accessor",
            Node::Declaration(_) => "declaration",
            Node::Comment(_) => "comment",
            Node::Import(_) => "import",
            Node::Ruleset(_) => "ruleset",
            Node::MixinCall(_) => "mixin call",
        }
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Node::Declaration(declaration) => Some(declaration.as_ref()),
            _ => None,
        }
    }

    pub fn as_ruleset(&self) -> Option<&Rc<Ruleset>> {
        match self {
            Node::Ruleset(ruleset) => Some(ruleset),
            _ => None,
        }
    }

    /// True for nodes that are already in normal form.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Node::Text(_) | Node::Quoted(_) | Node::Number(_) | Node::Color(_) | Node::Comment(_)
        )
    }

    pub fn evaluate(&self, env: &mut Env, scope: &Scope) -> EvalResult<Node> {
        match self {
            Node::Text(_)
            | Node::Quoted(_)
            | Node::Number(_)
            | Node::Color(_)
            | Node::Comment(_)
            | Node::Import(_) => Ok(self.clone()),
            Node::Expression(items) => Ok(Node::Expression(evaluate_all(items, env, scope)?)),
            Node::List(items) => Ok(Node::List(evaluate_all(items, env, scope)?)),
            Node::Variable(variable) => variable.evaluate(env, scope),
            Node::Operation(operation) => operation.evaluate(env, scope),
            Node::Call(call) => call.evaluate(env, scope),
            Node::Accessor(accessor) => accessor.evaluate(env, scope),
            Node::Declaration(declaration) => {
                Ok(Node::Declaration(Box::new(declaration.evaluate(env, scope)?)))
            }
            Node::Ruleset(ruleset) => Ok(Node::Ruleset(Rc::new(ruleset.evaluate(env, scope)?))),
            Node::MixinCall(call) => Err(EvalError::internal(format!(
                "mixin call '{}' must be expanded by its enclosing ruleset",
                call
            ))),
        }
    }

    pub fn to_css(&self) -> EvalResult<String> {
        match self {
            Node::Text(text) | Node::Comment(text) => Ok(text.clone()),
            Node::Quoted(quoted) => Ok(quoted.to_css()),
            Node::Number(number) => Ok(number.to_css()),
            Node::Color(color) => Ok(color.to_css()),
            Node::Expression(items) => join_css(items, " "),
            Node::List(items) => join_css(items, ", "),
            Node::Declaration(declaration) => declaration.to_css(),
            Node::Import(import) => Ok(import.to_css()),
            Node::Variable(_) | Node::Operation(_) | Node::Call(_) | Node::Accessor(_) => {
                Err(EvalError::internal(format!(
                    "cannot render unevaluated {} '{}'",
                    self.kind(),
                    self
                )))
            }
            Node::Ruleset(_) | Node::MixinCall(_) => Err(EvalError::NotSupported {
                node: self.kind(),
            }),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(text) | Node::Comment(text) => write!(f, "{}", text),
            Node::Quoted(quoted) => write!(f, "{}", quoted.to_css()),
            Node::Number(number) => write!(f, "{}", number.to_css()),
            Node::Color(color) => write!(f, "{}", color.to_css()),
            Node::Expression(items) => write_joined(f, items, " "),
            Node::List(items) => write_joined(f, items, ", "),
            Node::Variable(variable) => write!(f, "{}", variable.name),
            Node::Operation(operation) => write!(f, "{}", operation),
            Node::Call(call) => {
                write!(f, "{}(", call.name)?;
                write_joined(f, &call.args, ", ")?;
                write!(f, ")")
            }
            Node::Accessor(accessor) => write!(f, "{}", accessor),
            Node::Declaration(declaration) => {
                write!(f, "{}: {}", declaration.name, declaration.value)
            }
            Node::Import(import) => write!(f, "{}", import.to_css()),
            Node::Ruleset(ruleset) => write!(f, "{}", ruleset),
            Node::MixinCall(call) => write!(f, "{}", call),
        }
    }
}

pub(crate) fn evaluate_all(items: &[Node], env: &mut Env, scope: &Scope) -> EvalResult<Vec<Node>> {
    items.iter().map(|item| item.evaluate(env, scope)).collect()
}

fn join_css(items: &[Node], separator: &str) -> EvalResult<String> {
    let rendered = items
        .iter()
        .map(Node::to_css)
        .collect::<EvalResult<Vec<_>>>()?;
    Ok(rendered.join(separator))
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Node], separator: &str) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// String literal, rendered with its original quote character.
#[derive(Debug, Clone, PartialEq)]
pub struct Quoted {
    pub value: String,
    pub quote: char,
}

impl Quoted {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote: '"',
        }
    }

    pub fn to_css(&self) -> String {
        format!("{}{}{}", self.quote, self.value, self.quote)
    }
}

/// Reference to a variable, name including the `@` sigil.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn evaluate(&self, env: &mut Env, scope: &Scope) -> EvalResult<Node> {
        let declaration = scope
            .variable(&self.name)
            .ok_or_else(|| EvalError::syntax(format!("variable {} is undefined", self.name)))?;
        if declaration.value.is_literal() {
            return Ok(declaration.value.clone());
        }

        env.guarded(
            || self.name.clone(),
            |env| declaration.value.evaluate(env, scope),
        )
    }
}

/// Function call such as `floor(4.8px)` or `rgba(0, 0, 0, 50%)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Node>,
}

impl Call {
    pub fn evaluate(&self, env: &mut Env, scope: &Scope) -> EvalResult<Node> {
        let args = evaluate_all(&self.args, env, scope)?;
        let name = self.name.to_ascii_lowercase();

        if let Some(function) = env.get_function(&name) {
            return function.call(&name, args);
        }

        match env.options().unknown_functions {
            UnknownFunctionPolicy::Error => {
                debug!(function = %self.name, "Unknown function");
                Err(EvalError::syntax(format!("Unknown function '{}'", self.name)))
            }
            UnknownFunctionPolicy::PassThrough => {
                warn!(function = %self.name, "Passing unknown function through as CSS");
                Ok(Node::Text(format!(
                    "{}({})",
                    self.name,
                    join_css(&args, ", ")?
                )))
            }
        }
    }
}

/// A `name: value` rule. Names starting with `@` declare variables, which
/// are never rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: Node,
    pub important: bool,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: Node) -> Self {
        Self {
            name: name.into(),
            value,
            important: false,
        }
    }

    pub fn is_variable(&self) -> bool {
        self.name.starts_with('@')
    }

    pub fn evaluate(&self, env: &mut Env, scope: &Scope) -> EvalResult<Declaration> {
        Ok(Declaration {
            name: self.name.clone(),
            value: self.value.evaluate(env, scope)?,
            important: self.important,
        })
    }

    pub fn to_css(&self) -> EvalResult<String> {
        let important = if self.important { " !important" } else { "" };
        Ok(format!("{}: {}{};", self.name, self.value.to_css()?, important))
    }
}

/// `@import` of another stylesheet. Imports of plain `.css` files stay in
/// the output; everything else is replaced by the imported tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub path: String,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn is_css(&self) -> bool {
        self.path.ends_with(".css")
    }

    pub fn to_css(&self) -> String {
        format!("@import \"{}\";", self.path)
    }
}
