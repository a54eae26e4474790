//! Mixin calls, parameter binding and accessors.
//!
//! A call resolves its selector against the scope chain: frames are tried
//! innermost first and the first frame with any match wins. Every match of
//! that frame is expanded in document order and its evaluated rules replace
//! the call.

use crate::env::Env;
use crate::error::{EvalError, EvalResult};
use crate::node::{Declaration, Node};
use crate::ruleset::Ruleset;
use crate::scope::Scope;
use crate::selector::Selector;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Formal parameter of a mixin definition, `@a: 1px` or `@a`.
#[derive(Debug, Clone, PartialEq)]
pub struct MixinParam {
    pub name: String,
    pub default: Option<Node>,
}

impl MixinParam {
    pub fn new(name: impl Into<String>, default: Option<Node>) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }
}

/// Actual argument of a call; `name` is set for `@b: 100%`.
#[derive(Debug, Clone, PartialEq)]
pub struct MixinArg {
    pub name: Option<String>,
    pub value: Node,
}

impl MixinArg {
    pub fn positional(value: Node) -> Self {
        Self { name: None, value }
    }

    pub fn named(name: impl Into<String>, value: Node) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }
}

impl fmt::Display for MixinArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}: {}", name, self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

/// A ruleset found for a selector, with the rulesets the lookup descended
/// through to reach it (outermost first).
#[derive(Debug, Clone)]
pub struct MixinMatch {
    pub ruleset: Rc<Ruleset>,
    pub enclosing: Vec<Rc<Ruleset>>,
}

/// Finds the rulesets `selector` names, from the innermost frame that has
/// any. With `has_args`, plain rulesets are skipped: only definitions take
/// arguments.
pub(crate) fn resolve(selector: &Selector, scope: &Scope, has_args: bool) -> Vec<MixinMatch> {
    for frame in scope.frames() {
        let matches: Vec<MixinMatch> = frame
            .find(selector)
            .into_iter()
            .filter(|found| !has_args || found.ruleset.is_definition())
            .collect();
        if !matches.is_empty() {
            return matches;
        }
    }
    Vec::new()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MixinCall {
    pub selector: Selector,
    pub args: Vec<MixinArg>,
}

impl MixinCall {
    pub fn new(selector: Selector, args: Vec<MixinArg>) -> Self {
        Self { selector, args }
    }

    /// Rules produced by every matching mixin, in document order. No match
    /// is not an error and yields nothing.
    pub fn evaluate(&self, env: &mut Env, scope: &Scope) -> EvalResult<Vec<Node>> {
        let matches = resolve(&self.selector, scope, !self.args.is_empty());
        if matches.is_empty() {
            debug!(call = %self, "No mixin matched");
            return Ok(Vec::new());
        }

        debug!(call = %self, matches = matches.len(), "Expanding mixin");
        let mut rules = Vec::new();
        for found in &matches {
            let body = env.guarded(|| self.to_string(), |env| self.expand(found, env, scope))?;
            rules.extend(body);
        }
        Ok(rules)
    }

    fn expand(&self, found: &MixinMatch, env: &mut Env, scope: &Scope) -> EvalResult<Vec<Node>> {
        let mut body_scope = match found.ruleset.closure() {
            Some(closure) => scope.extend(closure),
            None => scope.clone(),
        };

        for enclosing in &found.enclosing {
            if let Some(params) = enclosing.params() {
                let defaults = self.bind(params, &[], env, scope)?;
                body_scope = body_scope.push(Rc::new(Ruleset::new(Vec::new(), defaults)));
            }
            body_scope = body_scope.push(Rc::clone(enclosing));
        }

        if let Some(params) = found.ruleset.params() {
            let bound = self.bind(params, &self.args, env, scope)?;
            body_scope = body_scope.push(Rc::new(Ruleset::new(Vec::new(), bound)));
        }

        let evaluated = found.ruleset.evaluate(env, &body_scope)?;
        Ok(evaluated.rules)
    }

    /// Binds `args` to `params`, giving one variable declaration per
    /// parameter. Values and defaults are evaluated in the caller's scope.
    fn bind(
        &self,
        params: &[MixinParam],
        args: &[MixinArg],
        env: &mut Env,
        scope: &Scope,
    ) -> EvalResult<Vec<Node>> {
        if args.len() > params.len() {
            return Err(EvalError::syntax(format!(
                "Expected at most {} arguments in '{}', found {}",
                params.len(),
                self,
                args.len()
            )));
        }

        let mut values: Vec<Option<Node>> = vec![None; params.len()];
        let mut named = false;
        for (position, arg) in args.iter().enumerate() {
            let slot = match &arg.name {
                Some(name) => {
                    named = true;
                    params
                        .iter()
                        .position(|param| &param.name == name)
                        .ok_or_else(|| {
                            EvalError::syntax(format!(
                                "Argument '{}' not found. in '{}'",
                                name, self
                            ))
                        })?
                }
                None if named => {
                    return Err(EvalError::syntax(format!(
                        "Positional arguments must appear before all named arguments. in '{}'",
                        self
                    )));
                }
                None => position,
            };
            values[slot] = Some(arg.value.evaluate(env, scope)?);
        }

        let mut bound = Vec::with_capacity(params.len());
        for (param, value) in params.iter().zip(values) {
            let value = match (value, &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => default.evaluate(env, scope)?,
                (None, None) => {
                    return Err(EvalError::syntax(format!(
                        "Missing value for argument '{}' in '{}'",
                        param.name, self
                    )));
                }
            };
            bound.push(Node::Declaration(Box::new(Declaration::new(
                param.name.clone(),
                value,
            ))));
        }
        Ok(bound)
    }
}

impl fmt::Display for MixinCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector)?;
        if !self.args.is_empty() {
            write!(f, "(")?;
            for (index, arg) in self.args.iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccessorKey {
    /// `['content']`
    Property(String),
    /// `[@trim]`
    Variable(String),
}

impl AccessorKey {
    pub fn name(&self) -> &str {
        match self {
            AccessorKey::Property(name) | AccessorKey::Variable(name) => name,
        }
    }
}

/// Reads one declaration of another ruleset: `.magic-box['content']`.
#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub selector: Selector,
    pub key: AccessorKey,
}

impl Accessor {
    pub fn new(selector: Selector, key: AccessorKey) -> Self {
        Self { selector, key }
    }

    pub fn evaluate(&self, env: &mut Env, scope: &Scope) -> EvalResult<Node> {
        let matches = resolve(&self.selector, scope, false);
        let found = matches.first().ok_or_else(|| {
            EvalError::syntax(format!("No ruleset matches '{}' in '{}'", self.selector, self))
        })?;

        let name = self.key.name();
        let declaration = found
            .ruleset
            .rules
            .iter()
            .rev()
            .filter_map(Node::as_declaration)
            .find(|declaration| declaration.name == name)
            .ok_or_else(|| {
                EvalError::syntax(format!("'{}' is not defined in '{}'", name, self.selector))
            })?;

        let inner = scope.push(Rc::clone(&found.ruleset));
        env.guarded(|| self.to_string(), |env| declaration.value.evaluate(env, &inner))
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            AccessorKey::Property(name) => write!(f, "{}['{}']", self.selector, name),
            AccessorKey::Variable(name) => write!(f, "{}[{}]", self.selector, name),
        }
    }
}
