use crate::env::Env;
use crate::error::{EvalError, EvalResult};
use crate::mixin::{MixinMatch, MixinParam};
use crate::node::{Declaration, Node};
use crate::scope::Scope;
use crate::selector::{combine_paths, render_paths, Selector, SelectorPath};
use once_cell::unsync::OnceCell;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, instrument};

/// A block of rules under a selector group; the stylesheet root has no
/// selectors.
///
/// A ruleset with a parameter list (even an empty one) is a mixin
/// definition: it never renders and only contributes through calls. Trees
/// are not mutated once built, so the lookup caches below are filled on
/// first use and stay valid.
pub struct Ruleset {
    pub selectors: Vec<Selector>,
    pub rules: Vec<Node>,
    root: bool,
    params: Option<Vec<MixinParam>>,
    closure: Option<Scope>,
    variables: OnceCell<HashMap<String, usize>>,
    rulesets: OnceCell<Vec<Rc<Ruleset>>>,
    lookups: RefCell<HashMap<String, Vec<MixinMatch>>>,
}

impl Ruleset {
    pub fn new(selectors: Vec<Selector>, rules: Vec<Node>) -> Self {
        Self {
            selectors,
            rules,
            root: false,
            params: None,
            closure: None,
            variables: OnceCell::new(),
            rulesets: OnceCell::new(),
            lookups: RefCell::new(HashMap::new()),
        }
    }

    pub fn root(rules: Vec<Node>) -> Self {
        Self {
            root: true,
            ..Self::new(Vec::new(), rules)
        }
    }

    pub fn definition(selectors: Vec<Selector>, params: Vec<MixinParam>, rules: Vec<Node>) -> Self {
        Self {
            params: Some(params),
            ..Self::new(selectors, rules)
        }
    }

    pub fn is_root(&self) -> bool {
        self.root
    }

    pub fn is_definition(&self) -> bool {
        self.params.is_some()
    }

    pub fn params(&self) -> Option<&[MixinParam]> {
        self.params.as_deref()
    }

    /// Scope captured when the enclosing ruleset was evaluated.
    pub fn closure(&self) -> Option<&Scope> {
        self.closure.as_ref()
    }

    /// Same ruleset with a different rule list and empty caches.
    fn with_rules(&self, rules: Vec<Node>) -> Ruleset {
        Ruleset {
            selectors: self.selectors.clone(),
            rules,
            root: self.root,
            params: self.params.clone(),
            closure: self.closure.clone(),
            variables: OnceCell::new(),
            rulesets: OnceCell::new(),
            lookups: RefCell::new(HashMap::new()),
        }
    }

    /// Last declaration of the variable `name` among the direct rules.
    pub fn variable(&self, name: &str) -> Option<&Declaration> {
        let variables = self.variables.get_or_init(|| {
            self.rules
                .iter()
                .enumerate()
                .filter_map(|(index, rule)| match rule.as_declaration() {
                    Some(declaration) if declaration.is_variable() => {
                        Some((declaration.name.clone(), index))
                    }
                    _ => None,
                })
                .collect()
        });
        variables
            .get(name)
            .and_then(|index| self.rules[*index].as_declaration())
    }

    /// Direct child rulesets, in document order.
    pub fn rulesets(&self) -> &[Rc<Ruleset>] {
        self.rulesets.get_or_init(|| {
            self.rules
                .iter()
                .filter_map(Node::as_ruleset)
                .cloned()
                .collect()
        })
    }

    /// Child rulesets named by `selector`. A multi-element selector
    /// descends one level per element. Results are memoized per rendered
    /// selector.
    pub fn find(&self, selector: &Selector) -> Vec<MixinMatch> {
        let key = selector.to_css();
        if let Some(found) = self.lookups.borrow().get(key) {
            return found.clone();
        }

        let mut found = Vec::new();
        for child in self.rulesets() {
            if !child.selectors.iter().any(|own| own.matches(selector)) {
                continue;
            }
            match selector.tail() {
                Some(tail) => {
                    for mut nested in child.find(&tail) {
                        nested.enclosing.insert(0, Rc::clone(child));
                        found.push(nested);
                    }
                }
                None => found.push(MixinMatch {
                    ruleset: Rc::clone(child),
                    enclosing: Vec::new(),
                }),
            }
        }

        self.lookups
            .borrow_mut()
            .insert(key.to_string(), found.clone());
        found
    }

    /// Renders the tree with a fresh environment unless one is given.
    #[instrument(skip(self, env), fields(rules = self.rules.len()))]
    pub fn to_css(self: &Rc<Self>, env: Option<&mut Env>) -> EvalResult<String> {
        let mut fresh;
        let env = match env {
            Some(env) => env,
            None => {
                fresh = Env::new();
                &mut fresh
            }
        };
        self.render(&[], env, &Scope::new())
    }

    /// Renders this ruleset and everything nested in it. `context` holds
    /// the selector paths of the enclosing rulesets.
    pub fn render(
        self: &Rc<Self>,
        context: &[SelectorPath],
        env: &mut Env,
        scope: &Scope,
    ) -> EvalResult<String> {
        if self.rules.is_empty() {
            return Ok(String::new());
        }

        let (source, paths) = if self.root {
            (self.expand_imports(env)?, context.to_vec())
        } else {
            (Rc::clone(self), combine_paths(context, &self.selectors))
        };
        let frame = source.expand_mixins(env, scope)?;
        let scope = scope.push(Rc::clone(&frame));

        let mut lines = Vec::new();
        let mut nested = String::new();
        for rule in &frame.rules {
            match rule {
                Node::Ruleset(child) => {
                    if !child.is_definition() {
                        nested.push_str(&child.render(&paths, env, &scope)?);
                    }
                }
                Node::Comment(text) if frame.root => {
                    nested.push_str(text);
                    nested.push('\n');
                }
                Node::Declaration(declaration) => {
                    if !declaration.is_variable() {
                        lines.push(declaration.evaluate(env, &scope)?.to_css()?);
                    }
                }
                other => lines.push(other.evaluate(env, &scope)?.to_css()?),
            }
        }

        let mut css = String::new();
        if frame.root {
            if !lines.is_empty() {
                css.push_str(&lines.join("\n"));
                css.push('\n');
            }
        } else if !lines.is_empty() {
            css.push_str(&render_paths(&paths));
            css.push_str(" {\n  ");
            css.push_str(&lines.join("\n  "));
            css.push_str("\n}\n");
        }
        css.push_str(&nested);
        Ok(css)
    }

    /// Evaluates the whole ruleset into a new one: mixin calls expanded,
    /// declaration values resolved, nested rulesets evaluated. Nested mixin
    /// definitions are kept and capture the current scope.
    pub fn evaluate(self: &Rc<Self>, env: &mut Env, scope: &Scope) -> EvalResult<Ruleset> {
        let frame = self.expand_mixins(env, scope)?;
        let inner = scope.push(Rc::clone(&frame));

        let mut rules = Vec::with_capacity(frame.rules.len());
        for rule in &frame.rules {
            let evaluated = match rule {
                Node::Ruleset(child) if child.is_definition() => {
                    Node::Ruleset(child.capture(&inner))
                }
                other => other.evaluate(env, &inner)?,
            };
            rules.push(evaluated);
        }
        Ok(frame.with_rules(rules))
    }

    fn capture(self: &Rc<Self>, scope: &Scope) -> Rc<Ruleset> {
        if self.closure.is_some() {
            return Rc::clone(self);
        }
        let mut captured = self.with_rules(self.rules.clone());
        captured.closure = Some(scope.clone());
        Rc::new(captured)
    }

    /// Replaces mixin calls with the rules they produce. Each call resolves
    /// against a frame holding the rules expanded so far.
    fn expand_mixins(self: &Rc<Self>, env: &mut Env, scope: &Scope) -> EvalResult<Rc<Ruleset>> {
        let mut frame = Rc::clone(self);
        let mut index = 0;
        while index < frame.rules.len() {
            let Node::MixinCall(call) = &frame.rules[index] else {
                index += 1;
                continue;
            };

            let expanded = call.evaluate(env, &scope.push(Rc::clone(&frame)))?;
            let count = expanded.len();
            let mut rules = frame.rules.clone();
            rules.splice(index..=index, expanded);
            frame = Rc::new(frame.with_rules(rules));
            index += count;
        }
        Ok(frame)
    }

    /// Replaces `@import` nodes with the top-level rules of the imported
    /// trees. Imports of plain `.css` files are kept for the output.
    fn expand_imports(self: &Rc<Self>, env: &mut Env) -> EvalResult<Rc<Ruleset>> {
        let pending = |rule: &Node| matches!(rule, Node::Import(import) if !import.is_css());
        if !self.rules.iter().any(pending) {
            return Ok(Rc::clone(self));
        }

        let mut rules = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            match rule {
                Node::Import(import) if !import.is_css() => {
                    let tree = env
                        .import(&import.path)
                        .ok_or_else(|| EvalError::ImportNotFound {
                            path: import.path.clone(),
                        })?;
                    debug!(path = %import.path, rules = tree.rules.len(), "Expanding import");
                    let expanded =
                        env.guarded(|| import.path.clone(), |env| tree.expand_imports(env))?;
                    rules.extend(expanded.rules.iter().cloned());
                }
                other => rules.push(other.clone()),
            }
        }
        Ok(Rc::new(self.with_rules(rules)))
    }
}

impl PartialEq for Ruleset {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
            && self.selectors == other.selectors
            && self.params == other.params
            && self.rules == other.rules
    }
}

impl fmt::Debug for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ruleset")
            .field("selectors", &self.selectors)
            .field("rules", &self.rules)
            .field("root", &self.root)
            .field("params", &self.params)
            .field("closure", &self.closure.is_some())
            .finish()
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.selectors.is_empty() {
            return write!(f, "*{{{}}}", self.rules.len());
        }
        for (index, selector) in self.selectors.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", selector)?;
        }
        write!(f, "{{{}}}", self.rules.len())
    }
}
