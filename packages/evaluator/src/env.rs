use crate::error::{EvalError, EvalResult};
use crate::functions::{Function, FunctionRegistry, REGISTRY};
use crate::ruleset::Ruleset;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

fn default_max_depth() -> usize {
    64
}

/// What to do with a call to a function that is not a built-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnknownFunctionPolicy {
    /// Fail with an "Unknown function" syntax error
    #[default]
    Error,
    /// Emit the call unchanged, with evaluated arguments (`rotate(45deg)`)
    PassThrough,
}

/// Options for a single compilation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalOptions {
    /// Maximum nesting of mixin expansion, variable resolution and import
    /// expansion before evaluation is aborted
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Handling of calls to functions that are not built-ins
    #[serde(default)]
    pub unknown_functions: UnknownFunctionPolicy,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            unknown_functions: UnknownFunctionPolicy::Error,
        }
    }
}

impl EvalOptions {
    /// Reject unknown functions
    pub fn strict() -> Self {
        Self::default()
    }

    /// Pass unknown functions through as plain CSS
    pub fn lenient() -> Self {
        Self {
            unknown_functions: UnknownFunctionPolicy::PassThrough,
            ..Default::default()
        }
    }
}

/// Supplies already parsed trees for `@import` nodes, keyed by path.
pub trait Importer {
    fn import(&self, path: &str) -> Option<Rc<Ruleset>>;
}

impl Importer for HashMap<String, Rc<Ruleset>> {
    fn import(&self, path: &str) -> Option<Rc<Ruleset>> {
        self.get(path).cloned()
    }
}

/// Per-compilation evaluation state.
///
/// One `Env` belongs to one compile run. Scope frames are not stored here:
/// they travel down the call chain as [`crate::Scope`] values. The function
/// registry is a process-wide constant shared by every `Env`.
pub struct Env {
    options: EvalOptions,
    functions: &'static FunctionRegistry,
    importer: Option<Box<dyn Importer>>,
    depth: usize,
}

impl Env {
    pub fn new() -> Self {
        Self::with_options(EvalOptions::default())
    }

    pub fn with_options(options: EvalOptions) -> Self {
        Self {
            options,
            functions: Lazy::force(&REGISTRY),
            importer: None,
            depth: 0,
        }
    }

    pub fn with_importer(mut self, importer: impl Importer + 'static) -> Self {
        self.importer = Some(Box::new(importer));
        self
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    /// Case-insensitive lookup of a built-in; `None` when there is no
    /// function by that name.
    pub fn get_function(&self, name: &str) -> Option<Box<dyn Function>> {
        self.functions.get(name)
    }

    pub fn import(&self, path: &str) -> Option<Rc<Ruleset>> {
        self.importer.as_ref().and_then(|importer| importer.import(path))
    }

    /// Current nesting depth of guarded evaluation.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Runs `f` one level deeper, failing once `max_depth` is exceeded.
    /// `context` names what was being evaluated for the error message.
    pub(crate) fn guarded<T>(
        &mut self,
        context: impl FnOnce() -> String,
        f: impl FnOnce(&mut Env) -> EvalResult<T>,
    ) -> EvalResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(EvalError::RecursionLimit {
                limit: self.options.max_depth,
                context: context(),
            });
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("options", &self.options)
            .field("functions", &format!("{} functions", self.functions.len()))
            .field("importer", &self.importer.is_some())
            .field("depth", &self.depth)
            .finish()
    }
}
