//! Tree evaluation engine for nestcss stylesheets.
//!
//! Takes the node tree a parser produced (nested rulesets, variables,
//! mixins, function calls and arithmetic) and renders flat CSS text. The
//! entry point is [`Ruleset::to_css`] on the root ruleset.

pub mod builder;
pub mod color;
pub mod env;
pub mod error;
pub mod functions;
pub mod mixin;
pub mod node;
pub mod number;
pub mod operation;
pub mod ruleset;
pub mod scope;
pub mod selector;

#[cfg(test)]
mod tests_functions;


#[cfg(test)]
mod tests_operations;

#[cfg(test)]
mod tests_rendering;

#[cfg(test)]
mod tests_selectors;

pub use color::Color;
pub use env::{Env, EvalOptions, Importer, UnknownFunctionPolicy};
pub use error::{EvalError, EvalResult};
pub use functions::{Function, FunctionArgs, FunctionRegistry, REGISTRY};
pub use mixin::{Accessor, AccessorKey, MixinArg, MixinCall, MixinParam};
pub use node::{Call, Declaration, Import, Node, Quoted, Variable};
pub use number::Number;
pub use operation::{Operation, Operator};
pub use ruleset::Ruleset;
pub use scope::Scope;
pub use selector::{Combinator, Element, Selector, SelectorPath};
