//! Shorthand constructors for building node trees by hand, for parser
//! front-ends and tests.
//!
//! ```
//! use nestcss_evaluator::builder::*;
//!
//! let tree = root(vec![
//!     nested(".mixin", vec![decl("color", text("blue"))]),
//!     nested(".use", vec![mixin_call(".mixin")]),
//! ]);
//! assert_eq!(
//!     tree.to_css(None).unwrap(),
//!     ".mixin {\n  color: blue;\n}\n.use {\n  color: blue;\n}\n"
//! );
//! ```

use crate::color::Color;
use crate::mixin::{Accessor, AccessorKey, MixinArg, MixinCall, MixinParam};
use crate::node::{Call, Declaration, Import, Node, Quoted, Variable};
use crate::number::Number;
use crate::operation::{Operation, Operator};
use crate::ruleset::Ruleset;
use crate::selector::Selector;
use std::rc::Rc;

pub fn text(value: &str) -> Node {
    Node::Text(value.to_string())
}

pub fn quoted(value: &str) -> Node {
    Node::Quoted(Quoted::new(value))
}

pub fn num(value: f64) -> Node {
    Node::Number(Number::unitless(value))
}

pub fn px(value: f64) -> Node {
    Node::Number(Number::new(value, "px"))
}

pub fn percent(value: f64) -> Node {
    Node::Number(Number::new(value, "%"))
}

pub fn unit(value: f64, unit: &str) -> Node {
    Node::Number(Number::new(value, unit))
}

/// Hex literal or short color keyword; anything else stays plain text.
pub fn color(value: &str) -> Node {
    Color::from_hex(value)
        .or_else(|| Color::from_keyword(value))
        .map(Node::Color)
        .unwrap_or_else(|| text(value))
}

pub fn var(name: &str) -> Node {
    Node::Variable(Variable {
        name: name.to_string(),
    })
}

pub fn call(name: &str, args: Vec<Node>) -> Node {
    Node::Call(Call {
        name: name.to_string(),
        args,
    })
}

pub fn op(operator: Operator, left: Node, right: Node) -> Node {
    Node::Operation(Box::new(Operation::new(operator, left, right)))
}

pub fn add(left: Node, right: Node) -> Node {
    op(Operator::Add, left, right)
}

pub fn sub(left: Node, right: Node) -> Node {
    op(Operator::Subtract, left, right)
}

pub fn mul(left: Node, right: Node) -> Node {
    op(Operator::Multiply, left, right)
}

pub fn div(left: Node, right: Node) -> Node {
    op(Operator::Divide, left, right)
}

/// Space separated values.
pub fn expr(items: Vec<Node>) -> Node {
    Node::Expression(items)
}

/// Comma separated values.
pub fn list(items: Vec<Node>) -> Node {
    Node::List(items)
}

pub fn decl(name: &str, value: Node) -> Node {
    Node::Declaration(Box::new(Declaration::new(name, value)))
}

pub fn important(name: &str, value: Node) -> Node {
    Node::Declaration(Box::new(Declaration {
        important: true,
        ..Declaration::new(name, value)
    }))
}

/// `name` includes the `@`.
pub fn var_decl(name: &str, value: Node) -> Node {
    decl(name, value)
}

pub fn comment(text: &str) -> Node {
    Node::Comment(text.to_string())
}

pub fn import(path: &str) -> Node {
    Node::Import(Import::new(path))
}

pub fn root(rules: Vec<Node>) -> Rc<Ruleset> {
    Rc::new(Ruleset::root(rules))
}

/// Ruleset for a comma separated selector group.
pub fn ruleset(selectors: &str, rules: Vec<Node>) -> Ruleset {
    Ruleset::new(Selector::parse_group(selectors), rules)
}

/// [`ruleset`] wrapped as a child node.
pub fn nested(selectors: &str, rules: Vec<Node>) -> Node {
    Node::Ruleset(Rc::new(ruleset(selectors, rules)))
}

/// Mixin definition, `.mixin(@a: 1px) { ... }`.
pub fn definition(selectors: &str, params: Vec<MixinParam>, rules: Vec<Node>) -> Node {
    Node::Ruleset(Rc::new(Ruleset::definition(
        Selector::parse_group(selectors),
        params,
        rules,
    )))
}

/// Parameter with a default value.
pub fn param(name: &str, default: Node) -> MixinParam {
    MixinParam::new(name, Some(default))
}

/// Parameter that must be passed.
pub fn required(name: &str) -> MixinParam {
    MixinParam::new(name, None)
}

pub fn mixin_call(selector: &str) -> Node {
    mixin_call_with(selector, Vec::new())
}

pub fn mixin_call_with(selector: &str, args: Vec<MixinArg>) -> Node {
    Node::MixinCall(MixinCall::new(Selector::parse(selector), args))
}

pub fn arg(value: Node) -> MixinArg {
    MixinArg::positional(value)
}

pub fn named_arg(name: &str, value: Node) -> MixinArg {
    MixinArg::named(name, value)
}

/// `.magic-box['content']`
pub fn accessor(selector: &str, property: &str) -> Node {
    Node::Accessor(Accessor::new(
        Selector::parse(selector),
        AccessorKey::Property(property.to_string()),
    ))
}

/// `.magic-box[@trim]`
pub fn var_accessor(selector: &str, variable: &str) -> Node {
    Node::Accessor(Accessor::new(
        Selector::parse(selector),
        AccessorKey::Variable(variable.to_string()),
    ))
}
