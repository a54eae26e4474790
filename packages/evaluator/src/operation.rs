use crate::color::Color;
use crate::env::Env;
use crate::error::{EvalError, EvalResult};
use crate::node::Node;
use crate::scope::Scope;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    pub fn apply(self, left: f64, right: f64) -> EvalResult<f64> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide if right == 0.0 => Err(EvalError::syntax("Division by zero")),
            Operator::Divide => Ok(left / right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Binary arithmetic on two expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub op: Operator,
    pub left: Node,
    pub right: Node,
}

impl Operation {
    pub fn new(op: Operator, left: Node, right: Node) -> Self {
        Self { op, left, right }
    }

    pub fn evaluate(&self, env: &mut Env, scope: &Scope) -> EvalResult<Node> {
        let left = self.left.evaluate(env, scope)?;
        let right = self.right.evaluate(env, scope)?;
        operate(self.op, &left, &right)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

/// Applies `op` to two evaluated operands. A number meeting a color is
/// promoted to a grey with that value in every channel.
pub fn operate(op: Operator, left: &Node, right: &Node) -> EvalResult<Node> {
    match (left, right) {
        (Node::Number(a), Node::Number(b)) => Ok(Node::Number(a.operate(op, b)?)),
        (Node::Color(a), Node::Color(b)) => Ok(Node::Color(a.operate(op, b)?)),
        (Node::Color(a), Node::Number(b)) => Ok(Node::Color(a.operate(op, &Color::grey(b.value))?)),
        (Node::Number(a), Node::Color(b)) => Ok(Node::Color(Color::grey(a.value).operate(op, b)?)),
        _ => Err(EvalError::syntax(format!(
            "Cannot apply operator '{}' to {} and {}",
            op, left, right
        ))),
    }
}
