use super::{Function, FunctionArgs};
use crate::error::EvalResult;
use crate::node::Node;

/// Escapes a string: `e("ms:alwaysHasItsOwnSyntax()")` renders without quotes.
#[derive(Debug, Default)]
pub struct EFunction;

impl Function for EFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        args.expect_count(1)?;
        match args.get(0) {
            Some(Node::Quoted(quoted)) => Ok(Node::Text(quoted.value.clone())),
            Some(Node::Text(text)) => Ok(Node::Text(text.clone())),
            other => Err(args.expected("string", other)),
        }
    }
}
